use super::*;

/// Score thresholds applied to a comment, selected by the script it is
/// written in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ThresholdProfile {
  Default,
  Japanese,
}

impl ThresholdProfile {
  pub(crate) fn detect(text: &str) -> Self {
    if text.chars().any(Self::is_japanese) {
      ThresholdProfile::Japanese
    } else {
      ThresholdProfile::Default
    }
  }

  pub(crate) fn exceeded_by(self, scores: &BTreeMap<Attribute, f64>) -> bool {
    scores
      .iter()
      .any(|(attribute, score)| *score > self.threshold(*attribute))
  }

  fn is_japanese(ch: char) -> bool {
    matches!(
      ch,
      '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}'
    )
  }

  pub(crate) fn threshold(self, attribute: Attribute) -> f64 {
    match (self, attribute) {
      (ThresholdProfile::Japanese, _) => 0.1,
      (ThresholdProfile::Default, Attribute::SevereToxicity) => 0.4,
      (ThresholdProfile::Default, _) => 0.5,
    }
  }
}
