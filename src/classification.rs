use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ClassificationResult {
  pub(crate) comment_id: String,
  /// Set when scoring failed and the verdict fell back to safe.
  pub(crate) error: Option<String>,
  pub(crate) is_toxic: bool,
  pub(crate) scores: BTreeMap<Attribute, f64>,
}

impl ClassificationResult {
  const BADGE_THRESHOLD: f64 = 0.5;

  /// Attributes worth surfacing next to a comment, in request order.
  pub(crate) fn badges(&self) -> Vec<(Attribute, f64)> {
    Attribute::ALL
      .into_iter()
      .filter_map(|attribute| {
        self
          .scores
          .get(&attribute)
          .copied()
          .filter(|score| *score > Self::BADGE_THRESHOLD)
          .map(|score| (attribute, score))
      })
      .collect()
  }

  pub(crate) fn default_safe(comment_id: &str, error: String) -> Self {
    Self {
      comment_id: comment_id.to_string(),
      error: Some(error),
      is_toxic: false,
      scores: BTreeMap::new(),
    }
  }

  pub(crate) fn is_degraded(&self) -> bool {
    self.error.is_some()
  }

  pub(crate) fn scored(
    comment_id: &str,
    profile: ThresholdProfile,
    scores: BTreeMap<Attribute, f64>,
  ) -> Self {
    Self {
      comment_id: comment_id.to_string(),
      error: None,
      is_toxic: profile.exceeded_by(&scores),
      scores,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scored_applies_profile() {
    let scores = [(Attribute::Insult, 0.3)].into_iter().collect();

    let result =
      ClassificationResult::scored("c1", ThresholdProfile::Japanese, scores);

    assert!(result.is_toxic);
    assert!(!result.is_degraded());
    assert_eq!(result.comment_id, "c1");
  }

  #[test]
  fn default_safe_is_visible_and_unscored() {
    let result =
      ClassificationResult::default_safe("c2", "connection refused".into());

    assert!(!result.is_toxic);
    assert!(result.scores.is_empty());
    assert!(result.is_degraded());
  }

  #[test]
  fn badges_keep_request_order_and_skip_low_scores() {
    let scores = [
      (Attribute::IdentityAttack, 0.9),
      (Attribute::Toxicity, 0.8),
      (Attribute::Threat, 0.2),
      (Attribute::Insult, 0.5),
    ]
    .into_iter()
    .collect();

    let result =
      ClassificationResult::scored("c3", ThresholdProfile::Default, scores);

    assert_eq!(
      result.badges(),
      vec![(Attribute::Toxicity, 0.8), (Attribute::IdentityAttack, 0.9)]
    );
  }
}
