use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Attribute {
  IdentityAttack,
  Insult,
  SevereToxicity,
  Threat,
  Toxicity,
}

impl Attribute {
  /// Every attribute requested from the scoring service, in request order.
  pub(crate) const ALL: [Attribute; 5] = [
    Attribute::Toxicity,
    Attribute::SevereToxicity,
    Attribute::Insult,
    Attribute::Threat,
    Attribute::IdentityAttack,
  ];

  pub(crate) fn from_name(name: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|attribute| attribute.name() == name)
  }

  pub(crate) fn name(self) -> &'static str {
    match self {
      Attribute::IdentityAttack => "IDENTITY_ATTACK",
      Attribute::Insult => "INSULT",
      Attribute::SevereToxicity => "SEVERE_TOXICITY",
      Attribute::Threat => "THREAT",
      Attribute::Toxicity => "TOXICITY",
    }
  }
}

impl Display for Attribute {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_name_accepts_wire_names_only() {
    assert_eq!(
      Attribute::from_name("SEVERE_TOXICITY"),
      Some(Attribute::SevereToxicity)
    );
    assert_eq!(Attribute::from_name("severe_toxicity"), None);
    assert_eq!(Attribute::from_name("PROFANITY"), None);
  }

  #[test]
  fn every_attribute_round_trips_through_its_name() {
    for attribute in Attribute::ALL {
      assert_eq!(Attribute::from_name(attribute.name()), Some(attribute));
    }
  }
}
