use super::*;

/// A status line message that reverts to `original` after a few seconds.
#[derive(Clone)]
pub(crate) struct TransientMessage {
  current: String,
  expires_at: Instant,
  original: String,
}

impl TransientMessage {
  const LIFETIME: Duration = Duration::from_secs(3);

  pub(crate) fn current(&self) -> &str {
    &self.current
  }

  pub(crate) fn is_expired(&self, now: Instant) -> bool {
    now >= self.expires_at
  }

  pub(crate) fn new(current: String, original: String, now: Instant) -> Self {
    Self {
      current,
      expires_at: now + Self::LIFETIME,
      original,
    }
  }

  pub(crate) fn original(&self) -> &str {
    &self.original
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expires_after_lifetime() {
    let now = Instant::now();

    let message = TransientMessage::new("sent".into(), "idle".into(), now);

    assert!(!message.is_expired(now + Duration::from_secs(2)));
    assert!(message.is_expired(now + Duration::from_secs(3)));
    assert_eq!(message.current(), "sent");
    assert_eq!(message.original(), "idle");
  }
}
