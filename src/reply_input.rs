/// A reply being typed under a comment. Replies are never posted.
pub(crate) struct ReplyInput {
  pub(crate) buffer: String,
  pub(crate) comment_id: String,
  pub(crate) message_backup: String,
}

impl ReplyInput {
  pub(crate) fn new(comment_id: String, message_backup: String) -> Self {
    Self {
      buffer: String::new(),
      comment_id,
      message_backup,
    }
  }

  pub(crate) fn prompt(&self) -> String {
    format!("返信: {}", self.buffer)
  }
}
