use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Bucket {
  Flagged,
  Safe,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ModeratedComment {
  pub(crate) classification: ClassificationResult,
  pub(crate) comment: Comment,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RenderMode {
  Append,
  Replace,
}

/// Receives moderated comments as they are bucketed. Deltas only ever
/// carry comments the sink has not been handed before.
pub(crate) trait CommentSink {
  fn render(
    &mut self,
    bucket: Bucket,
    comments: Vec<ModeratedComment>,
    mode: RenderMode,
  );

  fn report_error(&mut self, message: String);
}
