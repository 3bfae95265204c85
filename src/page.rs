use super::*;

/// One response of the comment listing, consumed by a single merge.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Page {
  pub(crate) comments: Vec<Comment>,
  pub(crate) next_page_token: Option<String>,
}
