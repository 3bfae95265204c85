use super::*;

/// Comments accumulated for one video, in arrival order, unique by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct CommentSet {
  comments: Vec<Comment>,
  ids: HashSet<String>,
}

impl CommentSet {
  pub(crate) fn comments(&self) -> &[Comment] {
    &self.comments
  }

  pub(crate) fn contains(&self, id: &str) -> bool {
    self.ids.contains(id)
  }

  pub(crate) fn len(&self) -> usize {
    self.comments.len()
  }

  /// Returns the set extended with the comments of `page` that are not
  /// already present, along with exactly those comments in page order.
  /// `self` is left untouched.
  pub(crate) fn merge(&self, page: Page) -> (Self, Vec<Comment>) {
    let mut merged = self.clone();

    let mut added = Vec::new();

    for comment in page.comments {
      if merged.ids.insert(comment.id.clone()) {
        merged.comments.push(comment.clone());
        added.push(comment);
      }
    }

    (merged, added)
  }
}
