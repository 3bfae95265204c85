use super::*;

/// A bucket's comments as a two-level list: top-level comments with their
/// replies, collapsed until toggled.
#[derive(Default)]
pub(crate) struct CommentView {
  entries: Vec<CommentEntry>,
  offset: usize,
  selected: Option<usize>,
}

impl CommentView {
  /// Appends newly moderated comments below the existing ones. Selection and
  /// scroll position are kept.
  pub(crate) fn append(&mut self, comments: Vec<ModeratedComment>) {
    for moderated in comments {
      let (entry, replies) = CommentEntry::top_level(moderated);

      let parent = self.entries.len();

      self.entries.push(entry);

      let children = replies
        .into_iter()
        .map(|reply| {
          self.entries.push(CommentEntry::reply(reply, parent));
          self.entries.len() - 1
        })
        .collect();

      self.entries[parent].children = children;
    }

    if self.selected.is_none() && !self.entries.is_empty() {
      self.selected = Some(0);
    }
  }

  pub(crate) fn clear(&mut self) {
    *self = Self::default();
  }

  pub(crate) fn comment_count(&self) -> usize {
    self
      .entries
      .iter()
      .filter(|entry| !entry.is_reply())
      .count()
  }

  pub(crate) fn entry(&self, index: usize) -> Option<&CommentEntry> {
    self.entries.get(index)
  }

  fn is_visible(&self, index: usize) -> bool {
    match self.entries.get(index).and_then(|entry| entry.parent) {
      Some(parent) => self
        .entries
        .get(parent)
        .is_some_and(|parent| parent.expanded),
      None => index < self.entries.len(),
    }
  }

  pub(crate) fn move_by(&mut self, delta: isize) {
    let (visible, position) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = position.unwrap_or(0);

    let target = current
      .saturating_add_signed(delta)
      .min(visible.len().saturating_sub(1));

    self.selected = Some(visible[target]);
  }

  pub(crate) fn offset(&self) -> usize {
    self.offset
  }

  pub(crate) fn select_first(&mut self) {
    self.selected = self.visible_indexes().first().copied();
  }

  pub(crate) fn select_last(&mut self) {
    self.selected = self.visible_indexes().last().copied();
  }

  pub(crate) fn selected_entry(&self) -> Option<&CommentEntry> {
    self.selected.and_then(|index| self.entries.get(index))
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.offset = offset;
  }

  /// Shows or hides the replies under the selection. On a reply, hides its
  /// siblings and moves back to the parent.
  pub(crate) fn toggle_selected(&mut self) {
    let Some(selected) = self.selected else {
      return;
    };

    let target = self
      .entries
      .get(selected)
      .and_then(|entry| entry.parent)
      .unwrap_or(selected);

    let Some(entry) = self.entries.get_mut(target) else {
      return;
    };

    if !entry.has_replies() {
      return;
    }

    entry.expanded = !entry.expanded;

    self.selected = Some(target);
  }

  pub(crate) fn visible_indexes(&self) -> Vec<usize> {
    (0..self.entries.len())
      .filter(|&index| self.is_visible(index))
      .collect()
  }

  pub(crate) fn visible_with_selection(&self) -> (Vec<usize>, Option<usize>) {
    let visible = self.visible_indexes();

    let position = self
      .selected
      .and_then(|selected| visible.iter().position(|&index| index == selected));

    (visible, position)
  }
}
