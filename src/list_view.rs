/// A selectable list that grows as pages arrive.
pub(crate) struct ListView<T> {
  items: Vec<T>,
  offset: usize,
  selected: usize,
}

impl<T> Default for ListView<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      offset: 0,
      selected: 0,
    }
  }
}

impl<T> ListView<T> {
  pub(crate) fn extend<I>(&mut self, items: I)
  where
    I: IntoIterator<Item = T>,
  {
    self.items.extend(items);
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub(crate) fn items(&self) -> &[T] {
    &self.items
  }

  pub(crate) fn last_index(&self) -> Option<usize> {
    self.items.len().checked_sub(1)
  }

  pub(crate) fn len(&self) -> usize {
    self.items.len()
  }

  pub(crate) fn offset(&self) -> usize {
    self.offset.min(self.selected_index().unwrap_or(0))
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    self.last_index().map(|last| self.selected.min(last))
  }

  pub(crate) fn selected_item(&self) -> Option<&T> {
    self.selected_index().and_then(|index| self.items.get(index))
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.offset = self.last_index().map_or(0, |last| offset.min(last));
  }

  pub(crate) fn set_selected(&mut self, index: usize) {
    self.selected = self.last_index().map_or(0, |last| index.min(last));
  }
}
