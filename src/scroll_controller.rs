use super::*;

/// What part of a rendered comment list is on screen.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Viewport {
  pub(crate) last_visible: Option<usize>,
  pub(crate) rendered: usize,
}

/// Continues the pipeline when the end of the rendered list comes into view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct InfiniteScrollController {
  margin: usize,
}

impl Default for InfiniteScrollController {
  fn default() -> Self {
    Self::new(Self::DEFAULT_MARGIN)
  }
}

impl Viewport {
  /// Works out the viewport of a list whose rows have the given heights,
  /// scrolled to `offset` inside `area_height` lines. A row cut off at the
  /// bottom still counts as visible.
  pub(crate) fn from_heights(
    heights: &[usize],
    offset: usize,
    area_height: usize,
  ) -> Self {
    let mut remaining = area_height;

    let mut last_visible = None;

    for (index, height) in heights.iter().enumerate().skip(offset) {
      if remaining == 0 {
        break;
      }

      last_visible = Some(index);
      remaining = remaining.saturating_sub(*height);
    }

    Self {
      last_visible,
      rendered: heights.len(),
    }
  }
}

impl InfiniteScrollController {
  pub(crate) const DEFAULT_MARGIN: usize = 3;

  pub(crate) fn new(margin: usize) -> Self {
    Self { margin }
  }

  /// Returns the fetch to run, if the sentinel is visible and the pipeline
  /// can take another page. Observations while loading are dropped.
  pub(crate) fn observe(
    &self,
    viewport: Viewport,
    pipeline: &mut ModerationPipeline,
  ) -> Option<ModerationEffect> {
    if !self.sentinel_visible(viewport) {
      return None;
    }

    if pipeline.status() == PipelineStatus::Loading || !pipeline.has_more() {
      return None;
    }

    debug!(
      rendered = viewport.rendered,
      last_visible = ?viewport.last_visible,
      "scroll sentinel visible"
    );

    pipeline.load_next_page()
  }

  pub(crate) fn sentinel_visible(&self, viewport: Viewport) -> bool {
    if viewport.rendered == 0 {
      return true;
    }

    viewport
      .last_visible
      .is_some_and(|last| last + 1 + self.margin >= viewport.rendered)
  }
}
