use super::*;

/// The comments screen of one video: its details and the two moderated
/// buckets, of which one is shown at a time.
pub(crate) struct VideoView {
  active: Bucket,
  details: Option<Result<VideoDetails, String>>,
  flagged: CommentView,
  reported_errors: Vec<String>,
  safe: CommentView,
  video_id: String,
}

impl VideoView {
  pub(crate) fn active(&self) -> Bucket {
    self.active
  }

  pub(crate) fn active_view(&self) -> &CommentView {
    self.view(self.active)
  }

  pub(crate) fn active_view_mut(&mut self) -> &mut CommentView {
    self.view_mut(self.active)
  }

  pub(crate) fn details(&self) -> Option<&Result<VideoDetails, String>> {
    self.details.as_ref()
  }

  pub(crate) fn new(video_id: String) -> Self {
    Self {
      active: Bucket::Safe,
      details: None,
      flagged: CommentView::default(),
      reported_errors: Vec::new(),
      safe: CommentView::default(),
      video_id,
    }
  }

  pub(crate) fn selected_permalink(&self) -> String {
    self.active_view().selected_entry().map_or_else(
      || watch_url(&self.video_id),
      |entry| entry.permalink(&self.video_id),
    )
  }

  pub(crate) fn set_details(&mut self, details: Result<VideoDetails, String>) {
    self.details = Some(details);
  }

  pub(crate) fn switch_tab(&mut self) {
    self.active = match self.active {
      Bucket::Flagged => Bucket::Safe,
      Bucket::Safe => Bucket::Flagged,
    };
  }

  pub(crate) fn tab_titles(&self) -> [String; 2] {
    [
      format!("AIフィルター済み ({})", self.safe.comment_count()),
      format!("フラグ付き ({})", self.flagged.comment_count()),
    ]
  }

  /// Errors reported by the pipeline since the last call.
  pub(crate) fn take_reported_errors(&mut self) -> Vec<String> {
    std::mem::take(&mut self.reported_errors)
  }

  pub(crate) fn video_id(&self) -> &str {
    &self.video_id
  }

  pub(crate) fn view(&self, bucket: Bucket) -> &CommentView {
    match bucket {
      Bucket::Flagged => &self.flagged,
      Bucket::Safe => &self.safe,
    }
  }

  fn view_mut(&mut self, bucket: Bucket) -> &mut CommentView {
    match bucket {
      Bucket::Flagged => &mut self.flagged,
      Bucket::Safe => &mut self.safe,
    }
  }
}

impl CommentSink for VideoView {
  fn render(
    &mut self,
    bucket: Bucket,
    comments: Vec<ModeratedComment>,
    mode: RenderMode,
  ) {
    let view = self.view_mut(bucket);

    if mode == RenderMode::Replace {
      view.clear();
    }

    view.append(comments);
  }

  fn report_error(&mut self, message: String) {
    self.reported_errors.push(message);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn moderated(id: &str, is_toxic: bool) -> ModeratedComment {
    let mut classification =
      ClassificationResult::default_safe(id, String::new());

    classification.is_toxic = is_toxic;

    ModeratedComment {
      classification,
      comment: Comment::stub(id, "text"),
    }
  }

  #[test]
  fn renders_land_in_their_bucket() {
    let mut view = VideoView::new("v1".into());

    view.render(Bucket::Safe, vec![moderated("1", false)], RenderMode::Append);
    view.render(
      Bucket::Flagged,
      vec![moderated("2", true)],
      RenderMode::Append,
    );
    view.render(Bucket::Safe, vec![moderated("3", false)], RenderMode::Append);

    assert_eq!(
      view.tab_titles(),
      ["AIフィルター済み (2)".to_string(), "フラグ付き (1)".to_string()]
    );
  }

  #[test]
  fn replace_clears_the_bucket() {
    let mut view = VideoView::new("v1".into());

    view.render(Bucket::Safe, vec![moderated("1", false)], RenderMode::Append);
    view.render(Bucket::Safe, Vec::new(), RenderMode::Replace);

    assert_eq!(view.view(Bucket::Safe).comment_count(), 0);
  }

  #[test]
  fn switch_tab_alternates_buckets() {
    let mut view = VideoView::new("v1".into());

    assert_eq!(view.active(), Bucket::Safe);

    view.switch_tab();
    assert_eq!(view.active(), Bucket::Flagged);

    view.switch_tab();
    assert_eq!(view.active(), Bucket::Safe);
  }

  #[test]
  fn permalink_falls_back_to_the_video() {
    let mut view = VideoView::new("v1".into());

    assert_eq!(view.selected_permalink(), "https://www.youtube.com/watch?v=v1");

    view.render(Bucket::Safe, vec![moderated("c9", false)], RenderMode::Append);

    assert_eq!(
      view.selected_permalink(),
      "https://www.youtube.com/watch?v=v1&lc=c9"
    );
  }

  #[test]
  fn reported_errors_are_drained_once() {
    let mut view = VideoView::new("v1".into());

    view.report_error("boom".into());

    assert_eq!(view.take_reported_errors(), vec!["boom".to_string()]);
    assert!(view.take_reported_errors().is_empty());
  }
}
