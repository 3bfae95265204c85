use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PipelineStatus {
  Error,
  Idle,
  Loading,
}

/// Everything accumulated for the active video.
///
/// A comment id is in at most one of `safe` and `flagged`, and every comment
/// in either has an entry in `classifications`. While a batch is being
/// classified, its remaining comments wait in `pending`.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ModerationState {
  accumulated: CommentSet,
  classifications: HashMap<String, ClassificationResult>,
  cursor: Cursor,
  flagged: Vec<Comment>,
  in_flight: bool,
  last_error: Option<String>,
  pending: VecDeque<Comment>,
  safe: Vec<Comment>,
}

/// Pages comments in, classifies each new one, and buckets the results.
///
/// The pipeline never performs I/O itself. It hands out one
/// [`ModerationEffect`] at a time and advances when the matching
/// [`ModerationEvent`] comes back, so at most one page fetch or one
/// classification is outstanding.
pub(crate) struct ModerationPipeline {
  generation: u64,
  page_size: u32,
  state: ModerationState,
  video_id: Option<String>,
}

impl ModerationState {
  pub(crate) fn accumulated(&self) -> &[Comment] {
    self.accumulated.comments()
  }

  pub(crate) fn classification(
    &self,
    comment_id: &str,
  ) -> Option<&ClassificationResult> {
    self.classifications.get(comment_id)
  }

  pub(crate) fn cursor(&self) -> &Cursor {
    &self.cursor
  }

  pub(crate) fn flagged(&self) -> &[Comment] {
    &self.flagged
  }

  pub(crate) fn safe(&self) -> &[Comment] {
    &self.safe
  }
}

impl ModerationPipeline {
  /// Forgets the active video. Completions still in flight for it are
  /// dropped when they arrive.
  pub(crate) fn clear(&mut self) {
    if let Some(video_id) = self.video_id.take() {
      info!(video_id, "discarding comment moderation state");
    }

    self.generation = self.generation.wrapping_add(1);
    self.state = ModerationState::default();
  }

  fn handle_classified(
    &mut self,
    result: ClassificationResult,
    ticket: Ticket,
    sink: &mut impl CommentSink,
  ) -> Option<ModerationEffect> {
    let expected = self.state.pending.front().map(|comment| &comment.id);

    if expected != Some(&result.comment_id) {
      warn!(
        comment_id = %result.comment_id,
        "classification does not match the queued comment"
      );

      return self.next_classification(ticket);
    }

    let comment = self.state.pending.pop_front()?;

    let bucket = if result.is_toxic {
      Bucket::Flagged
    } else {
      Bucket::Safe
    };

    match bucket {
      Bucket::Flagged => self.state.flagged.push(comment.clone()),
      Bucket::Safe => self.state.safe.push(comment.clone()),
    }

    self
      .state
      .classifications
      .insert(comment.id.clone(), result.clone());

    sink.render(
      bucket,
      vec![ModeratedComment {
        classification: result,
        comment,
      }],
      RenderMode::Append,
    );

    self.next_classification(ticket)
  }

  /// Applies a completion and returns the next effect to run, if any.
  pub(crate) fn handle_event(
    &mut self,
    event: ModerationEvent,
    sink: &mut impl CommentSink,
  ) -> Option<ModerationEffect> {
    if !self.is_current(event.ticket()) {
      debug!(
        video_id = %event.ticket().video_id,
        generation = event.ticket().generation,
        "dropping stale moderation event"
      );

      return None;
    }

    match event {
      ModerationEvent::Classified { result, ticket } => {
        self.handle_classified(result, ticket, sink)
      }
      ModerationEvent::Page { result, ticket } => {
        self.handle_page(result, ticket, sink)
      }
    }
  }

  fn handle_page(
    &mut self,
    result: Result<Page>,
    ticket: Ticket,
    sink: &mut impl CommentSink,
  ) -> Option<ModerationEffect> {
    match result {
      Ok(mut page) => {
        let next_page_token = page.next_page_token.take();

        let fetched = page.comments.len();

        let (accumulated, added) = self.state.accumulated.merge(page);

        info!(
          video_id = %ticket.video_id,
          fetched,
          added = added.len(),
          total = accumulated.len(),
          "merged comment page"
        );

        self.state.accumulated = accumulated;
        self.state.cursor = Cursor::after(next_page_token);
        self.state.last_error = None;
        self.state.pending.extend(added);

        self.next_classification(ticket)
      }
      Err(error) => {
        let message = format!("{error:#}");

        warn!(
          video_id = %ticket.video_id,
          error = %message,
          "comment page fetch failed"
        );

        self.state.in_flight = false;
        self.state.last_error = Some(message.clone());

        sink.report_error(message);

        None
      }
    }
  }

  pub(crate) fn has_more(&self) -> bool {
    self.state.cursor.has_continuation()
  }

  fn is_current(&self, ticket: &Ticket) -> bool {
    self.generation == ticket.generation
      && self.video_id.as_deref() == Some(ticket.video_id.as_str())
  }

  pub(crate) fn last_error(&self) -> Option<&str> {
    self.state.last_error.as_deref()
  }

  /// Starts fetching the next page. A no-op while a load is in flight,
  /// after the last page, or when no video is selected.
  pub(crate) fn load_next_page(&mut self) -> Option<ModerationEffect> {
    let Some(ticket) = self.ticket() else {
      warn!("no video selected, comment pipeline not initialized");
      return None;
    };

    if self.state.in_flight {
      debug!(video_id = %ticket.video_id, "comment load already in flight");
      return None;
    }

    if self.state.cursor.is_exhausted() {
      debug!(video_id = %ticket.video_id, "no more comment pages");
      return None;
    }

    self.state.in_flight = true;

    Some(ModerationEffect::FetchPage {
      page_size: self.page_size,
      page_token: self.state.cursor.page_token().map(str::to_string),
      ticket,
    })
  }

  pub(crate) fn new(page_size: u32) -> Self {
    Self {
      generation: 0,
      page_size,
      state: ModerationState::default(),
      video_id: None,
    }
  }

  fn next_classification(
    &mut self,
    ticket: Ticket,
  ) -> Option<ModerationEffect> {
    if let Some(comment) = self.state.pending.front() {
      return Some(ModerationEffect::Classify {
        comment: comment.clone(),
        ticket,
      });
    }

    self.state.in_flight = false;

    debug!(
      video_id = %ticket.video_id,
      safe = self.state.safe.len(),
      flagged = self.state.flagged.len(),
      "comment batch moderated"
    );

    None
  }

  pub(crate) fn state(&self) -> &ModerationState {
    &self.state
  }

  pub(crate) fn status(&self) -> PipelineStatus {
    if self.state.in_flight {
      PipelineStatus::Loading
    } else if self.state.last_error.is_some() {
      PipelineStatus::Error
    } else {
      PipelineStatus::Idle
    }
  }

  /// Resets all state for `video_id` and clears both buckets of the sink.
  pub(crate) fn switch_video(
    &mut self,
    video_id: &str,
    sink: &mut impl CommentSink,
  ) {
    self.generation = self.generation.wrapping_add(1);
    self.state = ModerationState::default();
    self.video_id = Some(video_id.to_string());

    info!(video_id, generation = self.generation, "switched active video");

    sink.render(Bucket::Safe, Vec::new(), RenderMode::Replace);
    sink.render(Bucket::Flagged, Vec::new(), RenderMode::Replace);
  }

  fn ticket(&self) -> Option<Ticket> {
    self.video_id.as_ref().map(|video_id| Ticket {
      generation: self.generation,
      video_id: video_id.clone(),
    })
  }

  pub(crate) fn video_id(&self) -> Option<&str> {
    self.video_id.as_deref()
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::fakes::{FakeScorer, FakeSource, RecordingSink, drive, page},
  };

  fn ids(comments: &[Comment]) -> Vec<&str> {
    comments.iter().map(|comment| comment.id.as_str()).collect()
  }

  fn two_page_source() -> FakeSource {
    FakeSource::default()
      .with_page(None, page(&["1", "2"], Some("tok1")))
      .with_page(Some("tok1"), page(&["2", "3"], None))
  }

  fn flagging_scorer() -> FakeScorer {
    FakeScorer::default()
      .with_default_scores(&[("TOXICITY", 0.05)])
      .scoring("comment 2", &[("TOXICITY", 0.9)])
  }

  #[tokio::test]
  async fn two_pages_accumulate_without_duplicates() {
    let (source, scorer) = (two_page_source(), flagging_scorer());

    let classifier = ToxicityClassifier::new(scorer.clone());

    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(2);

    pipeline.switch_video("video", &mut sink);

    let effect = pipeline.load_next_page();
    drive(&mut pipeline, &source, &classifier, &mut sink, effect).await;

    assert_eq!(pipeline.state().accumulated().len(), 2);
    assert_eq!(ids(pipeline.state().safe()), vec!["1"]);
    assert_eq!(ids(pipeline.state().flagged()), vec!["2"]);
    assert_eq!(pipeline.status(), PipelineStatus::Idle);
    assert!(pipeline.has_more());

    let effect = pipeline.load_next_page();
    drive(&mut pipeline, &source, &classifier, &mut sink, effect).await;

    assert_eq!(ids(pipeline.state().accumulated()), vec!["1", "2", "3"]);
    assert_eq!(ids(pipeline.state().safe()), vec!["1", "3"]);
    assert_eq!(ids(pipeline.state().flagged()), vec!["2"]);
    assert_eq!(source.calls(), vec![None, Some("tok1".to_string())]);
    assert_eq!(scorer.calls().len(), 3);

    assert_eq!(sink.ids(Bucket::Safe), vec!["1", "3"]);
    assert_eq!(sink.ids(Bucket::Flagged), vec!["2"]);
  }

  #[tokio::test]
  async fn buckets_partition_the_accumulated_set() {
    let source = two_page_source();

    let classifier = ToxicityClassifier::new(flagging_scorer());

    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(2);

    pipeline.switch_video("video", &mut sink);

    for _ in 0..2 {
      let effect = pipeline.load_next_page();
      drive(&mut pipeline, &source, &classifier, &mut sink, effect).await;
    }

    let state = pipeline.state();

    let safe = ids(state.safe()).into_iter().collect::<HashSet<_>>();
    let flagged = ids(state.flagged()).into_iter().collect::<HashSet<_>>();
    let accumulated =
      ids(state.accumulated()).into_iter().collect::<HashSet<_>>();

    assert!(safe.is_disjoint(&flagged));
    assert_eq!(&safe | &flagged, accumulated);

    for id in accumulated {
      assert!(state.classification(id).is_some(), "{id} is unclassified");
    }
  }

  #[tokio::test]
  async fn exhausted_cursor_stops_fetching() {
    let source = FakeSource::default().with_page(None, page(&["1"], None));

    let classifier = ToxicityClassifier::new(FakeScorer::default());

    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(20);

    pipeline.switch_video("video", &mut sink);

    let effect = pipeline.load_next_page();
    drive(&mut pipeline, &source, &classifier, &mut sink, effect).await;

    assert!(pipeline.state().cursor().is_exhausted());

    let snapshot = pipeline.state().clone();

    for _ in 0..3 {
      assert_eq!(pipeline.load_next_page(), None);
    }

    assert_eq!(source.calls().len(), 1);
    assert_eq!(pipeline.state(), &snapshot);
  }

  #[test]
  fn load_is_a_no_op_while_in_flight() {
    let mut pipeline = ModerationPipeline::new(20);

    pipeline.switch_video("video", &mut RecordingSink::default());

    assert!(pipeline.load_next_page().is_some());
    assert_eq!(pipeline.status(), PipelineStatus::Loading);
    assert_eq!(pipeline.load_next_page(), None);
  }

  #[test]
  fn load_without_video_does_nothing() {
    let mut pipeline = ModerationPipeline::new(20);

    assert_eq!(pipeline.load_next_page(), None);
    assert_eq!(pipeline.status(), PipelineStatus::Idle);
  }

  #[tokio::test]
  async fn classification_failure_keeps_comment_visible() {
    let source = FakeSource::default().with_page(None, page(&["1"], None));

    let classifier =
      ToxicityClassifier::new(FakeScorer::default().failing_on("comment 1"));

    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(20);

    pipeline.switch_video("video", &mut sink);

    let effect = pipeline.load_next_page();
    drive(&mut pipeline, &source, &classifier, &mut sink, effect).await;

    assert_eq!(ids(pipeline.state().safe()), vec!["1"]);
    assert!(pipeline.state().flagged().is_empty());

    let result = pipeline.state().classification("1").unwrap();

    assert!(!result.is_toxic);
    assert!(result.is_degraded());
    assert_eq!(pipeline.status(), PipelineStatus::Idle);
    assert!(sink.errors.is_empty());
  }

  #[tokio::test]
  async fn fetch_failure_preserves_cursor_for_retry() {
    let source = two_page_source();

    let classifier = ToxicityClassifier::new(FakeScorer::default());

    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(2);

    pipeline.switch_video("video", &mut sink);

    let effect = pipeline.load_next_page();
    drive(&mut pipeline, &source, &classifier, &mut sink, effect).await;

    source.fail_next(1);

    let effect = pipeline.load_next_page();
    drive(&mut pipeline, &source, &classifier, &mut sink, effect).await;

    assert_eq!(pipeline.status(), PipelineStatus::Error);
    assert_eq!(sink.errors.len(), 1);
    assert_eq!(pipeline.state().cursor(), &Cursor::Next("tok1".into()));
    assert_eq!(pipeline.state().accumulated().len(), 2);

    let retry = pipeline.load_next_page();

    assert!(matches!(
      &retry,
      Some(ModerationEffect::FetchPage { page_token: Some(token), .. })
        if token == "tok1"
    ));

    drive(&mut pipeline, &source, &classifier, &mut sink, retry).await;

    assert_eq!(pipeline.status(), PipelineStatus::Idle);
    assert_eq!(pipeline.state().accumulated().len(), 3);
    assert_eq!(pipeline.last_error(), None);
  }

  #[tokio::test]
  async fn classifications_are_issued_one_at_a_time() {
    let source =
      FakeSource::default().with_page(None, page(&["1", "2", "3"], None));

    let classifier = ToxicityClassifier::new(FakeScorer::default());

    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(20);

    pipeline.switch_video("video", &mut sink);

    let mut effect = pipeline.load_next_page();

    let mut classified = Vec::new();

    while let Some(current) = effect {
      if let ModerationEffect::Classify { comment, .. } = &current {
        classified.push(comment.id.clone());
        assert_eq!(pipeline.status(), PipelineStatus::Loading);
      }

      let event = current.run(&source, &classifier).await;
      effect = pipeline.handle_event(event, &mut sink);
    }

    assert_eq!(classified, vec!["1", "2", "3"]);
    assert_eq!(sink.renders.len(), 2 + 3);
  }

  #[tokio::test]
  async fn completions_for_a_previous_video_are_dropped() {
    let source = FakeSource::default().with_page(None, page(&["1"], None));

    let classifier = ToxicityClassifier::new(FakeScorer::default());

    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(20);

    pipeline.switch_video("first", &mut sink);

    let stale = pipeline.load_next_page().unwrap();

    pipeline.switch_video("second", &mut sink);

    let event = stale.run(&source, &classifier).await;

    assert_eq!(pipeline.handle_event(event, &mut sink), None);
    assert!(pipeline.state().accumulated().is_empty());
    assert_eq!(pipeline.status(), PipelineStatus::Idle);
    assert_eq!(pipeline.video_id(), Some("second"));
    assert!(pipeline.load_next_page().is_some());
  }

  #[tokio::test]
  async fn reopening_the_same_video_drops_earlier_completions() {
    let source = FakeSource::default().with_page(None, page(&["1"], None));

    let classifier = ToxicityClassifier::new(FakeScorer::default());

    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(20);

    pipeline.switch_video("video", &mut sink);

    let stale = pipeline.load_next_page().unwrap();

    pipeline.switch_video("video", &mut sink);

    let event = stale.run(&source, &classifier).await;

    assert_eq!(pipeline.handle_event(event, &mut sink), None);
    assert!(pipeline.state().accumulated().is_empty());
  }

  #[test]
  fn switch_video_resets_state_and_replaces_buckets() {
    let mut sink = RecordingSink::default();

    let mut pipeline = ModerationPipeline::new(20);

    pipeline.switch_video("first", &mut sink);
    let _ = pipeline.load_next_page();

    pipeline.switch_video("second", &mut sink);

    assert_eq!(pipeline.status(), PipelineStatus::Idle);
    assert_eq!(pipeline.state().cursor(), &Cursor::Start);
    assert_eq!(
      sink.renders.last(),
      Some(&(Bucket::Flagged, Vec::new(), RenderMode::Replace))
    );
  }

  #[test]
  fn clear_forgets_the_video() {
    let mut pipeline = ModerationPipeline::new(20);

    pipeline.switch_video("video", &mut RecordingSink::default());
    pipeline.clear();

    assert_eq!(pipeline.video_id(), None);
    assert_eq!(pipeline.load_next_page(), None);
  }
}
