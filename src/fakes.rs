use {super::*, std::sync::Arc};

#[derive(Clone, Default)]
pub(crate) struct FakeScorer {
  inner: Arc<Mutex<ScorerScript>>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeSource {
  inner: Arc<Mutex<SourceScript>>,
}

#[derive(Default)]
pub(crate) struct RecordingSink {
  pub(crate) errors: Vec<String>,
  pub(crate) renders: Vec<(Bucket, Vec<String>, RenderMode)>,
}

#[derive(Default)]
struct ScorerScript {
  calls: Vec<String>,
  default_scores: AttributeScores,
  failing: HashSet<String>,
  scores: HashMap<String, AttributeScores>,
}

#[derive(Default)]
struct SourceScript {
  calls: Vec<Option<String>>,
  failures: usize,
  pages: HashMap<Option<String>, Page>,
}

impl FakeScorer {
  pub(crate) fn calls(&self) -> Vec<String> {
    self.inner.lock().unwrap().calls.clone()
  }

  pub(crate) fn failing_on(self, text: &str) -> Self {
    self.inner.lock().unwrap().failing.insert(text.to_string());
    self
  }

  pub(crate) fn scoring(self, text: &str, entries: &[(&str, f64)]) -> Self {
    self
      .inner
      .lock()
      .unwrap()
      .scores
      .insert(text.to_string(), Self::to_scores(entries));
    self
  }

  fn to_scores(entries: &[(&str, f64)]) -> AttributeScores {
    entries
      .iter()
      .map(|(name, score)| ((*name).to_string(), *score))
      .collect()
  }

  pub(crate) fn with_default_scores(self, entries: &[(&str, f64)]) -> Self {
    self.inner.lock().unwrap().default_scores = Self::to_scores(entries);
    self
  }
}

#[async_trait]
impl TextScorer for FakeScorer {
  async fn score_text(&self, text: &str) -> Result<AttributeScores> {
    let mut script = self.inner.lock().unwrap();

    script.calls.push(text.to_string());

    if script.failing.contains(text) {
      return Err(anyhow!("scorer unavailable for {text}"));
    }

    Ok(
      script
        .scores
        .get(text)
        .cloned()
        .unwrap_or_else(|| script.default_scores.clone()),
    )
  }
}

impl FakeSource {
  pub(crate) fn calls(&self) -> Vec<Option<String>> {
    self.inner.lock().unwrap().calls.clone()
  }

  pub(crate) fn fail_next(&self, count: usize) {
    self.inner.lock().unwrap().failures = count;
  }

  pub(crate) fn with_page(self, token: Option<&str>, page: Page) -> Self {
    self
      .inner
      .lock()
      .unwrap()
      .pages
      .insert(token.map(str::to_string), page);
    self
  }
}

#[async_trait]
impl CommentSource for FakeSource {
  async fn fetch_page(
    &self,
    _video_id: &str,
    page_token: Option<&str>,
    _page_size: u32,
  ) -> Result<Page> {
    let mut script = self.inner.lock().unwrap();

    let token = page_token.map(str::to_string);

    script.calls.push(token.clone());

    if script.failures > 0 {
      script.failures -= 1;
      return Err(anyhow!("upstream returned 503"));
    }

    script
      .pages
      .get(&token)
      .cloned()
      .ok_or_else(|| anyhow!("no page scripted for {token:?}"))
  }
}

impl RecordingSink {
  /// Replays every render into the list a view would currently show.
  pub(crate) fn ids(&self, bucket: Bucket) -> Vec<String> {
    let mut ids = Vec::new();

    for (rendered, comments, mode) in &self.renders {
      if *rendered != bucket {
        continue;
      }

      if *mode == RenderMode::Replace {
        ids.clear();
      }

      ids.extend(comments.iter().cloned());
    }

    ids
  }
}

impl CommentSink for RecordingSink {
  fn render(
    &mut self,
    bucket: Bucket,
    comments: Vec<ModeratedComment>,
    mode: RenderMode,
  ) {
    self.renders.push((
      bucket,
      comments.into_iter().map(|moderated| moderated.comment.id).collect(),
      mode,
    ));
  }

  fn report_error(&mut self, message: String) {
    self.errors.push(message);
  }
}

pub(crate) async fn drive<S: CommentSource, T: TextScorer>(
  pipeline: &mut ModerationPipeline,
  source: &S,
  classifier: &ToxicityClassifier<T>,
  sink: &mut RecordingSink,
  effect: Option<ModerationEffect>,
) {
  let mut next = effect;

  while let Some(effect) = next {
    let event = effect.run(source, classifier).await;
    next = pipeline.handle_event(event, sink);
  }
}

pub(crate) fn page(ids: &[&str], next_page_token: Option<&str>) -> Page {
  Page {
    comments: ids
      .iter()
      .map(|id| Comment::stub(id, &format!("comment {id}")))
      .collect(),
    next_page_token: next_page_token.map(str::to_string),
  }
}
