use super::*;

/// What the scroll controller last saw: the tab, its viewport, and whether
/// the pipeline was idle.
type Observation = (Bucket, Viewport, bool);

pub(crate) struct State {
  channel: Option<Result<Channel, String>>,
  channel_query: String,
  details_request: Option<u64>,
  help: HelpView,
  last_observation: Option<Observation>,
  list_height: usize,
  message: String,
  mode: Mode,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  pending_selection: Option<usize>,
  pipeline: ModerationPipeline,
  reply_input: Option<ReplyInput>,
  scroll: InfiniteScrollController,
  session: Session,
  transient_message: Option<TransientMessage>,
  video_cursor: Cursor,
  video_page_size: u32,
  video_request: Option<u64>,
  videos: ListView<VideoSummary>,
}

impl State {
  fn back(&mut self) {
    if !matches!(self.mode, Mode::Video(_)) {
      return;
    }

    self.pipeline.clear();
    self.mode = Mode::Home;
    self.details_request = None;
    self.last_observation = None;
    self.reply_input = None;

    self.set_status(HOME_STATUS);
  }

  fn cancel_reply(&mut self) {
    if let Some(input) = self.reply_input.take() {
      self.message = input.message_backup;
    }
  }

  pub(crate) fn channel(&self) -> Option<&Result<Channel, String>> {
    self.channel.as_ref()
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    let mut should_exit = false;

    match command {
      Command::Back => self.back(),
      Command::CancelReply => self.cancel_reply(),
      Command::HideHelp => {
        let fallback = self.mode_status();
        self.help.hide(&mut self.message, fallback);
      }
      Command::None => {}
      Command::OpenInBrowser => self.open_in_browser(),
      Command::OpenVideo => self.open_selected_video(),
      Command::PageDown => {
        let target = self.selected_video().saturating_add(self.page_jump());
        self.select_video(target);
      }
      Command::PageUp => {
        let target = self.selected_video().saturating_sub(self.page_jump());
        self.select_video(target);
      }
      Command::Quit => should_exit = true,
      Command::Retry => self.retry(),
      Command::SelectFirst => self.select_video(0),
      Command::SelectLast => {
        if let Some(last) = self.videos.last_index() {
          self.select_video(last);
        }
      }
      Command::SelectNext => {
        self.select_video(self.selected_video().saturating_add(1));
      }
      Command::SelectPrevious => {
        self.select_video(self.selected_video().saturating_sub(1));
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::StartReply => self.start_reply(),
      Command::SubmitReply => self.submit_reply(),
    }

    Ok(CommandDispatch {
      effects: self.take_effects(),
      should_exit,
    })
  }

  fn fetch_channel(&mut self) {
    self.channel = None;

    self.set_status(LOADING_CHANNEL_STATUS);

    self.pending_effects.push(Effect::FetchChannel {
      channel: self.channel_query.clone(),
    });
  }

  fn fetch_more_videos(&mut self) {
    if self.video_request.is_some() || self.video_cursor.is_exhausted() {
      return;
    }

    let Some(Ok(channel)) = &self.channel else {
      return;
    };

    let channel_id = channel.id.clone();

    let request_id = self.next_request_id();

    self.video_request = Some(request_id);

    self.set_status(LOADING_VIDEOS_STATUS);

    self.pending_effects.push(Effect::FetchChannelVideos {
      channel_id,
      page_size: self.video_page_size,
      page_token: self.video_cursor.page_token().map(str::to_string),
      request_id,
    });
  }

  fn handle_channel(&mut self, result: Result<Channel>) {
    match result {
      Ok(channel) => {
        info!(
          channel_id = %channel.id,
          title = %channel.title,
          "loaded channel"
        );

        self.channel = Some(Ok(channel));
        self.video_cursor = Cursor::Start;
        self.videos = ListView::default();

        self.set_status(HOME_STATUS);

        self.fetch_more_videos();
      }
      Err(error) => {
        let error = format!("{error:#}");

        warn!(error = %error, "channel fetch failed");

        self.channel = Some(Err(error.clone()));

        self.set_transient_message(format!(
          "チャンネル情報の読み込みに失敗しました: {error}"
        ));
      }
    }
  }

  fn handle_channel_videos(
    &mut self,
    request_id: u64,
    result: Result<VideoPage>,
  ) {
    if self.video_request != Some(request_id) {
      debug!(request_id, "dropping stale video page");
      return;
    }

    self.video_request = None;

    let target = self.pending_selection.take();

    match result {
      Ok(page) => {
        debug!(count = page.videos.len(), "loaded video page");

        self.video_cursor = Cursor::after(page.next_page_token);
        self.videos.extend(page.videos);

        if let Some(target) = target {
          self.videos.set_selected(target);
        }

        self.set_status(HOME_STATUS);
      }
      Err(error) => {
        let error = format!("{error:#}");

        warn!(error = %error, "video list fetch failed");

        self.set_transient_message(format!(
          "動画の読み込みに失敗しました: {error}"
        ));
      }
    }
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Channel { result } => self.handle_channel(result),
      Event::ChannelVideos { request_id, result } => {
        self.handle_channel_videos(request_id, result);
      }
      Event::Moderation(event) => self.handle_moderation(event),
      Event::VideoDetails { request_id, result } => {
        self.handle_video_details(request_id, result);
      }
    }
  }

  fn handle_moderation(&mut self, event: ModerationEvent) {
    let Mode::Video(view) = &mut self.mode else {
      debug!("dropping moderation event outside the video screen");
      return;
    };

    let next = self.pipeline.handle_event(event, view);

    let errors = view.take_reported_errors();

    if let Some(effect) = next {
      self.pending_effects.push(Effect::Moderation(effect));
    }

    for error in errors {
      self.set_transient_message(format!("{COMMENT_LOAD_FAILED}: {error}"));
    }
  }

  fn handle_reply_key(&mut self, key: KeyEvent) -> Command {
    let Some(input) = self.reply_input.as_mut() else {
      return Command::None;
    };

    match key.code {
      KeyCode::Esc => return Command::CancelReply,
      KeyCode::Enter => return Command::SubmitReply,
      KeyCode::Backspace => {
        input.buffer.pop();
      }
      KeyCode::Char(ch)
        if !key
          .modifiers
          .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
      {
        input.buffer.push(ch);
      }
      _ => return Command::None,
    }

    self.message = truncate(&input.prompt(), 80);

    Command::None
  }

  fn handle_video_details(
    &mut self,
    request_id: u64,
    result: Result<VideoDetails>,
  ) {
    if self.details_request != Some(request_id) {
      debug!(request_id, "dropping stale video details");
      return;
    }

    self.details_request = None;

    let Mode::Video(view) = &mut self.mode else {
      return;
    };

    let details = result.map_err(|error| {
      let error = format!("{error:#}");
      warn!(
        video_id = %view.video_id(),
        error = %error,
        "video details fetch failed"
      );
      error
    });

    view.set_details(details);
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn list_height(&self) -> usize {
    self.list_height
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode(&self) -> &Mode {
    &self.mode
  }

  pub(crate) fn mode_mut(&mut self) -> &mut Mode {
    &mut self.mode
  }

  fn mode_status(&self) -> &'static str {
    match self.mode {
      Mode::Home => HOME_STATUS,
      Mode::Video(_) => VIDEO_STATUS,
    }
  }

  pub(crate) fn new(
    channel_query: String,
    session: Session,
    comment_page_size: u32,
    video_page_size: u32,
  ) -> Self {
    Self {
      channel: None,
      channel_query,
      details_request: None,
      help: HelpView::new(),
      last_observation: None,
      list_height: 0,
      message: HOME_STATUS.into(),
      mode: Mode::Home,
      next_request_id: 0,
      pending_effects: Vec::new(),
      pending_selection: None,
      pipeline: ModerationPipeline::new(comment_page_size),
      reply_input: None,
      scroll: InfiniteScrollController::default(),
      session,
      transient_message: None,
      video_cursor: Cursor::Start,
      video_page_size,
      video_request: None,
      videos: ListView::default(),
    }
  }

  fn next_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    request_id
  }

  /// Feeds the rendered viewport of the active tab to the scroll
  /// controller. Only a changed viewport, tab, or a return to idle counts as
  /// a new visibility event, so a failed load is not retried on its own.
  pub(crate) fn observe_viewport(&mut self, viewport: Viewport) {
    let Mode::Video(view) = &self.mode else {
      return;
    };

    let observation = (
      view.active(),
      viewport,
      self.pipeline.status() == PipelineStatus::Idle,
    );

    if self.last_observation == Some(observation) {
      return;
    }

    self.last_observation = Some(observation);

    if let Some(effect) = self.scroll.observe(viewport, &mut self.pipeline) {
      self.pending_effects.push(Effect::Moderation(effect));
    }
  }

  fn open_in_browser(&mut self) {
    let url = match &self.mode {
      Mode::Home => self.videos.selected_item().map(VideoSummary::url),
      Mode::Video(view) => Some(view.selected_permalink()),
    };

    if let Some(url) = url {
      self.pending_effects.push(Effect::OpenUrl { url });
    }
  }

  fn open_selected_video(&mut self) {
    if let Some(video) = self.videos.selected_item() {
      let video_id = video.id.clone();
      self.open_video(video_id);
    }
  }

  /// Switches to the comments of `video_id` and starts loading them.
  pub(crate) fn open_video(&mut self, video_id: String) {
    if let Err(error) = self.session.set_selected_video(&video_id) {
      warn!(
        video_id = %video_id,
        error = %format!("{error:#}"),
        "could not persist selected video"
      );
    }

    let mut view = VideoView::new(video_id.clone());

    self.pipeline.switch_video(&video_id, &mut view);

    let request_id = self.next_request_id();

    self.details_request = Some(request_id);

    self.pending_effects.push(Effect::FetchVideoDetails {
      request_id,
      video_id,
    });

    if let Some(effect) = self.pipeline.load_next_page() {
      self.pending_effects.push(Effect::Moderation(effect));
    }

    self.mode = Mode::Video(view);
    self.last_observation = None;
    self.reply_input = None;

    self.set_status(VIDEO_STATUS);
  }

  fn page_jump(&self) -> usize {
    self.list_height.saturating_sub(1).max(1)
  }

  pub(crate) fn pipeline(&self) -> &ModerationPipeline {
    &self.pipeline
  }

  pub(crate) fn reply_input_command(
    &mut self,
    key: KeyEvent,
  ) -> Option<Command> {
    self
      .reply_input
      .is_some()
      .then(|| self.handle_reply_key(key))
  }

  fn retry(&mut self) {
    match &self.mode {
      Mode::Home => {
        if matches!(self.channel, Some(Err(_))) {
          self.fetch_channel();
        } else {
          self.fetch_more_videos();
        }
      }
      Mode::Video(view) => {
        if matches!(view.details(), Some(Err(_))) {
          let video_id = view.video_id().to_string();

          let request_id = self.next_request_id();

          self.details_request = Some(request_id);

          self.pending_effects.push(Effect::FetchVideoDetails {
            request_id,
            video_id,
          });
        }

        if self.pipeline.status() != PipelineStatus::Error {
          return;
        }

        if let Some(effect) = self.pipeline.load_next_page() {
          self.set_status(LOADING_COMMENTS_STATUS);
          self.pending_effects.push(Effect::Moderation(effect));
        }
      }
    }
  }

  fn select_video(&mut self, target: usize) {
    if !matches!(self.mode, Mode::Home) {
      return;
    }

    if target >= self.videos.len() && self.video_cursor.has_continuation() {
      self.pending_selection = Some(target);
      self.fetch_more_videos();
    }

    self.videos.set_selected(target);
  }

  fn selected_video(&self) -> usize {
    self.videos.selected_index().unwrap_or(0)
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  fn set_status(&mut self, status: &str) {
    if !self.help.is_visible() && self.reply_input.is_none() {
      self.message = status.into();
    }
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), original, Instant::now()));

    self.message = message;
  }

  /// Queues the initial loads: the channel, and `video` if one should open
  /// straight away.
  pub(crate) fn start(&mut self, video: Option<String>) {
    self.fetch_channel();

    if let Some(video) = video {
      self.open_video(video);
    }
  }

  fn start_reply(&mut self) {
    if self.reply_input.is_some() {
      return;
    }

    let Mode::Video(view) = &self.mode else {
      return;
    };

    let Some(entry) = view.active_view().selected_entry() else {
      return;
    };

    let input = ReplyInput::new(entry.id.clone(), self.message.clone());

    self.message = input.prompt();
    self.reply_input = Some(input);
  }

  fn submit_reply(&mut self) {
    let Some(input) = self.reply_input.take() else {
      return;
    };

    self.message = input.message_backup;

    if input.buffer.trim().is_empty() {
      return;
    }

    info!(
      comment_id = %input.comment_id,
      length = input.buffer.chars().count(),
      "simulated reply"
    );

    self.set_transient_message(REPLY_SENT_STATUS.into());
  }

  pub(crate) fn take_effects(&mut self) -> Vec<Effect> {
    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn update_transient_message(&mut self) {
    let Some(transient) = &self.transient_message else {
      return;
    };

    if self.message != transient.current() {
      self.transient_message = None;
    } else if transient.is_expired(Instant::now()) {
      self.message = transient.original().to_string();
      self.transient_message = None;
    }
  }

  pub(crate) fn videos(&self) -> &ListView<VideoSummary> {
    &self.videos
  }

  pub(crate) fn videos_loading(&self) -> bool {
    self.video_request.is_some()
  }

  pub(crate) fn videos_mut(&mut self) -> &mut ListView<VideoSummary> {
    &mut self.videos
  }
}
