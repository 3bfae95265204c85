use super::*;

const SEVERE_BADGE_SCORE: f64 = 0.7;

pub(crate) struct App {
  classifier: ToxicityClassifier<PerspectiveClient>,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
  youtube: YouTubeClient,
}

impl App {
  fn comment_list_item(
    entry: &CommentEntry,
    available_width: u16,
    now: DateTime<Utc>,
  ) -> ListItem<'static> {
    let indent = if entry.is_reply() {
      format!("{BASE_INDENT}    ")
    } else {
      BASE_INDENT.to_string()
    };

    let mut header = vec![
      Span::raw(indent.clone()),
      Span::styled(entry.header(now), Style::default().fg(Color::White)),
    ];

    for (attribute, score) in &entry.badges {
      let color = if *score > SEVERE_BADGE_SCORE {
        Color::Red
      } else {
        Color::Yellow
      };

      header.push(Span::raw(" "));

      header.push(Span::styled(
        format!("[{attribute}: {:.0}%]", score * 100.0),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ));
    }

    let mut lines = vec![Line::from(header)];

    let wrap_width = usize::from(available_width)
      .saturating_sub(indent.chars().count())
      .max(1);

    for line in wrap_text(&entry.body, wrap_width) {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(line, Style::default().fg(Color::Gray)),
      ]));
    }

    if let Some(label) = entry.replies_label() {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(label, Style::default().fg(Color::Cyan)),
      ]));
    }

    lines.push(Line::from(Span::raw(indent)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(usize::from(layout[1].height));

    if matches!(self.state.mode(), Mode::Home) {
      self.draw_home(frame, layout[0], layout[1]);
    } else {
      self.draw_video(frame, layout[0], layout[1]);
    }

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    self.state.help().draw(frame);
  }

  fn draw_home(
    &mut self,
    frame: &mut Frame,
    header_area: Rect,
    list_area: Rect,
  ) {
    let dim = Style::default().fg(Color::DarkGray);

    let header = match self.state.channel() {
      None => vec![Line::from(Span::styled(LOADING_CHANNEL_STATUS, dim))],
      Some(Ok(channel)) => {
        let mut title = vec![Span::styled(
          channel.title.clone(),
          Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        )];

        if let Some(handle) = channel.handle() {
          title.push(Span::raw(" "));
          title.push(Span::styled(handle.to_string(), dim));
        }

        vec![
          Line::from(title),
          Line::from(Span::styled(channel.summary(), dim)),
        ]
      }
      Some(Err(error)) => vec![Line::from(Span::styled(
        format!("チャンネル情報の読み込みに失敗しました: {error}"),
        Style::default().fg(Color::Red),
      ))],
    };

    frame.render_widget(Paragraph::new(header), header_area);

    let now = Utc::now();

    let videos = self.state.videos();

    let mut items = videos
      .items()
      .iter()
      .map(|video| {
        ListItem::new(vec![
          Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(
              video.title.clone(),
              Style::default().fg(Color::White),
            ),
          ]),
          Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(video.detail(now), dim),
          ]),
          Line::from(Span::raw(BASE_INDENT)),
        ])
      })
      .collect::<Vec<ListItem>>();

    let footer = if self.state.videos_loading() {
      Some(LOADING_VIDEOS_STATUS)
    } else if items.is_empty() && matches!(self.state.channel(), Some(Ok(_))) {
      Some(NO_VIDEOS_TEXT)
    } else {
      None
    };

    if let Some(text) = footer {
      items.push(ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(text, dim),
      ])));
    }

    let mut list_state = ListState::default()
      .with_selected(videos.selected_index())
      .with_offset(videos.offset());

    let list = List::new(items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, list_area, &mut list_state);

    self.state.videos_mut().set_offset(list_state.offset());
  }

  fn draw_video(
    &mut self,
    frame: &mut Frame,
    header_area: Rect,
    list_area: Rect,
  ) {
    let status = self.state.pipeline().status();

    let last_error = self
      .state
      .pipeline()
      .last_error()
      .unwrap_or_default()
      .to_string();

    let now = Utc::now();

    let Mode::Video(view) = self.state.mode_mut() else {
      return;
    };

    let header_layout = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(2), Constraint::Length(1)])
      .split(header_area);

    let dim = Style::default().fg(Color::DarkGray);

    let header = match view.details() {
      None => vec![Line::from(Span::styled(LOADING_DETAILS_STATUS, dim))],
      Some(Ok(details)) => vec![
        Line::from(Span::styled(
          details.title.clone(),
          Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(details.stats(now), dim)),
      ],
      Some(Err(error)) => vec![Line::from(Span::styled(
        format!("動画情報の読み込みに失敗しました: {error}"),
        Style::default().fg(Color::Red),
      ))],
    };

    frame.render_widget(Paragraph::new(header), header_layout[0]);

    let tabs = Tabs::new(view.tab_titles())
      .select(match view.active() {
        Bucket::Flagged => 1,
        Bucket::Safe => 0,
      })
      .style(dim)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .divider(Span::raw(" "));

    frame.render_widget(tabs, header_layout[1]);

    let comments = view.active_view();

    let (visible, selected) = comments.visible_with_selection();

    let mut items = visible
      .iter()
      .filter_map(|&index| comments.entry(index))
      .map(|entry| Self::comment_list_item(entry, list_area.width, now))
      .collect::<Vec<ListItem>>();

    let heights = items.iter().map(ListItem::height).collect::<Vec<usize>>();

    let footer = match status {
      PipelineStatus::Error => Some(Span::styled(
        format!("{COMMENT_LOAD_FAILED}: {last_error} (R で再試行)"),
        Style::default().fg(Color::Red),
      )),
      PipelineStatus::Idle if items.is_empty() => {
        Some(Span::styled(NO_COMMENTS_TEXT, dim))
      }
      PipelineStatus::Idle => None,
      PipelineStatus::Loading => {
        Some(Span::styled(LOADING_COMMENTS_STATUS, dim))
      }
    };

    if let Some(footer) = footer {
      items.push(ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        footer,
      ])));
    }

    let mut list_state = ListState::default()
      .with_selected(selected)
      .with_offset(comments.offset().min(selected.unwrap_or(0)));

    let list = List::new(items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, list_area, &mut list_state);

    let offset = list_state.offset();

    view.active_view_mut().set_offset(offset);

    self.state.observe_viewport(Viewport::from_heights(
      &heights,
      offset,
      usize::from(list_area.height),
    ));
  }

  fn execute_effect(&mut self, effect: Effect) {
    let sender = self.event_tx.clone();

    match effect {
      Effect::FetchChannel { channel } => {
        let youtube = self.youtube.clone();

        self.handle.spawn(async move {
          let _ = sender.send(Event::Channel {
            result: youtube.fetch_channel(&channel).await,
          });
        });
      }
      Effect::FetchChannelVideos {
        channel_id,
        page_size,
        page_token,
        request_id,
      } => {
        let youtube = self.youtube.clone();

        self.handle.spawn(async move {
          let _ = sender.send(Event::ChannelVideos {
            request_id,
            result: youtube
              .fetch_channel_videos(
                &channel_id,
                page_size,
                page_token.as_deref(),
              )
              .await,
          });
        });
      }
      Effect::FetchVideoDetails {
        request_id,
        video_id,
      } => {
        let youtube = self.youtube.clone();

        self.handle.spawn(async move {
          let _ = sender.send(Event::VideoDetails {
            request_id,
            result: youtube.fetch_video_details(&video_id).await,
          });
        });
      }
      Effect::Moderation(effect) => {
        let (youtube, classifier) =
          (self.youtube.clone(), self.classifier.clone());

        self.handle.spawn(async move {
          let _ = sender.send(Event::Moderation(
            effect.run(&youtube, &classifier).await,
          ));
        });
      }
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self.state.set_transient_message(format!(
            "Opened in browser: {}",
            truncate(&url, 80)
          ));
        }
        Err(error) => {
          warn!(url = %url, error = %error, "could not open browser");

          self
            .state
            .set_transient_message(format!("Could not open link: {error}"));
        }
      },
    }
  }

  fn execute_pending_effects(&mut self) {
    for effect in self.state.take_effects() {
      self.execute_effect(effect);
    }
  }

  pub(crate) fn new(
    youtube: YouTubeClient,
    classifier: ToxicityClassifier<PerspectiveClient>,
    state: State,
  ) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      classifier,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
      youtube,
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }

    self.execute_pending_effects();
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      self.execute_pending_effects();

      if !crossterm_event::poll(Duration::from_millis(200))? {
        self.process_pending_events();
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        self.process_pending_events();
        continue;
      };

      if key.kind != KeyEventKind::Press {
        self.process_pending_events();
        continue;
      }

      let command = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else if let Some(command) = self.state.reply_input_command(key) {
        command
      } else {
        let page = self.state.list_height().max(1);
        self.state.mode_mut().handle_key(key, page)
      };

      match self.state.dispatch_command(command) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }

          self.process_pending_events();
        }
        Err(error) => {
          self.state.clear_pending_effects();
          self.state.set_transient_message(format!("error: {error}"));
          self.process_pending_events();
        }
      }
    }

    Ok(())
  }
}
