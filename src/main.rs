use {
  anyhow::{Context, anyhow, ensure},
  app::App,
  arguments::{Arguments, Subcommand},
  async_trait::async_trait,
  attribute::Attribute,
  channel::Channel,
  chrono::{DateTime, Utc},
  clap::Parser,
  classification::ClassificationResult,
  command::Command,
  command_dispatch::CommandDispatch,
  comment::{Comment, Reply},
  comment_entry::CommentEntry,
  comment_set::CommentSet,
  comment_sink::{Bucket, CommentSink, ModeratedComment, RenderMode},
  comment_source::CommentSource,
  comment_view::CommentView,
  config::{Backend, Config},
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  cursor::Cursor,
  effect::Effect,
  error::ApiError,
  event::Event,
  help_view::HelpView,
  list_view::ListView,
  mode::Mode,
  moderation_effect::{ModerationEffect, Ticket},
  moderation_event::ModerationEvent,
  moderation_pipeline::{ModerationPipeline, PipelineStatus},
  page::Page,
  perspective_client::PerspectiveClient,
  perspective_response::AnalyzeResponse,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
  },
  reply_input::ReplyInput,
  scroll_controller::{InfiniteScrollController, Viewport},
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::Value,
  session::Session,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::{BTreeMap, HashMap, HashSet, VecDeque},
    env, fs,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  threshold_profile::ThresholdProfile,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  toxicity_classifier::{AttributeScores, TextScorer, ToxicityClassifier},
  tracing::{debug, info, warn},
  transient_message::TransientMessage,
  utils::{
    deserialize_optional_count, format_count, format_number,
    format_published, sanitize_comment, truncate, wrap_text,
  },
  video::{VideoDetails, VideoPage, VideoSummary, watch_url},
  video_view::VideoView,
  youtube_client::YouTubeClient,
};

mod app;
mod arguments;
mod attribute;
mod channel;
mod classification;
mod command;
mod command_dispatch;
mod comment;
mod comment_entry;
mod comment_set;
mod comment_sink;
mod comment_source;
mod comment_view;
mod config;
mod cursor;
mod effect;
mod error;
mod event;
#[cfg(test)]
mod fakes;
mod help_view;
mod list_view;
mod logging;
mod mode;
mod moderation_effect;
mod moderation_event;
mod moderation_pipeline;
mod page;
mod perspective_client;
mod perspective_response;
mod reply_input;
mod scroll_controller;
mod session;
mod state;
mod threshold_profile;
mod toxicity_classifier;
mod transient_message;
mod utils;
mod video;
mod video_view;
mod youtube_client;
mod youtube_response;

const HOME_STATUS: &str =
  "↑/k up • ↓/j down • enter comments • o open video • q/esc quit • ? help";

const VIDEO_STATUS: &str = "↑/k up • ↓/j down • ←/→ tab • enter replies • r reply • o open • R retry • esc back";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_CHANNEL_STATUS: &str = "チャンネル情報を読み込んでいます...";
const LOADING_COMMENTS_STATUS: &str = "コメントを読み込んでいます...";
const LOADING_DETAILS_STATUS: &str = "動画情報を読み込んでいます...";
const LOADING_VIDEOS_STATUS: &str = "動画を読み込んでいます...";

const COMMENT_LOAD_FAILED: &str = "コメントの読み込みに失敗しました";
const NO_COMMENTS_TEXT: &str = "表示できるコメントがありません";
const NO_VIDEOS_TEXT: &str = "動画がありません";
const REPLY_SENT_STATUS: &str = "返信を送信しました";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Videos:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  home    jump to first video
  end     jump to last video
  enter   open the comments of the selected video
  o       open the selected video in your browser
  q       quit ytmod
  esc     quit from the video list
  R       retry loading the channel or videos
  scroll  keep going past the end to load more videos

Comments:
  ← / h   previous tab (filtered / flagged)
  → / l   next tab
  ↑ / k   move selection up
  ↓ / j   move selection down
  enter   show or hide replies
  r       reply to the selected comment
  o       open the selected comment in your browser
  R       retry loading after an error
  esc     return to the video list
  scroll  keep going past the end to load more comments
  ?       toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  let session_path = match &arguments.session_file {
    Some(path) => path.clone(),
    None => Session::default_path()?,
  };

  let mut session =
    Session::load(session_path).context("could not load session")?;

  match arguments.command {
    Some(Subcommand::Login) => {
      session.set_logged_in(true)?;
      println!("Signed in.");
      return Ok(());
    }
    Some(Subcommand::Logout) => {
      session.set_logged_in(false)?;
      println!("Signed out.");
      return Ok(());
    }
    None => {}
  }

  ensure!(
    session.is_logged_in(),
    "not signed in, run `ytmod login` first"
  );

  let config = Config::from_arguments(arguments, session.path())?;

  let initial_video = config.initial_video(&session);

  logging::init(&config.log_file)?;

  config.log_redacted();

  let youtube = YouTubeClient::new(config.backend.clone());

  let classifier =
    ToxicityClassifier::new(PerspectiveClient::new(config.backend.clone()));

  let mut state = State::new(
    config.channel.clone(),
    session,
    config.comment_page_size,
    config.video_page_size,
  );

  state.start(initial_video);

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(youtube, classifier, state);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  info!("ytmod exiting");

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
