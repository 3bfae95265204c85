use {super::*, clap::value_parser};

const DEFAULT_CHANNEL: &str = "UC1H5dv45x2aFKk-6JZLSWIQ";

/// Browse a YouTube channel with AI-moderated comments
#[derive(Parser)]
#[command(name = "ytmod", version, about, long_about = None)]
pub(crate) struct Arguments {
  /// Channel id, or a handle starting with `@`
  #[arg(long, env = "YTMOD_CHANNEL", default_value = DEFAULT_CHANNEL)]
  pub(crate) channel: String,
  #[command(subcommand)]
  pub(crate) command: Option<Subcommand>,
  /// Comments fetched per page
  #[arg(
    long,
    default_value_t = 20,
    value_parser = value_parser!(u32).range(1..=100)
  )]
  pub(crate) comment_page_size: u32,
  /// Where to write logs, defaults to `ytmod.log` next to the session file
  #[arg(long, env = "YTMOD_LOG_FILE")]
  pub(crate) log_file: Option<PathBuf>,
  /// Perspective API key, used without a proxy
  #[arg(long, env = "PERSPECTIVE_API_KEY", hide_env_values = true)]
  pub(crate) perspective_api_key: Option<String>,
  /// Base URL of a proxy that holds the API keys
  #[arg(long, env = "YTMOD_PROXY_URL")]
  pub(crate) proxy_url: Option<String>,
  /// Reopen the last viewed video
  #[arg(long, conflicts_with = "video")]
  pub(crate) resume: bool,
  /// Session file location
  #[arg(long)]
  pub(crate) session_file: Option<PathBuf>,
  /// Open this video's comments on start
  #[arg(long)]
  pub(crate) video: Option<String>,
  /// Videos fetched per page
  #[arg(
    long,
    default_value_t = 10,
    value_parser = value_parser!(u32).range(1..=50)
  )]
  pub(crate) video_page_size: u32,
  /// YouTube Data API key, used without a proxy
  #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
  pub(crate) youtube_api_key: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::Subcommand)]
pub(crate) enum Subcommand {
  /// Mark this machine as signed in
  Login,
  /// Sign out
  Logout,
}
