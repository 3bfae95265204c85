use super::*;

/// How requests reach the upstream APIs. Holds secrets, so it is never
/// printed.
#[derive(Clone)]
pub(crate) enum Backend {
  Direct {
    perspective_api_key: Option<String>,
    youtube_api_key: String,
  },
  Proxy {
    base_url: String,
  },
}

pub(crate) struct Config {
  pub(crate) backend: Backend,
  pub(crate) channel: String,
  pub(crate) comment_page_size: u32,
  pub(crate) log_file: PathBuf,
  pub(crate) resume: bool,
  pub(crate) video: Option<String>,
  pub(crate) video_page_size: u32,
}

impl Backend {
  /// Builds the URL of a proxy route, tolerating a trailing slash on the
  /// base URL.
  pub(crate) fn proxy_url(base_url: &str, route: &str) -> String {
    format!("{}/api/{route}", base_url.trim_end_matches('/'))
  }
}

impl Config {
  pub(crate) fn from_arguments(
    arguments: Arguments,
    session_path: &Path,
  ) -> Result<Self> {
    let backend = match (arguments.proxy_url, arguments.youtube_api_key) {
      (Some(base_url), _) => Backend::Proxy { base_url },
      (None, Some(youtube_api_key)) => Backend::Direct {
        perspective_api_key: arguments.perspective_api_key,
        youtube_api_key,
      },
      (None, None) => {
        return Err(anyhow!(
          "either --proxy-url or --youtube-api-key must be provided"
        ));
      }
    };

    let log_file = arguments
      .log_file
      .unwrap_or_else(|| session_path.with_file_name("ytmod.log"));

    Ok(Self {
      backend,
      channel: arguments.channel,
      comment_page_size: arguments.comment_page_size,
      log_file,
      resume: arguments.resume,
      video: arguments.video,
      video_page_size: arguments.video_page_size,
    })
  }

  /// The video to open on start: an explicit `--video`, or with `--resume`
  /// the one recorded in the session.
  pub(crate) fn initial_video(&self, session: &Session) -> Option<String> {
    if let Some(video) = &self.video {
      return Some(video.clone());
    }

    if !self.resume {
      return None;
    }

    let selected = session.selected_video().map(str::to_string);

    if selected.is_none() {
      warn!("no selected video to resume, comment pipeline not initialized");
    }

    selected
  }

  pub(crate) fn log_redacted(&self) {
    let (backend, perspective) = match &self.backend {
      Backend::Direct {
        perspective_api_key,
        ..
      } => ("direct", perspective_api_key.is_some()),
      Backend::Proxy { .. } => ("proxy", true),
    };

    info!(
      backend,
      perspective,
      channel = %self.channel,
      comment_page_size = self.comment_page_size,
      video_page_size = self.video_page_size,
      log_file = %self.log_file.display(),
      "resolved configuration"
    );
  }
}
