use super::*;

#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
struct SessionData {
  logged_in: bool,
  selected_video: Option<String>,
}

/// The only durable state: a login flag and the last opened video.
#[derive(Debug)]
pub(crate) struct Session {
  data: SessionData,
  path: PathBuf,
}

impl Session {
  pub(crate) fn default_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("YTMOD_SESSION_FILE") {
      return Ok(PathBuf::from(path));
    }

    let base_dir = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
      PathBuf::from(dir)
    } else if let Ok(home) = env::var("HOME") {
      PathBuf::from(home).join(".config")
    } else {
      env::current_dir()?.join(".config")
    };

    Ok(base_dir.join("ytmod").join("session.json"))
  }

  pub(crate) fn is_logged_in(&self) -> bool {
    self.data.logged_in
  }

  pub(crate) fn load(path: PathBuf) -> Result<Self> {
    let data = match fs::read(&path) {
      Ok(bytes) if bytes.is_empty() => SessionData::default(),
      Ok(bytes) => serde_json::from_slice(&bytes).with_context(|| {
        format!("invalid session file {}", path.display())
      })?,
      Err(error) if error.kind() == io::ErrorKind::NotFound => {
        SessionData::default()
      }
      Err(error) => {
        return Err(error).with_context(|| {
          format!("could not read session file {}", path.display())
        });
      }
    };

    Ok(Self { data, path })
  }

  pub(crate) fn path(&self) -> &Path {
    &self.path
  }

  fn persist(&self) -> Result {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }

    fs::write(&self.path, serde_json::to_vec_pretty(&self.data)?)
      .with_context(|| {
        format!("could not write session file {}", self.path.display())
      })
  }

  pub(crate) fn selected_video(&self) -> Option<&str> {
    self.data.selected_video.as_deref()
  }

  pub(crate) fn set_logged_in(&mut self, logged_in: bool) -> Result {
    self.data.logged_in = logged_in;
    self.persist()
  }

  pub(crate) fn set_selected_video(&mut self, video_id: &str) -> Result {
    if self.selected_video() == Some(video_id) {
      return Ok(());
    }

    self.data.selected_video = Some(video_id.to_string());
    self.persist()
  }
}
