use {super::*, tracing_subscriber::EnvFilter};

/// Sends `tracing` output to `path`, since the terminal belongs to the UI.
/// The filter comes from `YTMOD_LOG`, defaulting to `ytmod=info`.
pub(crate) fn init(path: &Path) -> Result {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let file = fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file {}", path.display()))?;

  let filter = EnvFilter::try_from_env("YTMOD_LOG")
    .unwrap_or_else(|_| EnvFilter::new("ytmod=info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .try_init()
    .map_err(|error| anyhow!("could not install log subscriber: {error}"))?;

  info!(path = %path.display(), "logging initialized");

  Ok(())
}
