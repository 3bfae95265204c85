use thiserror::Error;

/// Failures talking to the YouTube Data or Perspective APIs.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
  #[error("no API key configured for {0}")]
  MissingApiKey(&'static str),
  #[error("network error: {0}")]
  Network(String),
  #[error("{0} not found")]
  NotFound(String),
  #[error("failed to parse response: {0}")]
  Parse(String),
  #[error("API error (status {status}): {message}")]
  Status { message: String, status: u16 },
}

impl From<reqwest::Error> for ApiError {
  fn from(error: reqwest::Error) -> Self {
    ApiError::Network(error.to_string())
  }
}

impl From<serde_json::Error> for ApiError {
  fn from(error: serde_json::Error) -> Self {
    ApiError::Parse(error.to_string())
  }
}

impl ApiError {
  /// Builds a status error from a failed response body, preferring the
  /// upstream `error.message` field when present.
  pub(crate) fn status(status: u16, body: &str) -> Self {
    let message = serde_json::from_str::<serde_json::Value>(body)
      .ok()
      .and_then(|value| {
        value
          .pointer("/error/message")
          .or_else(|| value.get("error"))
          .and_then(serde_json::Value::as_str)
          .map(str::to_string)
      })
      .unwrap_or_else(|| body.trim().to_string());

    ApiError::Status { message, status }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_prefers_upstream_error_message() {
    let error = ApiError::status(
      403,
      r#"{"error": {"code": 403, "message": "quotaExceeded"}}"#,
    );

    assert_eq!(error.to_string(), "API error (status 403): quotaExceeded");
  }

  #[test]
  fn status_accepts_proxy_error_shape() {
    let error = ApiError::status(
      500,
      r#"{"error": "Perspective API key not configured"}"#,
    );

    assert_eq!(
      error.to_string(),
      "API error (status 500): Perspective API key not configured"
    );
  }

  #[test]
  fn status_falls_back_to_raw_body() {
    let error = ApiError::status(502, " Bad Gateway\n");

    assert_eq!(error.to_string(), "API error (status 502): Bad Gateway");
  }
}
