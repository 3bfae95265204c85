use super::*;

#[derive(Clone)]
pub(crate) struct PerspectiveClient {
  backend: Backend,
  client: reqwest::Client,
}

impl PerspectiveClient {
  const ANALYZE_URL: &str =
    "https://commentanalyzer.googleapis.com/v1alpha1/comments:analyze";

  async fn analyze(&self, text: &str) -> Result<AnalyzeResponse, ApiError> {
    let response = self.request(text)?.send().await?;

    let status = response.status();

    let body = response.text().await?;

    if !status.is_success() {
      return Err(ApiError::status(status.as_u16(), &body));
    }

    Ok(serde_json::from_str(&body)?)
  }

  fn direct_body(text: &str) -> Value {
    let requested = Attribute::ALL
      .iter()
      .map(|attribute| (attribute.name().to_string(), serde_json::json!({})))
      .collect::<serde_json::Map<_, _>>();

    serde_json::json!({
      "comment": { "text": text },
      "requestedAttributes": requested,
    })
  }

  pub(crate) fn new(backend: Backend) -> Self {
    Self {
      backend,
      client: reqwest::Client::new(),
    }
  }

  fn request(&self, text: &str) -> Result<reqwest::RequestBuilder, ApiError> {
    match &self.backend {
      Backend::Direct {
        perspective_api_key: Some(key),
        ..
      } => Ok(
        self
          .client
          .post(Self::ANALYZE_URL)
          .query(&[("key", key)])
          .json(&Self::direct_body(text)),
      ),
      Backend::Direct {
        perspective_api_key: None,
        ..
      } => Err(ApiError::MissingApiKey("Perspective")),
      Backend::Proxy { base_url } => Ok(
        self
          .client
          .post(Backend::proxy_url(base_url, "perspective/analyze"))
          .json(&serde_json::json!({ "text": text })),
      ),
    }
  }
}

#[async_trait]
impl TextScorer for PerspectiveClient {
  async fn score_text(&self, text: &str) -> Result<AttributeScores> {
    Ok(self.analyze(text).await?.into_scores())
  }
}
