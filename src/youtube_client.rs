use {
  super::*,
  crate::youtube_response::{
    ChannelItem, CommentThreadItem, ListResponse, SearchItem, VideoItem,
  },
};

#[derive(Clone)]
pub(crate) struct YouTubeClient {
  backend: Backend,
  client: reqwest::Client,
}

impl YouTubeClient {
  const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

  /// Looks a channel up by id, or by handle when `channel` starts with `@`.
  pub(crate) async fn fetch_channel(&self, channel: &str) -> Result<Channel> {
    let filter = if channel.starts_with('@') {
      "forHandle"
    } else {
      "id"
    };

    let response = self
      .get::<ListResponse<ChannelItem>>(
        "channels",
        &[("part", "snippet,statistics"), (filter, channel)],
      )
      .await
      .with_context(|| format!("failed to load channel {channel}"))?;

    response
      .items
      .into_iter()
      .next()
      .map(Channel::from)
      .ok_or_else(|| ApiError::NotFound(format!("channel {channel}")).into())
  }

  /// Lists a channel's uploads, newest first, with view counts filled in
  /// from a second statistics lookup.
  pub(crate) async fn fetch_channel_videos(
    &self,
    channel_id: &str,
    page_size: u32,
    page_token: Option<&str>,
  ) -> Result<VideoPage> {
    let max_results = page_size.to_string();

    let mut query = vec![
      ("part", "snippet"),
      ("channelId", channel_id),
      ("type", "video"),
      ("order", "date"),
      ("maxResults", max_results.as_str()),
    ];

    if let Some(token) = page_token {
      query.push(("pageToken", token));
    }

    let search = self
      .get::<ListResponse<SearchItem>>("search", &query)
      .await
      .with_context(|| format!("failed to list videos of {channel_id}"))?;

    let ids = search
      .items
      .iter()
      .filter_map(SearchItem::video_id)
      .collect::<Vec<_>>()
      .join(",");

    let statistics = if ids.is_empty() {
      HashMap::new()
    } else {
      self
        .get::<ListResponse<VideoItem>>(
          "videos",
          &[("part", "statistics"), ("id", ids.as_str())],
        )
        .await
        .context("failed to load video statistics")?
        .items
        .into_iter()
        .map(|item| (item.id, item.statistics))
        .collect()
    };

    Ok(VideoPage {
      next_page_token: search.next_page_token.filter(|token| !token.is_empty()),
      videos: search
        .items
        .into_iter()
        .filter_map(|item| item.into_summary(&statistics))
        .collect(),
    })
  }

  pub(crate) async fn fetch_video_comments(
    &self,
    video_id: &str,
    page_token: Option<&str>,
    page_size: u32,
  ) -> Result<Page> {
    let max_results = page_size.to_string();

    let mut query = vec![
      ("part", "snippet,replies"),
      ("videoId", video_id),
      ("order", "relevance"),
      ("maxResults", max_results.as_str()),
    ];

    if let Some(token) = page_token {
      query.push(("pageToken", token));
    }

    let response = self
      .get::<ListResponse<CommentThreadItem>>("commentThreads", &query)
      .await
      .with_context(|| format!("failed to load comments of {video_id}"))?;

    Ok(Page::from(response))
  }

  pub(crate) async fn fetch_video_details(
    &self,
    video_id: &str,
  ) -> Result<VideoDetails> {
    let response = self
      .get::<ListResponse<VideoItem>>(
        "videos",
        &[("part", "snippet,statistics"), ("id", video_id)],
      )
      .await
      .with_context(|| format!("failed to load video {video_id}"))?;

    response
      .items
      .into_iter()
      .next()
      .map(VideoDetails::from)
      .ok_or_else(|| ApiError::NotFound(format!("video {video_id}")).into())
  }

  async fn get<T: DeserializeOwned>(
    &self,
    resource: &str,
    query: &[(&str, &str)],
  ) -> Result<T, ApiError> {
    let response = self.request(resource, query).send().await?;

    let status = response.status();

    let body = response.text().await?;

    if !status.is_success() {
      return Err(ApiError::status(status.as_u16(), &body));
    }

    Ok(serde_json::from_str(&body)?)
  }

  pub(crate) fn new(backend: Backend) -> Self {
    Self {
      backend,
      client: reqwest::Client::new(),
    }
  }

  fn request(
    &self,
    resource: &str,
    query: &[(&str, &str)],
  ) -> reqwest::RequestBuilder {
    match &self.backend {
      Backend::Direct {
        youtube_api_key, ..
      } => self
        .client
        .get(format!("{}/{resource}", Self::API_BASE_URL))
        .query(query)
        .query(&[("key", youtube_api_key)]),
      Backend::Proxy { base_url } => self
        .client
        .get(Backend::proxy_url(base_url, &format!("youtube/{resource}")))
        .query(query),
    }
  }
}

#[async_trait]
impl CommentSource for YouTubeClient {
  async fn fetch_page(
    &self,
    video_id: &str,
    page_token: Option<&str>,
    page_size: u32,
  ) -> Result<Page> {
    self
      .fetch_video_comments(video_id, page_token, page_size)
      .await
  }
}
