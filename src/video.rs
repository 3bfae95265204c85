use super::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct VideoDetails {
  pub(crate) comment_count: Option<u64>,
  pub(crate) id: String,
  pub(crate) like_count: Option<u64>,
  pub(crate) published_at: String,
  #[allow(dead_code)]
  pub(crate) thumbnail_url: Option<String>,
  pub(crate) title: String,
  pub(crate) view_count: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct VideoPage {
  pub(crate) next_page_token: Option<String>,
  pub(crate) videos: Vec<VideoSummary>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct VideoSummary {
  pub(crate) id: String,
  pub(crate) published_at: String,
  #[allow(dead_code)]
  pub(crate) thumbnail_url: Option<String>,
  pub(crate) title: String,
  pub(crate) view_count: Option<u64>,
}

impl VideoDetails {
  pub(crate) fn stats(&self, now: DateTime<Utc>) -> String {
    format!(
      "{}回視聴 • 高評価 {} • コメント {} • {}",
      format_count(self.view_count),
      format_count(self.like_count),
      format_count(self.comment_count),
      format_published(&self.published_at, now)
    )
  }
}

impl VideoSummary {
  pub(crate) fn detail(&self, now: DateTime<Utc>) -> String {
    format!(
      "{}回視聴 {}",
      format_count(self.view_count),
      format_published(&self.published_at, now)
    )
  }

  pub(crate) fn url(&self) -> String {
    watch_url(&self.id)
  }
}

pub(crate) fn watch_url(video_id: &str) -> String {
  format!("https://www.youtube.com/watch?v={video_id}")
}
