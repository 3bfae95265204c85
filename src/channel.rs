use super::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Channel {
  pub(crate) custom_url: String,
  pub(crate) id: String,
  pub(crate) subscriber_count: Option<u64>,
  #[allow(dead_code)]
  pub(crate) thumbnail_url: Option<String>,
  pub(crate) title: String,
  pub(crate) video_count: Option<u64>,
}

impl Channel {
  pub(crate) fn handle(&self) -> Option<&str> {
    Some(self.custom_url.as_str()).filter(|url| !url.is_empty())
  }

  pub(crate) fn summary(&self) -> String {
    format!(
      "登録者数 {}人 {}本の動画",
      format_count(self.subscriber_count),
      format_count(self.video_count)
    )
  }
}
