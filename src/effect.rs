use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
  FetchChannel {
    channel: String,
  },
  FetchChannelVideos {
    channel_id: String,
    page_size: u32,
    page_token: Option<String>,
    request_id: u64,
  },
  FetchVideoDetails {
    request_id: u64,
    video_id: String,
  },
  Moderation(ModerationEffect),
  OpenUrl {
    url: String,
  },
}
