use super::*;

pub(crate) enum Event {
  Channel {
    result: Result<Channel>,
  },
  ChannelVideos {
    request_id: u64,
    result: Result<VideoPage>,
  },
  Moderation(ModerationEvent),
  VideoDetails {
    request_id: u64,
    result: Result<VideoDetails>,
  },
}
