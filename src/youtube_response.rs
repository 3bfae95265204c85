use super::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelItem {
  id: String,
  snippet: ChannelSnippet,
  #[serde(default)]
  statistics: Statistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelSnippet {
  #[serde(default)]
  custom_url: String,
  #[serde(default)]
  thumbnails: Thumbnails,
  title: String,
}

#[derive(Debug, Deserialize)]
struct CommentResource {
  id: String,
  snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadItem {
  #[serde(default)]
  replies: Option<ReplyList>,
  snippet: ThreadSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CommentSnippet {
  author_display_name: String,
  author_profile_image_url: String,
  like_count: u64,
  published_at: String,
  text_display: String,
  text_original: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse<T> {
  #[serde(default = "Vec::new")]
  pub(crate) items: Vec<T>,
  #[serde(default)]
  pub(crate) next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyList {
  #[serde(default)]
  comments: Vec<CommentResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchId {
  #[serde(default)]
  video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
  id: SearchId,
  #[serde(default)]
  snippet: VideoSnippet,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statistics {
  #[serde(default, deserialize_with = "deserialize_optional_count")]
  comment_count: Option<u64>,
  #[serde(default, deserialize_with = "deserialize_optional_count")]
  like_count: Option<u64>,
  #[serde(default, deserialize_with = "deserialize_optional_count")]
  subscriber_count: Option<u64>,
  #[serde(default, deserialize_with = "deserialize_optional_count")]
  video_count: Option<u64>,
  #[serde(default, deserialize_with = "deserialize_optional_count")]
  view_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
  top_level_comment: CommentResource,
  #[serde(default)]
  total_reply_count: u64,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
  url: String,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
  #[serde(default)]
  default: Option<Thumbnail>,
  #[serde(default)]
  high: Option<Thumbnail>,
  #[serde(default)]
  medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoItem {
  pub(crate) id: String,
  #[serde(default)]
  snippet: VideoSnippet,
  #[serde(default)]
  pub(crate) statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct VideoSnippet {
  published_at: String,
  thumbnails: Thumbnails,
  title: String,
}

impl From<ChannelItem> for Channel {
  fn from(item: ChannelItem) -> Self {
    Self {
      custom_url: item.snippet.custom_url,
      id: item.id,
      subscriber_count: item.statistics.subscriber_count,
      thumbnail_url: item.snippet.thumbnails.medium_or_default(),
      title: item.snippet.title,
      video_count: item.statistics.video_count,
    }
  }
}

impl From<CommentResource> for Reply {
  fn from(resource: CommentResource) -> Self {
    let snippet = resource.snippet;

    Self {
      author_avatar_url: snippet.author_profile_image_url,
      author_name: snippet.author_display_name,
      id: resource.id,
      like_count: snippet.like_count,
      published_at: snippet.published_at,
      text: snippet.text_display,
      text_original: snippet.text_original,
    }
  }
}

impl From<CommentThreadItem> for Comment {
  fn from(item: CommentThreadItem) -> Self {
    let CommentResource { id, snippet } = item.snippet.top_level_comment;

    Self {
      author_avatar_url: snippet.author_profile_image_url,
      author_name: snippet.author_display_name,
      id,
      like_count: snippet.like_count,
      published_at: snippet.published_at,
      replies: item
        .replies
        .unwrap_or_default()
        .comments
        .into_iter()
        .map(Reply::from)
        .collect(),
      reply_count: item.snippet.total_reply_count,
      text: snippet.text_display,
      text_original: snippet.text_original,
    }
  }
}

impl From<ListResponse<CommentThreadItem>> for Page {
  fn from(response: ListResponse<CommentThreadItem>) -> Self {
    Self {
      comments: response.items.into_iter().map(Comment::from).collect(),
      next_page_token: response.next_page_token,
    }
  }
}

impl From<VideoItem> for VideoDetails {
  fn from(item: VideoItem) -> Self {
    Self {
      comment_count: item.statistics.comment_count,
      id: item.id,
      like_count: item.statistics.like_count,
      published_at: item.snippet.published_at,
      thumbnail_url: item.snippet.thumbnails.largest(),
      title: item.snippet.title,
      view_count: item.statistics.view_count,
    }
  }
}

impl SearchItem {
  /// Joins a search hit with its statistics. Hits that are not videos are
  /// skipped.
  pub(crate) fn into_summary(
    self,
    statistics: &HashMap<String, Statistics>,
  ) -> Option<VideoSummary> {
    let id = self.id.video_id?;

    let view_count = statistics.get(&id).and_then(|stats| stats.view_count);

    Some(VideoSummary {
      id,
      published_at: self.snippet.published_at,
      thumbnail_url: self.snippet.thumbnails.medium_or_default(),
      title: self.snippet.title,
      view_count,
    })
  }

  pub(crate) fn video_id(&self) -> Option<&str> {
    self.id.video_id.as_deref()
  }
}

impl Thumbnails {
  fn largest(self) -> Option<String> {
    self
      .high
      .or(self.medium)
      .or(self.default)
      .map(|thumbnail| thumbnail.url)
  }

  fn medium_or_default(self) -> Option<String> {
    self.medium.or(self.default).map(|thumbnail| thumbnail.url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn comment_thread_inlines_replies() {
    let response = serde_json::from_str::<ListResponse<CommentThreadItem>>(
      r#"{
        "nextPageToken": "tok1",
        "items": [{
          "id": "thread-1",
          "snippet": {
            "totalReplyCount": 2,
            "topLevelComment": {
              "id": "c1",
              "snippet": {
                "authorDisplayName": "@alice",
                "authorProfileImageUrl": "https://yt3.example/a.jpg",
                "likeCount": 7,
                "publishedAt": "2024-06-01T00:00:00Z",
                "textDisplay": "great &amp; fun<br>video",
                "textOriginal": "great & fun\nvideo"
              }
            }
          },
          "replies": {
            "comments": [{
              "id": "c1.r1",
              "snippet": {
                "authorDisplayName": "@bob",
                "textDisplay": "agreed",
                "textOriginal": "agreed"
              }
            }]
          }
        }]
      }"#,
    )
    .unwrap();

    let page = Page::from(response);

    assert_eq!(page.next_page_token.as_deref(), Some("tok1"));
    assert_eq!(page.comments.len(), 1);

    let comment = &page.comments[0];

    assert_eq!(comment.id, "c1");
    assert_eq!(comment.author_name, "@alice");
    assert_eq!(comment.like_count, 7);
    assert_eq!(comment.reply_count, 2);
    assert_eq!(comment.text_original, "great & fun\nvideo");
    assert_eq!(comment.replies.len(), 1);
    assert_eq!(comment.replies[0].id, "c1.r1");
    assert_eq!(comment.replies[0].like_count, 0);
  }

  #[test]
  fn last_comment_page_has_no_token() {
    let response = serde_json::from_str::<ListResponse<CommentThreadItem>>(
      r#"{"items": []}"#,
    )
    .unwrap();

    assert_eq!(Page::from(response), Page::default());
  }

  #[test]
  fn channel_counts_arrive_as_strings() {
    let response = serde_json::from_str::<ListResponse<ChannelItem>>(
      r#"{
        "items": [{
          "id": "UC123",
          "snippet": {
            "title": "Example",
            "customUrl": "@example",
            "thumbnails": {"default": {"url": "https://yt3.example/d.jpg"}}
          },
          "statistics": {
            "subscriberCount": "12345",
            "hiddenSubscriberCount": false,
            "videoCount": "42"
          }
        }]
      }"#,
    )
    .unwrap();

    let channel = Channel::from(response.items.into_iter().next().unwrap());

    assert_eq!(channel.id, "UC123");
    assert_eq!(channel.subscriber_count, Some(12345));
    assert_eq!(channel.video_count, Some(42));
    assert_eq!(
      channel.thumbnail_url.as_deref(),
      Some("https://yt3.example/d.jpg")
    );
  }

  #[test]
  fn search_hits_join_statistics_by_id() {
    let response = serde_json::from_str::<ListResponse<SearchItem>>(
      r#"{
        "items": [
          {"id": {"videoId": "v1"}, "snippet": {"title": "First"}},
          {"id": {"channelId": "UC123"}, "snippet": {"title": "Channel"}},
          {"id": {"videoId": "v2"}, "snippet": {"title": "Second"}}
        ]
      }"#,
    )
    .unwrap();

    let statistics = HashMap::from([(
      "v1".to_string(),
      Statistics {
        view_count: Some(100),
        ..Statistics::default()
      },
    )]);

    let videos = response
      .items
      .into_iter()
      .filter_map(|item| item.into_summary(&statistics))
      .collect::<Vec<_>>();

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].view_count, Some(100));
    assert_eq!(videos[1].id, "v2");
    assert_eq!(videos[1].view_count, None);
  }

  #[test]
  fn video_details_prefer_high_thumbnail() {
    let item = serde_json::from_str::<VideoItem>(
      r#"{
        "id": "v1",
        "snippet": {
          "title": "First",
          "publishedAt": "2024-06-01T00:00:00Z",
          "thumbnails": {
            "medium": {"url": "https://i.ytimg.example/m.jpg"},
            "high": {"url": "https://i.ytimg.example/h.jpg"}
          }
        },
        "statistics": {"viewCount": "10", "likeCount": 3}
      }"#,
    )
    .unwrap();

    let details = VideoDetails::from(item);

    assert_eq!(details.view_count, Some(10));
    assert_eq!(details.like_count, Some(3));
    assert_eq!(details.comment_count, None);
    assert_eq!(
      details.thumbnail_url.as_deref(),
      Some("https://i.ytimg.example/h.jpg")
    );
  }
}
