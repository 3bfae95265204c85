/// A top-level comment thread as fetched, with its replies inlined.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Comment {
  #[allow(dead_code)]
  pub(crate) author_avatar_url: String,
  pub(crate) author_name: String,
  pub(crate) id: String,
  pub(crate) like_count: u64,
  pub(crate) published_at: String,
  pub(crate) replies: Vec<Reply>,
  pub(crate) reply_count: u64,
  pub(crate) text: String,
  /// Unformatted text, the input to classification.
  pub(crate) text_original: String,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Reply {
  #[allow(dead_code)]
  pub(crate) author_avatar_url: String,
  pub(crate) author_name: String,
  pub(crate) id: String,
  pub(crate) like_count: u64,
  pub(crate) published_at: String,
  pub(crate) text: String,
  #[allow(dead_code)]
  pub(crate) text_original: String,
}

#[cfg(test)]
impl Comment {
  pub(crate) fn stub(id: &str, text: &str) -> Self {
    Self {
      author_avatar_url: format!("https://yt3.example/{id}.jpg"),
      author_name: format!("user-{id}"),
      id: id.to_string(),
      like_count: 0,
      published_at: "1日前".to_string(),
      replies: Vec::new(),
      reply_count: 0,
      text: text.to_string(),
      text_original: text.to_string(),
    }
  }
}
