use super::*;

/// One row of a comment list: a top-level comment or one of its replies.
pub(crate) struct CommentEntry {
  pub(crate) author: String,
  pub(crate) badges: Vec<(Attribute, f64)>,
  pub(crate) body: String,
  pub(crate) children: Vec<usize>,
  pub(crate) expanded: bool,
  pub(crate) id: String,
  pub(crate) like_count: u64,
  pub(crate) parent: Option<usize>,
  pub(crate) published_at: String,
  pub(crate) reply_count: u64,
}

impl CommentEntry {
  pub(crate) fn has_replies(&self) -> bool {
    !self.children.is_empty()
  }

  pub(crate) fn header(&self, now: DateTime<Utc>) -> String {
    let author = if self.author.is_empty() {
      "unknown"
    } else {
      self.author.as_str()
    };

    let published = format_published(&self.published_at, now);

    if self.like_count == 0 {
      format!("{author} • {published}")
    } else {
      format!(
        "{author} • {published} • 👍 {}",
        format_number(self.like_count)
      )
    }
  }

  pub(crate) fn is_reply(&self) -> bool {
    self.parent.is_some()
  }

  pub(crate) fn permalink(&self, video_id: &str) -> String {
    format!("{}&lc={}", watch_url(video_id), self.id)
  }

  pub(crate) fn replies_label(&self) -> Option<String> {
    if !self.has_replies() {
      return None;
    }

    if self.expanded {
      return Some("返信を非表示".into());
    }

    let inlined = u64::try_from(self.children.len()).unwrap_or(u64::MAX);

    Some(format!("返信を表示 ({}件)", self.reply_count.max(inlined)))
  }

  pub(crate) fn reply(reply: Reply, parent: usize) -> Self {
    Self {
      author: reply.author_name,
      badges: Vec::new(),
      body: sanitize_comment(&reply.text),
      children: Vec::new(),
      expanded: false,
      id: reply.id,
      like_count: reply.like_count,
      parent: Some(parent),
      published_at: reply.published_at,
      reply_count: 0,
    }
  }

  pub(crate) fn top_level(moderated: ModeratedComment) -> (Self, Vec<Reply>) {
    let ModeratedComment {
      classification,
      comment,
    } = moderated;

    let entry = Self {
      author: comment.author_name,
      badges: classification.badges(),
      body: sanitize_comment(&comment.text),
      children: Vec::new(),
      expanded: false,
      id: comment.id,
      like_count: comment.like_count,
      parent: None,
      published_at: comment.published_at,
      reply_count: comment.reply_count,
    };

    (entry, comment.replies)
  }
}
