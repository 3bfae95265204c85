use super::*;

/// A paged listing of a video's top-level comments.
///
/// `page_token` is the opaque continuation returned by the previous page and
/// must be passed back unmodified. Failures propagate; no partial page is
/// ever returned.
#[async_trait]
pub(crate) trait CommentSource: Send + Sync {
  async fn fetch_page(
    &self,
    video_id: &str,
    page_token: Option<&str>,
    page_size: u32,
  ) -> Result<Page>;
}
