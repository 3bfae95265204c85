use super::*;

/// Identifies the video load a request belongs to. Completions are checked
/// against the pipeline's current ticket when they resolve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Ticket {
  pub(crate) generation: u64,
  pub(crate) video_id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ModerationEffect {
  Classify {
    comment: Comment,
    ticket: Ticket,
  },
  FetchPage {
    page_size: u32,
    page_token: Option<String>,
    ticket: Ticket,
  },
}

impl ModerationEffect {
  pub(crate) async fn run<S, T>(
    self,
    source: &S,
    classifier: &ToxicityClassifier<T>,
  ) -> ModerationEvent
  where
    S: CommentSource,
    T: TextScorer,
  {
    match self {
      ModerationEffect::Classify { comment, ticket } => {
        ModerationEvent::Classified {
          result: classifier
            .classify(&comment.id, &comment.text_original)
            .await,
          ticket,
        }
      }
      ModerationEffect::FetchPage {
        page_size,
        page_token,
        ticket,
      } => {
        debug!(
          video_id = %ticket.video_id,
          page_token = page_token.as_deref().unwrap_or("<start>"),
          "fetching comment page"
        );

        ModerationEvent::Page {
          result: source
            .fetch_page(&ticket.video_id, page_token.as_deref(), page_size)
            .await,
          ticket,
        }
      }
    }
  }
}
