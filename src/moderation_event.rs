use super::*;

pub(crate) enum ModerationEvent {
  Classified {
    result: ClassificationResult,
    ticket: Ticket,
  },
  Page {
    result: Result<Page>,
    ticket: Ticket,
  },
}

impl ModerationEvent {
  pub(crate) fn ticket(&self) -> &Ticket {
    match self {
      ModerationEvent::Classified { ticket, .. }
      | ModerationEvent::Page { ticket, .. } => ticket,
    }
  }
}
