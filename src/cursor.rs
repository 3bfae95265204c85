/// Position in a paged upstream listing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) enum Cursor {
  Exhausted,
  Next(String),
  #[default]
  Start,
}

impl Cursor {
  pub(crate) fn after(next_page_token: Option<String>) -> Self {
    match next_page_token {
      Some(token) if !token.is_empty() => Cursor::Next(token),
      _ => Cursor::Exhausted,
    }
  }

  pub(crate) fn has_continuation(&self) -> bool {
    matches!(self, Cursor::Next(_))
  }

  pub(crate) fn is_exhausted(&self) -> bool {
    matches!(self, Cursor::Exhausted)
  }

  pub(crate) fn page_token(&self) -> Option<&str> {
    match self {
      Cursor::Next(token) => Some(token),
      Cursor::Exhausted | Cursor::Start => None,
    }
  }
}
