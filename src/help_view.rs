use super::*;

pub(crate) struct HelpView {
  message_backup: Option<String>,
  visible: bool,
}

impl HelpView {
  fn area(frame: Rect) -> Rect {
    let clamp = |value: usize| u16::try_from(value).unwrap_or(u16::MAX);

    let lines = HELP_TEXT.lines().count();

    let widest = HELP_TEXT
      .lines()
      .map(|line| line.chars().count())
      .max()
      .unwrap_or(0);

    let width = clamp(widest + 4).min(frame.width.saturating_sub(2)).max(1);
    let height = clamp(lines + 2).min(frame.height.saturating_sub(2)).max(1);

    Rect::new(
      frame.x + frame.width.saturating_sub(width) / 2,
      frame.y + frame.height.saturating_sub(height) / 2,
      width.min(frame.width),
      height.min(frame.height),
    )
  }

  pub(crate) fn draw(&self, frame: &mut Frame) {
    if !self.visible {
      return;
    }

    let area = Self::area(frame.area());

    frame.render_widget(Clear, area);

    frame.render_widget(
      Paragraph::new(HELP_TEXT)
        .block(Block::default().title(HELP_TITLE).borders(Borders::ALL))
        .wrap(Wrap { trim: false }),
      area,
    );
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('?') | KeyCode::Esc => Command::HideHelp,
      KeyCode::Char('q') => Command::Quit,
      _ => Command::None,
    }
  }

  /// Restores the status line saved by [`HelpView::show`], or `fallback`.
  pub(crate) fn hide(&mut self, message: &mut String, fallback: &str) {
    if !self.visible {
      return;
    }

    *message = self
      .message_backup
      .take()
      .unwrap_or_else(|| fallback.into());

    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn new() -> Self {
    Self {
      message_backup: None,
      visible: false,
    }
  }

  pub(crate) fn show(&mut self, message: &mut String) {
    if self.visible {
      return;
    }

    self.message_backup = Some(std::mem::replace(message, HELP_STATUS.into()));

    self.visible = true;
  }
}
