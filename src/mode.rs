use super::*;

pub(crate) enum Mode {
  Home,
  Video(VideoView),
}

impl Mode {
  fn handle_home_key(key: KeyEvent) -> Command {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
      KeyCode::Char('?') => Command::ShowHelp,
      KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
      KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
      KeyCode::PageDown => Command::PageDown,
      KeyCode::PageUp => Command::PageUp,
      KeyCode::Char('d') if control => Command::PageDown,
      KeyCode::Char('u') if control => Command::PageUp,
      KeyCode::Home => Command::SelectFirst,
      KeyCode::End => Command::SelectLast,
      KeyCode::Enter => Command::OpenVideo,
      KeyCode::Char('o') => Command::OpenInBrowser,
      KeyCode::Char('R') => Command::Retry,
      _ => Command::None,
    }
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent, page: usize) -> Command {
    match self {
      Mode::Home => Self::handle_home_key(key),
      Mode::Video(view) => Self::handle_video_key(view, key, page),
    }
  }

  fn handle_video_key(
    view: &mut VideoView,
    key: KeyEvent,
    page: usize,
  ) -> Command {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    let step = isize::try_from(page.saturating_sub(1).max(1))
      .unwrap_or(isize::MAX);

    match key.code {
      KeyCode::Char('q') => return Command::Quit,
      KeyCode::Esc => return Command::Back,
      KeyCode::Char('?') => return Command::ShowHelp,
      KeyCode::Char('o') => return Command::OpenInBrowser,
      KeyCode::Char('r') => return Command::StartReply,
      KeyCode::Char('R') => return Command::Retry,
      KeyCode::Left
      | KeyCode::Right
      | KeyCode::Tab
      | KeyCode::BackTab
      | KeyCode::Char('h' | 'l') => view.switch_tab(),
      KeyCode::Down | KeyCode::Char('j') => view.active_view_mut().move_by(1),
      KeyCode::Up | KeyCode::Char('k') => view.active_view_mut().move_by(-1),
      KeyCode::PageDown => view.active_view_mut().move_by(step),
      KeyCode::PageUp => view.active_view_mut().move_by(-step),
      KeyCode::Char('d') if control => view.active_view_mut().move_by(step),
      KeyCode::Char('u') if control => view.active_view_mut().move_by(-step),
      KeyCode::Home => view.active_view_mut().select_first(),
      KeyCode::End => view.active_view_mut().select_last(),
      KeyCode::Enter | KeyCode::Char(' ') => {
        view.active_view_mut().toggle_selected();
      }
      _ => {}
    }

    Command::None
  }
}
