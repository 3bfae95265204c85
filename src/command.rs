#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
  Back,
  CancelReply,
  HideHelp,
  None,
  OpenInBrowser,
  OpenVideo,
  PageDown,
  PageUp,
  Quit,
  Retry,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  StartReply,
  SubmitReply,
}
