// Components module - the pieces of the chat screen
//
// - Title bar: app name, busy indicator, flow target
// - Prompt bar: question input and Ask button
// - Response panel: placeholder, error, or segmented response
// - Logs panel: system log entries (toggleable)
// - Status bar: key hints
// - Toasts: transient notifications over everything else

pub mod logs_panel;
pub mod prompt_bar;
pub mod response_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use logs_panel::LogsPanel;
pub use prompt_bar::PromptBar;
pub use response_panel::ResponsePanel;
pub use toast::ToastStack;
