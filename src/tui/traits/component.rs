//! Core component trait
//!
//! Every UI element that can be rendered implements `Component`.

use crate::chat::ChatState;
use crate::logging::LogBuffer;
use crate::tui::scroll::FocusablePanel;
use crate::tui::theme::Theme;
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

/// Identity of a focusable component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Question input
    Prompt,
    /// Rendered response
    Response,
    /// System logs panel
    Logs,
}

impl From<FocusablePanel> for ComponentId {
    fn from(panel: FocusablePanel) -> Self {
        match panel {
            FocusablePanel::Prompt => ComponentId::Prompt,
            FocusablePanel::Response => ComponentId::Response,
            FocusablePanel::Logs => ComponentId::Logs,
        }
    }
}

/// Read-only view of app state handed to components during rendering
///
/// Components see the chat state but cannot mutate it; any state they
/// change while rendering is their own (scroll dimensions).
pub struct RenderContext<'a> {
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,

    /// Animation frame counter (spinner)
    pub animation_frame: usize,

    pub chat: &'a ChatState,

    pub log_buffer: &'a LogBuffer,

    /// Frame timestamp, for time-windowed indicators
    pub now: Instant,
}

impl<'a> RenderContext<'a> {
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Spinner character for the current animation frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Base trait for all UI components
///
/// `render` takes `&mut self` so panels can record viewport dimensions for
/// their scroll state as they draw.
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render the component into `area`
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
