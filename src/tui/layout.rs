//! Width breakpoints for deciding what fits on the chat screen
//!
//! Decorations (flow target, global key hints) drop out as the terminal
//! narrows; the prompt and response always render.

/// Terminal width class, ordered narrowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: split pane
    Compact,
    /// 60-99 cols: half-screen
    Normal,
    /// 100+ cols: full terminal
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Inclusive comparison
    pub fn at_least(self, min: Breakpoint) -> bool {
        self >= min
    }

    /// Title bar has room for the flow target
    pub fn shows_target(self) -> bool {
        self.at_least(Breakpoint::Normal)
    }

    /// Status bar has room for the global key hints next to the panel hints
    pub fn shows_global_hints(self) -> bool {
        self.at_least(Breakpoint::Wide)
    }
}
