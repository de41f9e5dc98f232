// Scroll state shared by the response and logs panels
//
// Each panel owns its own ScrollState; App only routes input.
// Auto-follow keeps the view pinned to the bottom while content grows
// (the logs panel uses it; the response panel starts at the top).

/// Scroll state for a single panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Line/item index at the top of the viewport
    offset: usize,

    /// Total number of lines/items in content
    total: usize,

    /// Number of lines/items visible in the viewport
    viewport: usize,

    /// Snap to the bottom when content grows
    /// Scrolling up disables this; scrolling to the bottom re-enables it
    pub auto_follow: bool,
}

impl ScrollState {
    /// Scroll state with auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Scroll state with auto-follow disabled (manual scroll)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by one line, disabling auto-follow
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one line
    pub fn scroll_down(&mut self) {
        // Dimensions not known yet: render will clamp
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom (keeps following only if the panel already did)
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Forget the position (new content replaces old)
    pub fn reset(&mut self) {
        self.offset = 0;
        self.total = 0;
    }

    /// Scroll the minimum amount so lines `start..end` are in view
    ///
    /// If the range is taller than the viewport its first line wins.
    pub fn ensure_visible(&mut self, start: usize, end: usize) {
        if self.viewport == 0 {
            self.offset = start;
            return;
        }
        if start < self.offset {
            self.offset = start;
        } else if end > self.offset + self.viewport {
            self.offset = end.saturating_sub(self.viewport).min(start);
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.min(self.total);
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Content overflows the viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Panels that can be focused for input routing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusablePanel {
    /// Question input (default focus)
    #[default]
    Prompt,
    /// Rendered response with its code blocks
    Response,
    /// System logs (only while visible)
    Logs,
}

impl FocusablePanel {
    /// Next panel in Tab order; Logs is skipped while hidden
    pub fn next(self, logs_visible: bool) -> Self {
        match self {
            Self::Prompt => Self::Response,
            Self::Response if logs_visible => Self::Logs,
            Self::Response | Self::Logs => Self::Prompt,
        }
    }

    /// Previous panel in Tab order (Shift+Tab)
    pub fn prev(self, logs_visible: bool) -> Self {
        match self {
            Self::Prompt if logs_visible => Self::Logs,
            Self::Prompt => Self::Response,
            Self::Response => Self::Prompt,
            Self::Logs => Self::Response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        assert!(scroll.auto_follow);

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5); // At bottom

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10); // Still at bottom
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_manual_scroll_mode() {
        let mut scroll = ScrollState::manual();

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0); // Still at top, not following
    }

    #[test]
    fn test_visible_range() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(100, 10);
        assert_eq!(scroll.visible_range(), (90, 100));

        scroll.scroll_to_top();
        assert_eq!(scroll.visible_range(), (0, 10));
    }

    #[test]
    fn test_ensure_visible_scrolls_minimally() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(50, 10);

        // Below the viewport: bottom edge lines up
        scroll.ensure_visible(14, 18);
        assert_eq!(scroll.offset(), 8);

        // Already visible: no movement
        scroll.ensure_visible(10, 12);
        assert_eq!(scroll.offset(), 8);

        // Above the viewport: top edge lines up
        scroll.ensure_visible(3, 5);
        assert_eq!(scroll.offset(), 3);

        // Taller than the viewport: first line wins
        scroll.ensure_visible(20, 40);
        assert_eq!(scroll.offset(), 20);
    }

    #[test]
    fn test_focus_cycle_skips_hidden_logs() {
        use FocusablePanel::*;

        assert_eq!(Prompt.next(false), Response);
        assert_eq!(Response.next(false), Prompt);
        assert_eq!(Response.next(true), Logs);
        assert_eq!(Logs.next(true), Prompt);

        assert_eq!(Prompt.prev(false), Response);
        assert_eq!(Prompt.prev(true), Logs);
        assert_eq!(Logs.prev(true), Response);
    }
}
