//! Copy confirmation indicator
//!
//! Tracks which code segment was most recently copied. The indicator is a
//! single deadline slot: marking a new index overwrites the previous deadline,
//! so only the latest pending reset can ever clear the slot.

use std::time::{Duration, Instant};

/// How long the "copied" confirmation stays visible
pub const COPY_CONFIRM_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopiedIndex {
    /// (segment index, moment the confirmation stops being shown)
    slot: Option<(usize, Instant)>,
}

impl CopiedIndex {
    /// Record a successful copy at `now`
    pub fn mark(&mut self, index: usize, now: Instant) {
        self.slot = Some((index, now + COPY_CONFIRM_DURATION));
    }

    /// Index still within its confirmation window at `now`
    ///
    /// The window is inclusive of the deadline itself.
    pub fn get(&self, now: Instant) -> Option<usize> {
        match self.slot {
            Some((index, expires_at)) if now <= expires_at => Some(index),
            _ => None,
        }
    }

    /// Clear the slot once its deadline has passed
    ///
    /// Returns true if the slot was cleared by this call.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.slot {
            Some((_, expires_at)) if now > expires_at => {
                self.slot = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_index_for_full_window() {
        let t0 = Instant::now();
        let mut copied = CopiedIndex::default();
        copied.mark(3, t0);

        assert_eq!(copied.get(t0), Some(3));
        assert_eq!(copied.get(t0 + Duration::from_millis(1999)), Some(3));
        assert_eq!(copied.get(t0 + COPY_CONFIRM_DURATION), Some(3));
        assert_eq!(copied.get(t0 + Duration::from_millis(2001)), None);
    }

    #[test]
    fn expire_only_after_deadline() {
        let t0 = Instant::now();
        let mut copied = CopiedIndex::default();
        copied.mark(1, t0);

        assert!(!copied.expire(t0 + COPY_CONFIRM_DURATION));
        assert_eq!(copied.get(t0 + COPY_CONFIRM_DURATION), Some(1));

        assert!(copied.expire(t0 + Duration::from_millis(2001)));
        assert_eq!(copied.get(t0), None);
        assert!(!copied.expire(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn newer_copy_supersedes_pending_reset() {
        let t0 = Instant::now();
        let mut copied = CopiedIndex::default();
        copied.mark(1, t0);

        let t1 = t0 + Duration::from_millis(1500);
        copied.mark(3, t1);

        // The first copy's deadline passes, but it no longer owns the slot
        let after_first = t0 + Duration::from_millis(2100);
        assert!(!copied.expire(after_first));
        assert_eq!(copied.get(after_first), Some(3));

        let after_second = t1 + Duration::from_millis(2001);
        assert!(copied.expire(after_second));
        assert_eq!(copied.get(after_second), None);
    }
}
