/// Decides when to re-run the status query. Dirty is set by external
/// change notifications and by completion of non-query commands; a query
/// is only issued while the process runner is idle, so readiness doubles
/// as the mutual-exclusion gate against overlapping queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Clean,
    Dirty,
    Refreshing,
}

pub struct RefreshScheduler {
    dirty: bool,
    refreshing: bool,
}

impl RefreshScheduler {
    /// Starts dirty, forcing an immediate first refresh.
    pub fn new() -> Self {
        Self {
            dirty: true,
            refreshing: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn should_refresh(&self, runner_ready: bool) -> bool {
        self.dirty && !self.refreshing && runner_ready
    }

    /// Dirty is cleared before the query starts so a change arriving
    /// mid-query re-marks the scheduler.
    pub fn refresh_started(&mut self) {
        self.dirty = false;
        self.refreshing = true;
    }

    pub fn refresh_finished(&mut self) {
        self.refreshing = false;
    }

    pub fn state(&self) -> RefreshState {
        if self.refreshing {
            RefreshState::Refreshing
        } else if self.dirty {
            RefreshState::Dirty
        } else {
            RefreshState::Clean
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_dirty() {
        let scheduler = RefreshScheduler::new();
        assert_eq!(scheduler.state(), RefreshState::Dirty);
        assert!(scheduler.should_refresh(true));
    }

    #[test]
    fn refresh_waits_for_runner() {
        let scheduler = RefreshScheduler::new();
        assert!(!scheduler.should_refresh(false));
    }

    #[test]
    fn clean_after_undisturbed_refresh() {
        let mut scheduler = RefreshScheduler::new();

        scheduler.refresh_started();
        assert_eq!(scheduler.state(), RefreshState::Refreshing);
        assert!(!scheduler.should_refresh(true));

        scheduler.refresh_finished();
        assert_eq!(scheduler.state(), RefreshState::Clean);
    }

    #[test]
    fn change_during_refresh_leaves_scheduler_dirty() {
        let mut scheduler = RefreshScheduler::new();

        scheduler.refresh_started();
        scheduler.mark_dirty();
        scheduler.refresh_finished();

        assert_eq!(scheduler.state(), RefreshState::Dirty);
        assert!(scheduler.should_refresh(true));
    }

    #[test]
    fn notification_dirties_a_clean_scheduler() {
        let mut scheduler = RefreshScheduler::new();
        scheduler.refresh_started();
        scheduler.refresh_finished();

        scheduler.mark_dirty();
        assert_eq!(scheduler.state(), RefreshState::Dirty);
    }
}
