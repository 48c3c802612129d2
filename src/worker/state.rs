use std::fmt;

/// Lifecycle of one cache-worker instance.
///
/// `Installing → Installed(waiting) → Activating → Activated`, with
/// `Redundant` as the terminal state once a newer instance takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Pre-warming the current cache bucket.
    Installing,
    /// Installed, waiting for permission to take over page control.
    Installed,
    /// Garbage-collecting stale buckets.
    Activating,
    /// Controlling pages and intercepting fetches.
    Activated,
    /// Superseded by a newer worker instance.
    Redundant,
}

impl WorkerState {
    /// Fetch interception is only meaningful once activation completed.
    pub fn can_intercept(&self) -> bool {
        matches!(self, WorkerState::Activated)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Redundant)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
            WorkerState::Redundant => "redundant",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_activated_workers_intercept() {
        assert!(WorkerState::Activated.can_intercept());
        assert!(!WorkerState::Installing.can_intercept());
        assert!(!WorkerState::Installed.can_intercept());
        assert!(!WorkerState::Activating.can_intercept());
        assert!(!WorkerState::Redundant.can_intercept());
    }

    #[test]
    fn test_redundant_is_the_only_terminal_state() {
        assert!(WorkerState::Redundant.is_terminal());
        assert!(!WorkerState::Activated.is_terminal());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(WorkerState::Installed.to_string(), "installed");
        assert_eq!(WorkerState::Redundant.to_string(), "redundant");
    }
}
