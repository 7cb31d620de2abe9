//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture what the console exposes at a point in time. Invariants
//! operate on snapshots rather than live state so each check is consistent.

use signalbox_app::Console;
use signalbox_core::Role;

/// Snapshot of the console's observable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleSnapshot {
    /// Role of the workspace. `None` while signed out.
    pub role: Option<Role>,
    /// Active view id. `None` while signed out.
    pub active_view: Option<&'static str>,
    /// Menu ids, in table order.
    pub menu: Vec<&'static str>,
    /// Total trains counter. `None` while signed out.
    pub total_trains: Option<u32>,
    /// Alerts currently in the feed.
    pub alert_count: usize,
    /// Configured alert capacity.
    pub alert_capacity: usize,
    /// Whether a credential request is in flight.
    pub pending: bool,
    /// Role held by the session manager, when the observer can see it.
    pub manager_role: Option<Option<Role>>,
}

impl ConsoleSnapshot {
    /// Capture the console.
    pub fn capture(console: &Console) -> Self {
        let snapshot = console.snapshot();
        Self {
            role: console.role(),
            active_view: console.active_view(),
            menu: console.menu().iter().map(|capability| capability.id).collect(),
            total_trains: snapshot.as_ref().map(|s| s.stats.total_trains),
            alert_count: snapshot.as_ref().map_or(0, |s| s.alerts.len()),
            alert_capacity: console.config().alert_capacity,
            pending: console.is_pending(),
            manager_role: None,
        }
    }

    /// Record the session manager's role for agreement checks.
    #[must_use]
    pub fn with_manager_role(mut self, role: Option<Role>) -> Self {
        self.manager_role = Some(role);
        self
    }
}
