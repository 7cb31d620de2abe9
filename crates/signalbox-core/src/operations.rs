//! Operational state aggregator.
//!
//! Holds the in-memory picture behind the dashboard: the monitored trains,
//! the aggregate counters, and a bounded most-recent-first alert feed.
//!
//! # Refresh model
//!
//! There is no telemetry feed. Each tick applies a bounded random walk to
//! [`OperationalStats::total_trains`] (a delta from `{-1, 0, +1}`), clamped at
//! zero, and leaves individual trains untouched. The counters and the train
//! list are independently maintained and may drift apart; nothing reconciles
//! them.
//!
//! # Invariants
//!
//! - `stats.total_trains` never underflows; any delta saturates.
//! - A train carries a delay if and only if it is delayed (enforced by
//!   [`TrainState`]).
//! - The alert feed never holds more than its capacity; pushing past it
//!   evicts the oldest entry.

use std::collections::VecDeque;

use crate::env::Environment;

/// Default number of alerts retained by the feed.
pub const DEFAULT_ALERT_CAPACITY: usize = 10;

/// Running status of a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainState {
    /// Running to schedule.
    OnTime,
    /// Behind schedule.
    Delayed {
        /// Minutes behind schedule.
        minutes: u32,
    },
    /// Requires immediate attention.
    Emergency,
}

impl TrainState {
    /// Upper-case status label.
    pub fn label(self) -> &'static str {
        match self {
            Self::OnTime => "ON TIME",
            Self::Delayed { .. } => "DELAYED",
            Self::Emergency => "EMERGENCY",
        }
    }

    /// Delay in minutes. `Some` exactly when delayed.
    pub fn delay_minutes(self) -> Option<u32> {
        match self {
            Self::Delayed { minutes } => Some(minutes),
            Self::OnTime | Self::Emergency => None,
        }
    }
}

/// One monitored train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainStatus {
    /// Train number (e.g. `T001`).
    pub id: String,
    /// Service name.
    pub name: String,
    /// Running status.
    pub state: TrainState,
    /// Current position description.
    pub location: String,
    /// Next scheduled stop.
    pub next_station: String,
    /// Expected arrival at the next stop, `HH:MM`.
    pub eta: String,
}

impl TrainStatus {
    /// Create a train entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        state: TrainState,
        location: impl Into<String>,
        next_station: impl Into<String>,
        eta: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state,
            location: location.into(),
            next_station: next_station.into(),
            eta: eta.into(),
        }
    }

    /// Status badge text, e.g. `DELAYED (+15m)`.
    pub fn badge(&self) -> String {
        match self.state.delay_minutes() {
            Some(minutes) => format!("{} (+{minutes}m)", self.state.label()),
            None => self.state.label().to_string(),
        }
    }
}

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationalStats {
    /// Trains under monitoring.
    pub total_trains: u32,
    /// Trains running on time.
    pub on_time: u32,
    /// Trains running late.
    pub delayed: u32,
    /// Trains in an emergency state.
    pub emergency: u32,
    /// Open scheduling conflicts.
    pub conflicts: u32,
}

impl OperationalStats {
    /// Shift `total_trains` by `delta`, saturating at `0` and `u32::MAX`.
    ///
    /// Returns the new total.
    pub fn apply_delta(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.total_trains).saturating_add(delta);
        self.total_trains = u32::try_from(next.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);
        self.total_trains
    }

    /// On-time share of all trains as a rounded percentage.
    ///
    /// `None` when there are no trains.
    pub fn on_time_percent(&self) -> Option<u32> {
        if self.total_trains == 0 {
            return None;
        }
        let total = u64::from(self.total_trains);
        let percent = (u64::from(self.on_time) * 100 + total / 2) / total;
        Some(u32::try_from(percent).unwrap_or(u32::MAX))
    }
}

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational.
    Info,
    /// Needs attention soon.
    Warning,
    /// Needs attention now.
    Critical,
}

impl Severity {
    /// Lower-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// An entry in the alert feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Severity.
    pub severity: Severity,
    /// Short heading.
    pub title: String,
    /// Detail line.
    pub detail: String,
    /// Wall-clock seconds when raised.
    pub timestamp_secs: u64,
}

impl Alert {
    /// Create an alert.
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        detail: impl Into<String>,
        timestamp_secs: u64,
    ) -> Self {
        Self { severity, title: title.into(), detail: detail.into(), timestamp_secs }
    }

    /// Relative age, e.g. `2 minutes ago`.
    pub fn age_label(&self, now_secs: u64) -> String {
        let age = now_secs.saturating_sub(self.timestamp_secs);
        let (count, unit) = match age {
            0..60 => return "just now".to_string(),
            60..3_600 => (age / 60, "minute"),
            3_600..86_400 => (age / 3_600, "hour"),
            _ => (age / 86_400, "day"),
        };
        let plural = if count == 1 { "" } else { "s" };
        format!("{count} {unit}{plural} ago")
    }
}

/// Bounded, most-recent-first alert feed.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    entries: VecDeque<Alert>,
    capacity: usize,
}

impl AlertFeed {
    /// Empty feed holding at most `capacity` alerts (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Insert at the head. Returns the evicted oldest alert when full.
    pub fn push(&mut self, alert: Alert) -> Option<Alert> {
        self.entries.push_front(alert);
        if self.entries.len() > self.capacity {
            let evicted = self.entries.pop_back();
            debug_assert_eq!(self.entries.len(), self.capacity);
            evicted
        } else {
            None
        }
    }

    /// Alerts, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    /// Newest alert.
    pub fn latest(&self) -> Option<&Alert> {
        self.entries.front()
    }

    /// Number of alerts held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the feed is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of alerts held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_CAPACITY)
    }
}

/// Read-only view of the aggregator.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Monitored trains.
    pub trains: &'a [TrainStatus],
    /// Aggregate counters.
    pub stats: &'a OperationalStats,
    /// Alert feed, newest first.
    pub alerts: &'a AlertFeed,
}

/// Owns trains, counters and the alert feed.
#[derive(Debug, Clone)]
pub struct OperationalState {
    trains: Vec<TrainStatus>,
    stats: OperationalStats,
    alerts: AlertFeed,
}

impl OperationalState {
    /// Create an aggregator from explicit parts.
    pub fn new(trains: Vec<TrainStatus>, stats: OperationalStats, alert_capacity: usize) -> Self {
        Self { trains, stats, alerts: AlertFeed::new(alert_capacity) }
    }

    /// Control-room picture at session start.
    ///
    /// Four corridor services, the shift counters, and the three most recent
    /// alerts stamped relative to `now_secs`.
    pub fn seeded(now_secs: u64, alert_capacity: usize) -> Self {
        let trains = vec![
            TrainStatus::new(
                "T001",
                "Express Mumbai-Delhi",
                TrainState::OnTime,
                "Approaching Bhopal Junction",
                "Bhopal Junction",
                "14:25",
            ),
            TrainStatus::new(
                "T002",
                "Rajdhani Express",
                TrainState::Delayed { minutes: 15 },
                "Agra Cantt",
                "Mathura Junction",
                "15:40",
            ),
            TrainStatus::new(
                "T003",
                "Shatabdi Express",
                TrainState::Emergency,
                "Gwalior Junction",
                "Jhansi Junction",
                "16:15",
            ),
            TrainStatus::new(
                "T004",
                "Duronto Express",
                TrainState::OnTime,
                "Kanpur Central",
                "Lucknow Junction",
                "17:30",
            ),
        ];
        let stats =
            OperationalStats { total_trains: 24, on_time: 18, delayed: 5, emergency: 1, conflicts: 2 };

        let mut state = Self::new(trains, stats, alert_capacity);
        for alert in [
            Alert::new(
                Severity::Info,
                "System Update",
                "AI scheduling optimization completed",
                now_secs.saturating_sub(600),
            ),
            Alert::new(
                Severity::Warning,
                "Delay Alert",
                "Rajdhani Express running 15 minutes behind schedule",
                now_secs.saturating_sub(300),
            ),
            Alert::new(
                Severity::Critical,
                "Signal Failure",
                "Track 3 signal malfunction at Gwalior Junction",
                now_secs.saturating_sub(120),
            ),
        ] {
            state.push_alert(alert);
        }
        state
    }

    /// Current read-only view.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { trains: &self.trains, stats: &self.stats, alerts: &self.alerts }
    }

    /// One refresh cycle: draw a perturbation from `env` and apply it.
    ///
    /// Returns the delta drawn.
    pub fn tick<E: Environment>(&mut self, env: &E) -> i64 {
        let delta = draw_perturbation(env);
        self.apply_delta(delta);
        delta
    }

    /// Apply a tick delta to the train total. Never fails; out-of-range
    /// deltas saturate.
    pub fn apply_delta(&mut self, delta: i64) {
        let total = self.stats.apply_delta(delta);
        tracing::trace!(delta, total, "operational tick");
    }

    /// Insert an alert at the head of the feed.
    ///
    /// Returns the evicted oldest alert when the feed was full.
    pub fn push_alert(&mut self, alert: Alert) -> Option<Alert> {
        let evicted = self.alerts.push(alert);
        if let Some(old) = &evicted {
            tracing::debug!(title = %old.title, "alert evicted from feed");
        }
        evicted
    }

    /// Mean delay of the delayed trains, rounded. `None` if none are delayed.
    pub fn average_delay_minutes(&self) -> Option<u32> {
        let delays: Vec<u64> =
            self.trains.iter().filter_map(|t| t.state.delay_minutes()).map(u64::from).collect();
        if delays.is_empty() {
            return None;
        }
        let count = delays.len() as u64;
        let mean = (delays.iter().sum::<u64>() + count / 2) / count;
        Some(u32::try_from(mean).unwrap_or(u32::MAX))
    }

    /// Monitored trains.
    pub fn trains(&self) -> &[TrainStatus] {
        &self.trains
    }

    /// Aggregate counters.
    pub fn stats(&self) -> &OperationalStats {
        &self.stats
    }

    /// Alert feed.
    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }
}

/// Draw a tick delta uniformly from `{-1, 0, +1}`.
pub fn draw_perturbation<E: Environment>(env: &E) -> i64 {
    (env.random_u64() % 3) as i64 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn alert(n: u64) -> Alert {
        Alert::new(Severity::Info, format!("alert {n}"), "detail", NOW + n)
    }

    #[test]
    fn total_never_underflows() {
        let mut stats = OperationalStats { total_trains: 1, ..OperationalStats::default() };

        assert_eq!(stats.apply_delta(-1), 0);
        assert_eq!(stats.apply_delta(-1), 0);
        assert_eq!(stats.apply_delta(i64::MIN), 0);
        assert_eq!(stats.apply_delta(1), 1);
    }

    #[test]
    fn total_saturates_at_max() {
        let mut stats = OperationalStats { total_trains: u32::MAX - 1, ..Default::default() };

        assert_eq!(stats.apply_delta(1), u32::MAX);
        assert_eq!(stats.apply_delta(i64::MAX), u32::MAX);
    }

    #[test]
    fn feed_evicts_oldest() {
        let mut feed = AlertFeed::new(3);
        for n in 0..3 {
            assert_eq!(feed.push(alert(n)), None);
        }

        assert_eq!(feed.push(alert(3)), Some(alert(0)));
        assert_eq!(feed.len(), 3);
        assert_eq!(feed.latest(), Some(&alert(3)));

        let titles: Vec<_> = feed.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["alert 3", "alert 2", "alert 1"]);
    }

    #[test]
    fn zero_capacity_keeps_newest() {
        let mut feed = AlertFeed::new(0);
        feed.push(alert(0));
        feed.push(alert(1));

        assert_eq!(feed.capacity(), 1);
        assert_eq!(feed.latest(), Some(&alert(1)));
    }

    #[test]
    fn seeded_picture() {
        let state = OperationalState::seeded(NOW, DEFAULT_ALERT_CAPACITY);
        let snapshot = state.snapshot();

        assert_eq!(snapshot.trains.len(), 4);
        assert_eq!(snapshot.stats.total_trains, 24);
        assert_eq!(snapshot.stats.on_time_percent(), Some(75));
        assert_eq!(state.average_delay_minutes(), Some(15));

        let latest = snapshot.alerts.latest().unwrap();
        assert_eq!(latest.title, "Signal Failure");
        assert_eq!(latest.severity, Severity::Critical);
        assert_eq!(latest.age_label(NOW), "2 minutes ago");
    }

    #[test]
    fn badge_shows_delay_only_when_delayed() {
        let state = OperationalState::seeded(NOW, DEFAULT_ALERT_CAPACITY);
        let badges: Vec<_> = state.trains().iter().map(TrainStatus::badge).collect();

        assert_eq!(badges, ["ON TIME", "DELAYED (+15m)", "EMERGENCY", "ON TIME"]);
    }

    #[test]
    fn percent_absent_without_trains() {
        let stats = OperationalStats::default();
        assert_eq!(stats.on_time_percent(), None);
    }

    #[test]
    fn age_labels() {
        let raised = alert(0);
        assert_eq!(raised.age_label(NOW), "just now");
        assert_eq!(raised.age_label(NOW + 60), "1 minute ago");
        assert_eq!(raised.age_label(NOW + 7_200), "2 hours ago");
        assert_eq!(raised.age_label(NOW + 86_400), "1 day ago");
        assert_eq!(raised.age_label(NOW - 10), "just now");
    }
}
