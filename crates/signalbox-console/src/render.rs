//! Text rendering.
//!
//! Pure conversion of [`Console`] state into lines of text. No I/O happens
//! here; the driver decides where the text goes.
//!
//! # Layout
//!
//! - notice line, if any
//! - signed out: the auth form prompt for the current mode
//! - signed in: status bar, menu, then the active panel

use std::fmt;

use signalbox_app::{AuthMode, Console, Notice, NoticeTone};
use signalbox_core::{PLACEHOLDER_DETAIL, Panel, Snapshot};

const RULE: &str = "------------------------------------------------------------";
const ACTIVE_MARKER: &str = ">";
const INACTIVE_MARKER: &str = " ";

/// One rendered frame of the console.
pub struct Screen<'a> {
    console: &'a Console,
    now_secs: u64,
}

impl<'a> Screen<'a> {
    /// Frame for `console`, with alert ages relative to `now_secs`.
    pub fn new(console: &'a Console, now_secs: u64) -> Self {
        Self { console, now_secs }
    }
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        if let Some(notice) = self.console.notice() {
            write_notice(f, notice)?;
        }

        let Some(session) = self.console.session() else {
            return write_auth_prompt(f, self.console);
        };

        let pending = if self.console.is_pending() { "  (request in flight)" } else { "" };
        writeln!(f, "Signalbox | {} | signed in{pending}", session.role.label())?;
        writeln!(f)?;

        let active = self.console.active_view();
        for capability in self.console.menu() {
            let marker =
                if active == Some(capability.id) { ACTIVE_MARKER } else { INACTIVE_MARKER };
            match capability.badge_count {
                Some(count) => {
                    writeln!(f, "{marker} {:<12} {} [{count}]", capability.id, capability.label)?;
                },
                None => writeln!(f, "{marker} {:<12} {}", capability.id, capability.label)?,
            }
        }
        writeln!(f)?;

        match (self.console.panel(), self.console.snapshot()) {
            (Some(Panel::Dashboard), Some(snapshot)) => {
                write_dashboard(f, &snapshot, self.now_secs)
            },
            (Some(Panel::UnderDevelopment { title }), _) => {
                writeln!(f, "{title}")?;
                writeln!(f, "{PLACEHOLDER_DETAIL}")
            },
            _ => Ok(()),
        }
    }
}

fn write_notice(f: &mut fmt::Formatter<'_>, notice: &Notice) -> fmt::Result {
    let tag = match notice.tone {
        NoticeTone::Success => "ok",
        NoticeTone::Info => "info",
        NoticeTone::Error => "error",
    };
    writeln!(f, "[{tag}] {}: {}", notice.title, notice.detail)
}

fn write_auth_prompt(f: &mut fmt::Formatter<'_>, console: &Console) -> fmt::Result {
    let (heading, usage) = match console.mode() {
        AuthMode::Login => ("Sign in", "login <email> <password> <role>"),
        AuthMode::Register => ("Create account", "register <email> <password> <role>"),
    };
    writeln!(f, "Signalbox | {heading}")?;
    if console.is_pending() {
        writeln!(f, "Please wait...")
    } else {
        writeln!(f, "  {usage}   (`mode` to switch, `help` for more)")
    }
}

fn write_dashboard(f: &mut fmt::Formatter<'_>, snapshot: &Snapshot<'_>, now: u64) -> fmt::Result {
    let stats = snapshot.stats;
    let on_time = stats.on_time_percent().map_or_else(|| "n/a".to_string(), |p| format!("{p}%"));
    writeln!(f, "Operations Dashboard")?;
    writeln!(
        f,
        "  trains {}  on time {}  delayed {}  emergency {}  conflicts {}  on-time {on_time}",
        stats.total_trains, stats.on_time, stats.delayed, stats.emergency, stats.conflicts
    )?;

    writeln!(f)?;
    writeln!(f, "Live Train Status")?;
    for train in snapshot.trains {
        writeln!(
            f,
            "  {:<5} {:<22} {:<16} {} -> {} ({})",
            train.id,
            train.name,
            train.badge(),
            train.location,
            train.next_station,
            train.eta
        )?;
    }

    writeln!(f)?;
    writeln!(f, "Recent Alerts")?;
    if snapshot.alerts.is_empty() {
        writeln!(f, "  none")?;
    }
    for alert in snapshot.alerts.iter() {
        writeln!(
            f,
            "  {:<8} {} - {} ({})",
            alert.severity.as_str(),
            alert.title,
            alert.detail,
            alert.age_label(now)
        )?;
    }
    Ok(())
}
