//! Model-based testing.
//!
//! [`Operation`]s are generated randomly (proptest or a fuzzer) and applied
//! both to a [`ConsoleWorld`], the real console wired over the full
//! credential path, and to a [`ModelConsole`], a few lines of reference
//! logic. Their observable states must agree after every step.

use std::collections::HashMap;

use arbitrary::Arbitrary;
use signalbox_app::{
    AuthForm, AuthMode, Console, ConsoleAction, ConsoleConfig, ConsoleEvent, ConsoleInput, Gateway,
};
use signalbox_core::{
    Alert, CAPABILITIES, DASHBOARD, Environment, Role, SessionManager, Severity, draw_perturbation,
    resolve_menu,
};

use crate::{
    SimEnv,
    invariants::ConsoleSnapshot,
    scenario::{WireStore, wire_store},
};

/// Identifiers the generated operations draw from.
pub const USERS: [&str; 4] = ["op@rail.test", "sup@rail.test", "admin@rail.test", "guest@rail.test"];

/// Operations that can be applied to the console.
///
/// Indices are reduced modulo the size of their table, so every byte pattern
/// is a valid operation.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Register a user with a role.
    Register {
        /// Index into [`USERS`].
        user: u8,
        /// Index into [`Role::ALL`].
        role: u8,
    },

    /// Log in as a user with a role.
    Login {
        /// Index into [`USERS`].
        user: u8,
        /// Index into [`Role::ALL`].
        role: u8,
        /// Send a secret that never matches.
        wrong_secret: bool,
    },

    /// Submit an empty form.
    SubmitBlank,

    /// Switch the auth form mode.
    ToggleMode,

    /// Select a view. One index past the table names an unknown view.
    SelectView {
        /// Index into the capability table.
        view: u8,
    },

    /// Log out.
    Logout,

    /// One refresh tick.
    Tick,

    /// Raise an alert.
    RaiseAlert {
        /// Severity selector.
        severity: u8,
    },
}

fn user_of(index: u8) -> (usize, &'static str) {
    let i = usize::from(index) % USERS.len();
    (i, USERS[i])
}

fn secret_of(user: usize) -> String {
    format!("pw-{user}")
}

fn role_of(index: u8) -> Role {
    Role::ALL[usize::from(index) % Role::ALL.len()]
}

fn view_of(index: u8) -> &'static str {
    CAPABILITIES.get(usize::from(index) % (CAPABILITIES.len() + 1)).map_or("nonexistent", |c| c.id)
}

fn severity_of(index: u8) -> Severity {
    match index % 3 {
        0 => Severity::Info,
        1 => Severity::Warning,
        _ => Severity::Critical,
    }
}

/// The real console wired over the full credential path.
pub struct ConsoleWorld {
    console: Console,
    gateway: Gateway<WireStore, SimEnv>,
    env: SimEnv,
}

impl ConsoleWorld {
    /// Signed-out console over an empty store.
    pub fn new(seed: u64) -> Self {
        let env = SimEnv::with_seed(seed);
        let config = ConsoleConfig::default();
        let sessions = SessionManager::new(wire_store(Vec::new()), env.clone())
            .with_request_timeout(config.request_timeout);
        Self { console: Console::new(config), gateway: Gateway::new(sessions), env }
    }

    /// Apply one operation, running every resulting action to completion.
    pub async fn apply(&mut self, op: &Operation) {
        let event = match *op {
            Operation::Register { user, role } => {
                let (index, identifier) = user_of(user);
                self.ensure_mode(AuthMode::Register).await;
                let form = AuthForm::new(identifier, secret_of(index), role_of(role).as_str());
                ConsoleEvent::Input(ConsoleInput::Submit(form))
            },
            Operation::Login { user, role, wrong_secret } => {
                let (index, identifier) = user_of(user);
                self.ensure_mode(AuthMode::Login).await;
                let secret = if wrong_secret { "wrong".to_string() } else { secret_of(index) };
                let form = AuthForm::new(identifier, secret, role_of(role).as_str());
                ConsoleEvent::Input(ConsoleInput::Submit(form))
            },
            Operation::SubmitBlank => ConsoleEvent::Input(ConsoleInput::Submit(AuthForm::default())),
            Operation::ToggleMode => ConsoleEvent::Input(ConsoleInput::ToggleMode),
            Operation::SelectView { view } => {
                ConsoleEvent::Input(ConsoleInput::SelectView(view_of(view).to_string()))
            },
            Operation::Logout => ConsoleEvent::Input(ConsoleInput::Logout),
            Operation::Tick => ConsoleEvent::Tick { delta: draw_perturbation(&self.env) },
            Operation::RaiseAlert { severity } => {
                self.env.advance_secs(30);
                ConsoleEvent::AlertRaised(Alert::new(
                    severity_of(severity),
                    "Simulated alert",
                    "Raised by the model",
                    self.env.wall_clock_secs(),
                ))
            },
        };

        self.dispatch(event).await;
    }

    async fn ensure_mode(&mut self, mode: AuthMode) {
        if self.console.mode() != mode {
            self.dispatch(ConsoleEvent::Input(ConsoleInput::ToggleMode)).await;
        }
    }

    async fn dispatch(&mut self, event: ConsoleEvent) {
        let mut pending = self.console.handle(event);

        while !pending.is_empty() {
            for action in std::mem::take(&mut pending) {
                match action {
                    ConsoleAction::Login(_) | ConsoleAction::Register(_) | ConsoleAction::Logout => {
                        for event in self.gateway.process_action(action).await {
                            pending.extend(self.console.handle(event));
                        }
                    },
                    ConsoleAction::Render
                    | ConsoleAction::Quit
                    | ConsoleAction::StartTicker { .. }
                    | ConsoleAction::StopTicker => {},
                }
            }
        }
    }

    /// Snapshot including the session manager's view.
    pub fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot::capture(&self.console).with_manager_role(self.gateway.sessions().role())
    }

    /// The console.
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// The gateway.
    pub fn gateway(&self) -> &Gateway<WireStore, SimEnv> {
        &self.gateway
    }
}

/// Reference model of who is signed in and what they are looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelConsole {
    registered: HashMap<usize, Role>,
    signed_in: Option<Role>,
    active_view: Option<&'static str>,
}

impl ModelConsole {
    /// Signed-out model with nobody registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: &Operation) {
        match *op {
            Operation::Register { user, role } => {
                let (index, _) = user_of(user);
                self.registered.entry(index).or_insert(role_of(role));
            },
            Operation::Login { user, role, wrong_secret } => {
                let (index, _) = user_of(user);
                let role = role_of(role);
                if !wrong_secret && self.registered.get(&index) == Some(&role) {
                    self.signed_in = Some(role);
                    self.active_view = Some(DASHBOARD);
                }
            },
            Operation::SelectView { view } => {
                let view = view_of(view);
                if let Some(role) = self.signed_in
                    && resolve_menu(role).iter().any(|c| c.id == view)
                {
                    self.active_view = Some(view);
                }
            },
            Operation::Logout => {
                self.signed_in = None;
                self.active_view = None;
            },
            Operation::SubmitBlank
            | Operation::ToggleMode
            | Operation::Tick
            | Operation::RaiseAlert { .. } => {},
        }
    }

    /// Expected signed-in role.
    pub fn signed_in(&self) -> Option<Role> {
        self.signed_in
    }

    /// Expected active view.
    pub fn active_view(&self) -> Option<&'static str> {
        self.active_view
    }

    /// Number of identifiers the model expects to be registered.
    pub fn registered(&self) -> usize {
        self.registered.len()
    }
}
