//! Console state machine.
//!
//! This module defines [`Console`], which holds everything the user sees,
//! completely decoupled from I/O and from the credential store.
//!
//! This is a pure state machine: it consumes [`crate::ConsoleEvent`] inputs
//! and produces [`crate::ConsoleAction`] instructions for the runtime to
//! execute.
//!
//! # Responsibilities
//!
//! - Tracks the auth form mode and the credential request in flight.
//! - Owns the signed-in [`Workspace`]: router and operational picture.
//! - Holds the latest [`Notice`] for the frontend to display.
//!
//! # Invariants
//!
//! - No workspace, no view: while signed out every view is refused.
//! - The active view is always in the menu of the workspace's role.
//! - At most one credential request is outstanding.

use signalbox_core::{
    AccessError, Alert, AuthError, MenuCapability, OperationalState, Panel, PendingRequest, Role,
    Session, Snapshot, ViewRouter,
};

use crate::{
    AuthForm, AuthMode, ConsoleAction, ConsoleConfig, ConsoleEvent, ConsoleInput, Notice,
    Workspace,
};

/// Console state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies, fully testable in simulation.
#[derive(Debug, Clone)]
pub struct Console {
    /// Tick period and alert capacity for new workspaces.
    config: ConsoleConfig,
    /// Auth form mode.
    mode: AuthMode,
    /// Credential request awaiting its outcome.
    pending: Option<PendingRequest>,
    /// Latest notice. `None` until something happens.
    notice: Option<Notice>,
    /// Signed-in state. `None` while signed out.
    workspace: Option<Workspace>,
}

impl Console {
    /// Create a signed-out console.
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config, mode: AuthMode::Login, pending: None, notice: None, workspace: None }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: ConsoleEvent) -> Vec<ConsoleAction> {
        match event {
            ConsoleEvent::Input(input) => self.handle_input(input),
            ConsoleEvent::Tick { delta } => match &mut self.workspace {
                Some(workspace) => {
                    workspace.operations.apply_delta(delta);
                    vec![ConsoleAction::Render]
                },
                None => vec![],
            },
            ConsoleEvent::LoginSucceeded { session } => {
                self.pending = None;
                self.open_workspace(session)
            },
            ConsoleEvent::LoginFailed { error } => {
                self.pending = None;
                self.fail(AuthMode::Login, &error)
            },
            ConsoleEvent::RegisterSucceeded { identifier } => {
                self.pending = None;
                self.mode = AuthMode::Login;
                self.notice = Some(Notice::registered());
                tracing::debug!(%identifier, "registration confirmed, back to login");
                vec![ConsoleAction::Render]
            },
            ConsoleEvent::RegisterFailed { error } => {
                self.pending = None;
                self.fail(AuthMode::Register, &error)
            },
            ConsoleEvent::AlertRaised(alert) => self.push_alert(alert),
        }
    }

    fn handle_input(&mut self, input: ConsoleInput) -> Vec<ConsoleAction> {
        match input {
            ConsoleInput::Submit(form) => self.submit(form),
            ConsoleInput::ToggleMode => self.toggle_mode(),
            ConsoleInput::SelectView(view) => match self.select_view(&view) {
                Ok(actions) => actions,
                Err(err) => {
                    tracing::warn!(error = %err, "view selection refused");
                    self.notice = Some(Notice::access_denied(&view));
                    vec![ConsoleAction::Render]
                },
            },
            ConsoleInput::Logout => self.logout(),
            ConsoleInput::Quit => self.quit(),
        }
    }

    /// Submit the auth form in the current mode.
    ///
    /// Renders before the request so the in-flight state is visible while
    /// the store answers. Ignored while another credential request is in
    /// flight.
    pub fn submit(&mut self, form: AuthForm) -> Vec<ConsoleAction> {
        if let Some(pending) = self.pending {
            tracing::debug!(?pending, "submit ignored, request in flight");
            return vec![];
        }

        match self.mode {
            AuthMode::Login => {
                self.pending = Some(PendingRequest::Login);
                vec![ConsoleAction::Render, ConsoleAction::Login(form)]
            },
            AuthMode::Register => {
                self.pending = Some(PendingRequest::Register);
                vec![ConsoleAction::Render, ConsoleAction::Register(form)]
            },
        }
    }

    /// Switch between login and registration. Ignored while a request is in
    /// flight.
    pub fn toggle_mode(&mut self) -> Vec<ConsoleAction> {
        if self.pending.is_some() {
            return vec![];
        }
        self.mode = self.mode.toggled();
        vec![ConsoleAction::Render]
    }

    /// Make `view` the active view.
    ///
    /// # Errors
    ///
    /// [`AccessError::ViewNotPermitted`] when signed out or when `view` is
    /// not in the role's menu. The active view is left unchanged.
    pub fn select_view(&mut self, view: &str) -> Result<Vec<ConsoleAction>, AccessError> {
        let workspace = self
            .workspace
            .as_mut()
            .ok_or_else(|| AccessError::ViewNotPermitted { view: view.to_string() })?;

        workspace.router.select_view(view)?;
        Ok(vec![ConsoleAction::Render])
    }

    /// End the session. No-op when signed out.
    pub fn logout(&mut self) -> Vec<ConsoleAction> {
        let Some(workspace) = self.workspace.take() else {
            return vec![];
        };

        tracing::debug!(role = %workspace.session.role, "workspace closed");
        self.notice = Some(Notice::signed_out());
        vec![ConsoleAction::StopTicker, ConsoleAction::Logout, ConsoleAction::Render]
    }

    /// Quit the console.
    pub fn quit(&self) -> Vec<ConsoleAction> {
        vec![ConsoleAction::Quit]
    }

    /// Clear the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn open_workspace(&mut self, session: Session) -> Vec<ConsoleAction> {
        let router = match ViewRouter::new(session.role) {
            Ok(router) => router,
            Err(err) => {
                tracing::error!(role = %session.role, error = %err, "role has no views");
                self.workspace = None;
                self.notice = Some(Notice::access_denied(signalbox_core::DASHBOARD));
                return vec![ConsoleAction::StopTicker, ConsoleAction::Logout, ConsoleAction::Render];
            },
        };
        let operations =
            OperationalState::seeded(session.started_at_secs, self.config.alert_capacity);

        self.workspace = Some(Workspace { session, router, operations });
        self.notice = Some(Notice::login_succeeded(&session));
        vec![ConsoleAction::StartTicker { period: self.config.tick_period }, ConsoleAction::Render]
    }

    fn fail(&mut self, mode: AuthMode, error: &AuthError) -> Vec<ConsoleAction> {
        self.notice = Some(Notice::auth_failed(mode, error));
        vec![ConsoleAction::Render]
    }

    fn push_alert(&mut self, alert: Alert) -> Vec<ConsoleAction> {
        match &mut self.workspace {
            Some(workspace) => {
                workspace.operations.push_alert(alert);
                vec![ConsoleAction::Render]
            },
            None => vec![],
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Auth form mode.
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Credential request in flight, if any.
    pub fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }

    /// Whether a credential request is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Latest notice.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Signed-in workspace. `None` while signed out.
    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    /// Whether a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.workspace.is_some()
    }

    /// Active session. `None` while signed out.
    pub fn session(&self) -> Option<Session> {
        self.workspace.as_ref().map(|workspace| workspace.session)
    }

    /// Role of the active session. `None` while signed out.
    pub fn role(&self) -> Option<Role> {
        self.session().map(|session| session.role)
    }

    /// Menu for the active role. Empty while signed out.
    pub fn menu(&self) -> &[&'static MenuCapability] {
        match &self.workspace {
            Some(workspace) => workspace.router.menu(),
            None => &[],
        }
    }

    /// Active view id. `None` while signed out.
    pub fn active_view(&self) -> Option<&'static str> {
        self.workspace.as_ref().map(|workspace| workspace.router.active_view())
    }

    /// Panel for the active view. `None` while signed out.
    pub fn panel(&self) -> Option<Panel> {
        self.workspace.as_ref().map(|workspace| workspace.router.panel())
    }

    /// Operational picture. `None` while signed out.
    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        self.workspace.as_ref().map(|workspace| workspace.operations.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use signalbox_core::{Severity, StoreError};

    use super::*;
    use crate::NoticeTone;

    const STARTED: u64 = 1_700_000_000;

    fn signed_in(role: Role) -> Console {
        let mut console = Console::new(ConsoleConfig::default());
        console.handle(ConsoleEvent::LoginSucceeded {
            session: Session { role, started_at_secs: STARTED },
        });
        console
    }

    #[test]
    fn submit_follows_mode() {
        let mut console = Console::new(ConsoleConfig::default());
        let form = AuthForm::new("op1@rail.test", "pw1", "operator");

        let actions = console.submit(form.clone());
        assert_eq!(actions, vec![ConsoleAction::Render, ConsoleAction::Login(form.clone())]);
        assert_eq!(console.pending(), Some(PendingRequest::Login));

        console.handle(ConsoleEvent::LoginFailed { error: AuthError::InvalidCredentials });
        console.toggle_mode();

        let actions = console.submit(form.clone());
        assert_eq!(actions, vec![ConsoleAction::Render, ConsoleAction::Register(form)]);
        assert_eq!(console.pending(), Some(PendingRequest::Register));
    }

    #[test]
    fn resubmit_while_pending_is_ignored() {
        let mut console = Console::new(ConsoleConfig::default());
        let form = AuthForm::new("a@x.com", "pw", "admin");

        console.submit(form.clone());
        assert!(console.submit(form).is_empty());
        assert!(console.toggle_mode().is_empty());
        assert_eq!(console.mode(), AuthMode::Login);
    }

    #[test]
    fn login_opens_workspace_on_dashboard() {
        let console = signed_in(Role::Operator);

        assert!(console.is_authenticated());
        assert_eq!(console.active_view(), Some("dashboard"));
        assert_eq!(console.panel(), Some(Panel::Dashboard));
        assert_eq!(console.notice().map(|n| n.title), Some("Login Successful"));

        let snapshot = console.snapshot().unwrap();
        assert_eq!(snapshot.trains.len(), 4);
        assert_eq!(snapshot.stats.total_trains, 24);
        assert_eq!(snapshot.alerts.len(), 3);
    }

    #[test]
    fn login_starts_ticker_with_configured_period() {
        let config =
            ConsoleConfig { tick_period: Duration::from_secs(2), ..ConsoleConfig::default() };
        let mut console = Console::new(config);

        let actions = console.handle(ConsoleEvent::LoginSucceeded {
            session: Session { role: Role::Admin, started_at_secs: STARTED },
        });
        assert_eq!(
            actions,
            vec![
                ConsoleAction::StartTicker { period: Duration::from_secs(2) },
                ConsoleAction::Render
            ]
        );
    }

    #[test]
    fn register_success_returns_to_login() {
        let mut console = Console::new(ConsoleConfig::default());
        console.toggle_mode();
        console.submit(AuthForm::new("op1@rail.test", "pw1", "operator"));

        console.handle(ConsoleEvent::RegisterSucceeded { identifier: "op1@rail.test".into() });

        assert_eq!(console.mode(), AuthMode::Login);
        assert!(!console.is_pending());
        assert!(!console.is_authenticated());
        assert_eq!(console.notice().map(|n| n.tone), Some(NoticeTone::Success));
    }

    #[test]
    fn select_view_while_signed_out_is_refused() {
        let mut console = Console::new(ConsoleConfig::default());

        for view in ["dashboard", "trains", "users"] {
            assert_eq!(
                console.select_view(view),
                Err(AccessError::ViewNotPermitted { view: view.into() })
            );
        }
    }

    #[test]
    fn refused_view_sets_access_denied() {
        let mut console = signed_in(Role::Operator);

        let actions = console.handle(ConsoleEvent::Input(ConsoleInput::SelectView("users".into())));
        assert_eq!(actions, vec![ConsoleAction::Render]);
        assert_eq!(console.active_view(), Some("dashboard"));
        assert_eq!(console.notice().map(|n| n.title), Some("Access Denied"));
    }

    #[test]
    fn logout_discards_workspace() {
        let mut console = signed_in(Role::Supervisor);
        console.select_view("history").unwrap();

        let actions = console.logout();
        assert_eq!(
            actions,
            vec![ConsoleAction::StopTicker, ConsoleAction::Logout, ConsoleAction::Render]
        );
        assert!(console.workspace().is_none());
        assert!(console.menu().is_empty());
        assert!(console.select_view("dashboard").is_err());

        assert!(console.logout().is_empty());
    }

    #[test]
    fn ticks_only_move_the_total_while_signed_in() {
        let mut console = Console::new(ConsoleConfig::default());
        assert!(console.handle(ConsoleEvent::Tick { delta: 1 }).is_empty());

        let mut console = signed_in(Role::Operator);
        console.handle(ConsoleEvent::Tick { delta: -1 });
        console.handle(ConsoleEvent::Tick { delta: -1 });
        assert_eq!(console.snapshot().unwrap().stats.total_trains, 22);
    }

    #[test]
    fn alerts_respect_capacity() {
        let config = ConsoleConfig { alert_capacity: 3, ..ConsoleConfig::default() };
        let mut console = Console::new(config);
        console.handle(ConsoleEvent::LoginSucceeded {
            session: Session { role: Role::Operator, started_at_secs: STARTED },
        });

        console.handle(ConsoleEvent::AlertRaised(Alert::new(
            Severity::Critical,
            "Track Obstruction",
            "Debris reported near Kota",
            STARTED + 30,
        )));

        let snapshot = console.snapshot().unwrap();
        assert_eq!(snapshot.alerts.len(), 3);
        assert_eq!(snapshot.alerts.latest().map(|a| a.title.as_str()), Some("Track Obstruction"));
    }

    #[test]
    fn store_failure_keeps_signed_out() {
        let mut console = Console::new(ConsoleConfig::default());
        console.submit(AuthForm::new("a@x.com", "pw", "admin"));

        console.handle(ConsoleEvent::LoginFailed {
            error: AuthError::Store(StoreError::Timeout(Duration::from_secs(10))),
        });

        assert!(!console.is_authenticated());
        assert!(!console.is_pending());
        assert_eq!(console.notice().map(|n| n.title), Some("Error"));
    }
}
