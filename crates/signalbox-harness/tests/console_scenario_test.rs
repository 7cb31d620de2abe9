//! End-to-end console scenarios under virtual time.
//!
//! Every scenario runs the production [`Runtime`] over the full credential
//! path (memory store, auth service, local transport, remote store) with a
//! scripted [`SimDriver`].
//!
//! # Oracle Pattern
//!
//! Scenarios end with oracle checks on:
//! - the console state after the run
//! - the frames captured at each render
//! - the credential records behind the wire

use std::time::Duration;

use async_trait::async_trait;
use signalbox_app::{ConsoleConfig, ConsoleInput, Runtime};
use signalbox_core::{
    AccessError, Alert, Credential, CredentialStore, Environment, Role, Severity, StoreError,
    draw_perturbation,
};
use signalbox_harness::{
    DEFAULT_START_SECS, InvariantRegistry, SimDriver, SimEnv, WireStore, backing, sim_runtime,
    wire_store,
};

const SEED: u64 = 0x5EED;

fn driver() -> SimDriver {
    SimDriver::new().with_invariants(InvariantRegistry::standard())
}

#[tokio::test(start_paused = true)]
async fn register_login_browse_logout() {
    let mut driver = driver();
    driver
        .input(ConsoleInput::ToggleMode)
        .submit("op1@rail.test", "pw1", "operator")
        .submit("op1@rail.test", "pw1", "operator")
        .select("users")
        .select("incidents")
        .input(ConsoleInput::Logout)
        .select("dashboard")
        .input(ConsoleInput::Quit);

    let mut runtime = sim_runtime(driver, SimEnv::with_seed(SEED), ConsoleConfig::default());
    runtime.run().await.unwrap();

    // Registration alone never signs in; the following login does.
    let frames = runtime.driver().frames();
    let first_signed_in = frames.iter().position(|f| f.role.is_some()).unwrap();
    assert_eq!(frames[first_signed_in].role, Some(Role::Operator));
    assert_eq!(frames[first_signed_in].active_view, Some("dashboard"));
    for excluded in ["users", "settings", "analytics", "history", "reports"] {
        assert!(!frames[first_signed_in].menu.contains(&excluded));
    }
    assert!(frames.iter().any(|f| f.active_view == Some("incidents")));

    // Oracle: signed out, nothing selectable, credential persisted
    let console = runtime.console();
    assert!(!console.is_authenticated());
    assert_eq!(runtime.gateway().sessions().session(), None);
    assert_eq!(console.notice().map(|n| n.title), Some("Access Denied"));
    assert!(backing(runtime.gateway().sessions().store()).contains("op1@rail.test"));
    assert!(runtime.driver().is_stopped());
}

#[tokio::test(start_paused = true)]
async fn select_view_after_logout_is_not_permitted() {
    let mut driver = driver();
    driver
        .input(ConsoleInput::ToggleMode)
        .submit("sup@rail.test", "pw", "supervisor")
        .submit("sup@rail.test", "pw", "supervisor")
        .input(ConsoleInput::Logout);

    let mut runtime = sim_runtime(driver, SimEnv::with_seed(SEED), ConsoleConfig::default());
    runtime.run().await.unwrap();

    let mut console = runtime.console().clone();
    assert_eq!(
        console.select_view("dashboard"),
        Err(AccessError::ViewNotPermitted { view: "dashboard".into() })
    );
}

#[tokio::test(start_paused = true)]
async fn wrong_role_is_rejected() {
    let mut driver = driver();
    driver
        .input(ConsoleInput::ToggleMode)
        .submit("op1@rail.test", "pw1", "operator")
        .submit("op1@rail.test", "pw1", "admin");

    let mut runtime = sim_runtime(driver, SimEnv::with_seed(SEED), ConsoleConfig::default());
    runtime.run().await.unwrap();

    let console = runtime.console();
    assert!(!console.is_authenticated());
    assert_eq!(console.notice().map(|n| n.title), Some("Login Failed"));
}

#[tokio::test(start_paused = true)]
async fn duplicate_registration_reported() {
    let mut driver = driver();
    driver
        .input(ConsoleInput::ToggleMode)
        .submit("a@rail.test", "one", "admin")
        .input(ConsoleInput::ToggleMode)
        .submit("a@rail.test", "two", "operator");

    let mut runtime = sim_runtime(driver, SimEnv::with_seed(SEED), ConsoleConfig::default());
    runtime.run().await.unwrap();

    let notice = runtime.console().notice().unwrap();
    assert_eq!(notice.title, "Registration Failed");
    assert_eq!(notice.detail, "User already exists");
    assert_eq!(backing(runtime.gateway().sessions().store()).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn blank_form_never_reaches_the_wire() {
    let mut driver = driver();
    driver.submit("", "", "");

    let mut runtime = sim_runtime(driver, SimEnv::with_seed(SEED), ConsoleConfig::default());
    runtime.run().await.unwrap();

    assert_eq!(runtime.console().notice().map(|n| n.title), Some("Missing Information"));
    assert!(backing(runtime.gateway().sessions().store()).is_empty());
}

#[tokio::test(start_paused = true)]
async fn ticks_follow_the_seeded_stream() {
    let mut driver = driver();
    driver
        .input(ConsoleInput::ToggleMode)
        .submit("op1@rail.test", "pw1", "operator")
        .submit("op1@rail.test", "pw1", "operator")
        .wait(Duration::from_secs(16));

    let mut runtime = sim_runtime(driver, SimEnv::with_seed(SEED), ConsoleConfig::default());
    runtime.run().await.unwrap();

    // Three ticks at 5s, 10s and 15s, drawn from the same seed
    let replay = SimEnv::with_seed(SEED);
    let expected =
        (0..3).fold(24i64, |total, _| (total + draw_perturbation(&replay)).max(0));

    let snapshot = runtime.console().snapshot().unwrap();
    assert_eq!(i64::from(snapshot.stats.total_trains), expected);
}

#[tokio::test(start_paused = true)]
async fn logout_stops_ticking() {
    let mut driver = driver();
    driver
        .input(ConsoleInput::ToggleMode)
        .submit("op1@rail.test", "pw1", "operator")
        .submit("op1@rail.test", "pw1", "operator")
        .input(ConsoleInput::Logout)
        .wait(Duration::from_secs(30));

    let mut runtime = sim_runtime(driver, SimEnv::with_seed(SEED), ConsoleConfig::default());
    runtime.run().await.unwrap();

    // Only the logout itself renders once signed out; no tick lands afterwards.
    let frames = runtime.driver().frames();
    let last_signed_in = frames.iter().rposition(|f| f.role.is_some()).unwrap();
    assert_eq!(frames.len(), last_signed_in + 2);
    assert_eq!(frames[last_signed_in].total_trains, Some(24));
}

#[tokio::test(start_paused = true)]
async fn alerts_stay_bounded() {
    let config = ConsoleConfig { alert_capacity: 4, ..ConsoleConfig::default() };
    let mut driver = driver();
    driver
        .input(ConsoleInput::ToggleMode)
        .submit("admin@rail.test", "pw", "admin")
        .submit("admin@rail.test", "pw", "admin");

    let env = SimEnv::with_seed(SEED);
    let mut runtime = sim_runtime(driver, env.clone(), config);
    runtime.run().await.unwrap();

    for n in 0..6 {
        env.advance_secs(60);
        let alert = Alert::new(Severity::Warning, format!("Alert {n}"), "", env.wall_clock_secs());
        runtime.raise_alert(alert).await.unwrap();
    }

    let snapshot = runtime.console().snapshot().unwrap();
    assert_eq!(snapshot.alerts.len(), 4);
    assert_eq!(snapshot.alerts.latest().map(|a| a.title.as_str()), Some("Alert 5"));
    assert_eq!(
        snapshot.alerts.latest().map(|a| a.age_label(DEFAULT_START_SECS + 360)),
        Some("just now".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn same_seed_same_frames() {
    async fn frames(seed: u64) -> Vec<Option<u32>> {
        let mut driver = driver();
        driver
            .input(ConsoleInput::ToggleMode)
            .submit("op@rail.test", "pw", "operator")
            .submit("op@rail.test", "pw", "operator")
            .wait(Duration::from_secs(60));

        let mut runtime = sim_runtime(driver, SimEnv::with_seed(seed), ConsoleConfig::default());
        runtime.run().await.unwrap();
        runtime.driver().frames().iter().map(|f| f.total_trains).collect()
    }

    assert_eq!(frames(7).await, frames(7).await);
}

#[tokio::test(start_paused = true)]
async fn render_failure_stops_the_runtime() {
    let mut driver = SimDriver::new().failing_after(2);
    driver.input(ConsoleInput::ToggleMode).input(ConsoleInput::ToggleMode);

    let mut runtime = sim_runtime(driver, SimEnv::with_seed(SEED), ConsoleConfig::default());
    assert!(runtime.run().await.is_err());
    assert_eq!(runtime.driver().remaining(), 0);
}

/// Store whose requests never complete.
struct StalledStore;

#[async_trait]
impl CredentialStore for StalledStore {
    async fn create(&self, _: &Credential) -> Result<(), StoreError> {
        std::future::pending().await
    }

    async fn find(&self, _: &str, _: &str, _: Role) -> Result<Option<Credential>, StoreError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_store_times_out() {
    let config = ConsoleConfig { request_timeout: Duration::from_secs(3), ..ConsoleConfig::default() };
    let mut driver = driver();
    driver.submit("a@rail.test", "pw", "admin");

    let mut runtime = Runtime::new(driver, StalledStore, SimEnv::with_seed(SEED), config);
    let started = tokio::time::Instant::now();
    runtime.run().await.unwrap();

    assert_eq!(started.elapsed(), Duration::from_secs(3));
    let console = runtime.console();
    assert!(!console.is_authenticated());
    assert!(!console.is_pending());
    assert_eq!(console.notice().map(|n| n.title), Some("Error"));
}

/// Wire store that answers every request after a fixed delay.
struct SlowStore {
    inner: WireStore,
    delay: Duration,
}

#[async_trait]
impl CredentialStore for SlowStore {
    async fn create(&self, credential: &Credential) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(credential).await
    }

    async fn find(
        &self,
        identifier: &str,
        secret: &str,
        role: Role,
    ) -> Result<Option<Credential>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find(identifier, secret, role).await
    }
}

#[tokio::test(start_paused = true)]
async fn request_in_flight_is_rendered() {
    let store = SlowStore {
        inner: wire_store([Credential::new("a@rail.test", "pw", Role::Admin)]),
        delay: Duration::from_secs(2),
    };
    let mut driver = driver();
    driver.submit("a@rail.test", "pw", "admin");

    let mut runtime = Runtime::new(driver, store, SimEnv::with_seed(SEED), ConsoleConfig::default());
    let started = tokio::time::Instant::now();
    runtime.run().await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(2));

    // Initial frame, the in-flight frame, then exactly one frame for the outcome
    let frames = runtime.driver().frames();
    let pending: Vec<bool> = frames.iter().map(|f| f.pending).collect();
    assert_eq!(pending, vec![false, true, false]);
    assert_eq!(frames[1].role, None);
    assert_eq!(frames[2].role, Some(Role::Admin));
}
