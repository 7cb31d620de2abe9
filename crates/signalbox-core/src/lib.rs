//! Core domain for the Signalbox operations console.
//!
//! Pure state machines and contracts behind the console: who is signed in,
//! which panels their role may open, which panel is active, and the live
//! operational picture (trains, aggregate counters, alert feed) shown on the
//! dashboard.
//!
//! # Components
//!
//! - [`SessionManager`]: single-session lifecycle over a [`CredentialStore`]
//! - [`resolve_menu`]: role to capability resolution over the static table
//! - [`ViewRouter`]: single-selection state over the resolved menu
//! - [`OperationalState`]: trains, derived stats and the bounded alert feed
//! - [`Environment`]: wall clock and randomness, swappable for simulation
//!
//! Only the credential round trip suspends. Everything else is synchronous
//! and driven by the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
pub mod env;
pub mod error;
pub mod operations;
pub mod role;
pub mod router;
pub mod session;
pub mod store;

pub use access::{
    CAPABILITIES, DASHBOARD, MenuCapability, find_capability, resolve_menu, resolve_menu_for,
};
pub use env::Environment;
pub use error::{AccessError, AuthError, ErrorCategory, Field, StoreError, ValidationError};
pub use operations::{
    Alert, AlertFeed, DEFAULT_ALERT_CAPACITY, OperationalState, OperationalStats, Severity,
    Snapshot, TrainState, TrainStatus, draw_perturbation,
};
pub use role::Role;
pub use router::{PLACEHOLDER_DETAIL, Panel, ViewRouter};
pub use session::{
    DEFAULT_REQUEST_TIMEOUT, PendingRequest, Session, SessionManager, SessionState,
};
pub use store::{Credential, CredentialStore};
