//! Deterministic simulation harness for the Signalbox console.
//!
//! Seeded implementations of the environment and driver seams, so whole
//! console sessions replay identically from a seed under virtual time.
//!
//! # Model-Based Testing
//!
//! The `model` module applies generated [`Operation`]s to the real console
//! and to a reference [`ModelConsole`], and their observable states are
//! compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Use [`InvariantRegistry::standard()`] for every console invariant.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod scenario;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    ActiveViewInMenu, AlertFeedBounded, ConsoleSnapshot, Invariant, InvariantKind,
    InvariantRegistry, InvariantResult, MenuMatchesRole, SessionAgreement, SignedOutHasNoView,
    Violation,
};
pub use model::{ConsoleWorld, ModelConsole, Operation, USERS};
pub use scenario::{SimRuntime, WireStore, backing, sim_runtime, wire_store};
pub use sim_driver::{SimDriver, SimDriverError, Step};
pub use sim_env::{DEFAULT_START_SECS, SimEnv};
