//! Model-based tests comparing the real console against the reference model.
//!
//! Random operation sequences are decoded from raw bytes with `arbitrary`, the
//! same way the fuzz target builds them, and applied to both sides.

use arbitrary::{Arbitrary, Unstructured};
use proptest::prelude::*;
use signalbox_auth::ChaoticCredentialStore;
use signalbox_core::{AuthError, Role, SessionManager};
use signalbox_harness::{
    ConsoleWorld, InvariantRegistry, ModelConsole, Operation, SimEnv, backing, wire_store,
};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
        .block_on(future)
}

fn decode(bytes: &[u8]) -> Vec<Operation> {
    let mut input = Unstructured::new(bytes);
    Vec::<Operation>::arbitrary(&mut input).unwrap_or_default()
}

async fn run_model(seed: u64, ops: &[Operation]) -> Result<(), TestCaseError> {
    let registry = InvariantRegistry::standard();
    let mut world = ConsoleWorld::new(seed);
    let mut model = ModelConsole::new();

    for (step, op) in ops.iter().enumerate() {
        world.apply(op).await;
        model.apply(op);

        let checked = registry.check_all(&world.snapshot());
        prop_assert!(checked.is_ok(), "step {step} {op:?}: {checked:?}");

        prop_assert_eq!(world.console().role(), model.signed_in(), "role after step {} {:?}", step, op);
        prop_assert_eq!(
            world.console().active_view(),
            model.active_view(),
            "view after step {} {:?}",
            step,
            op
        );
        prop_assert!(!world.console().is_pending());
    }

    prop_assert_eq!(backing(world.gateway().sessions().store()).len(), model.registered());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_console_matches_model(
        seed in any::<u64>(),
        bytes in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let ops = decode(&bytes);
        block_on(run_model(seed, &ops))?;
    }
}

#[test]
fn scripted_session_matches_model() {
    let ops = [
        Operation::Login { user: 0, role: 2, wrong_secret: false },
        Operation::Register { user: 0, role: 2 },
        Operation::Register { user: 0, role: 0 },
        Operation::Login { user: 0, role: 2, wrong_secret: true },
        Operation::Login { user: 0, role: 2, wrong_secret: false },
        Operation::SelectView { view: 0 },
        Operation::Tick,
        Operation::RaiseAlert { severity: 2 },
        Operation::SelectView { view: 255 },
        Operation::Logout,
        Operation::SelectView { view: 0 },
    ];

    block_on(run_model(1, &ops)).unwrap();
}

#[test]
fn login_replaces_session() {
    block_on(async {
        let mut world = ConsoleWorld::new(3);
        let mut model = ModelConsole::new();
        let ops = [
            Operation::Register { user: 0, role: 0 },
            Operation::Register { user: 1, role: 1 },
            Operation::Login { user: 0, role: 0, wrong_secret: false },
            Operation::Login { user: 1, role: 1, wrong_secret: false },
        ];
        for op in &ops {
            world.apply(op).await;
            model.apply(op);
        }

        assert_eq!(world.console().role(), model.signed_in());
        assert_eq!(world.gateway().sessions().role(), world.console().role());
    });
}

/// Faults injected under the wire must surface as store errors and never
/// authenticate anyone.
#[test]
fn injected_faults_never_authenticate() {
    block_on(async {
        let store = ChaoticCredentialStore::with_seed(wire_store(Vec::new()), 1.0, 11);
        let mut sessions = SessionManager::new(store, SimEnv::with_seed(11));

        let registered = sessions.register("a@rail.test", "pw", "admin").await;
        assert!(matches!(registered, Err(AuthError::Store(_))));

        let login = sessions.login("a@rail.test", "pw", "admin").await;
        assert!(matches!(login, Err(AuthError::Store(_))));
        assert_eq!(sessions.role(), None::<Role>);
        assert_eq!(sessions.store().injected_count(), 2);
        assert!(backing(sessions.store().inner()).is_empty());
    });
}

#[test]
fn partial_faults_keep_store_consistent() {
    block_on(async {
        let store = ChaoticCredentialStore::with_seed(wire_store(Vec::new()), 0.5, 99);
        let mut sessions = SessionManager::new(store, SimEnv::with_seed(99));

        let mut created = 0;
        for n in 0..40 {
            let identifier = format!("user{n}@rail.test");
            match sessions.register(&identifier, "pw", "operator").await {
                Ok(()) => created += 1,
                Err(err) => assert!(err.is_transient(), "unexpected {err:?}"),
            }
        }

        let injected = sessions.store().injected_count();
        assert!(injected > 0);
        assert_eq!(created + injected, 40);
        assert_eq!(backing(sessions.store().inner()).len(), created);
    });
}
