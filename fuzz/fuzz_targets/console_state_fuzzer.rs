//! Fuzz target for the console state machine.
//!
//! Applies arbitrary operation sequences to the real console (over the full
//! credential wire path) and to the reference model.
//!
//! # Invariants
//!
//! - Every standard console invariant holds after every step
//! - Signed-in role and active view agree with the model
//! - No request is left pending once an operation completes

#![no_main]

use libfuzzer_sys::fuzz_target;
use signalbox_harness::{ConsoleWorld, InvariantRegistry, ModelConsole, Operation};

fuzz_target!(|input: (u64, Vec<Operation>)| {
    let (seed, ops) = input;
    let Ok(rt) = tokio::runtime::Builder::new_current_thread().enable_time().build() else {
        return;
    };
    let registry = InvariantRegistry::standard();

    rt.block_on(async {
        let mut world = ConsoleWorld::new(seed);
        let mut model = ModelConsole::new();

        for (step, op) in ops.iter().enumerate() {
            world.apply(op).await;
            model.apply(op);

            registry.assert_all(&world.snapshot(), &format!("after step {step} {op:?}"));
            assert_eq!(world.console().role(), model.signed_in(), "role after {op:?}");
            assert_eq!(world.console().active_view(), model.active_view(), "view after {op:?}");
            assert!(!world.console().is_pending());
        }
    });
});
