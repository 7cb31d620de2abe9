//! Fuzz target for view selection.
//!
//! Arbitrary view ids against a router for each role.
//!
//! # Invariants
//!
//! - The active view is always in the role's resolved menu
//! - A refused selection leaves the active view unchanged
//! - A selection succeeds exactly when the capability permits the role

#![no_main]

use libfuzzer_sys::fuzz_target;
use signalbox_core::{Role, ViewRouter, find_capability};

fuzz_target!(|input: (u8, Vec<String>)| {
    let (role, views) = input;
    let role = Role::ALL[usize::from(role) % Role::ALL.len()];
    let Ok(mut router) = ViewRouter::new(role) else {
        panic!("every role has a dashboard");
    };

    for view in &views {
        let before = router.active_view();
        let permitted = find_capability(view).is_some_and(|c| c.permits(role));

        match router.select_view(view) {
            Ok(()) => {
                assert!(permitted, "{role} opened {view:?}");
                assert_eq!(router.active_view(), view.as_str());
            },
            Err(_) => {
                assert!(!permitted, "{role} refused {view:?}");
                assert_eq!(router.active_view(), before);
            },
        }
        assert!(router.menu().iter().any(|c| c.id == router.active_view()));
    }
});
