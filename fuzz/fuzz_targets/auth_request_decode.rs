//! Fuzz target for the auth route service.
//!
//! Feeds arbitrary bytes to both routes of a service whose store already
//! holds one account.
//!
//! # Invariants
//!
//! - Never panics, whatever the body
//! - Status is one of 200, 400, 409, 500
//! - The encoded reply always decodes again
//! - Only a 2xx carries a user
//! - A login reply never contains the stored secret

#![no_main]

use libfuzzer_sys::fuzz_target;
use signalbox_auth::{AuthService, Endpoint, MemoryCredentialStore};
use signalbox_core::{Credential, Role};

const SECRET: &str = "s3cret-never-echoed";

fuzz_target!(|data: &[u8]| {
    let Ok(rt) = tokio::runtime::Builder::new_current_thread().enable_time().build() else {
        return;
    };
    let store = MemoryCredentialStore::with_credentials([Credential::new(
        "op1@rail.test",
        SECRET,
        Role::Operator,
    )]);
    let service = AuthService::new(store);

    for endpoint in [Endpoint::Login, Endpoint::Register] {
        let response = rt.block_on(service.handle(endpoint, data));
        assert!(matches!(response.status, 200 | 400 | 409 | 500), "status {}", response.status);
        assert_eq!(response.body.user.is_some(), response.is_success());

        let raw = response.into_raw();
        let reply = raw.reply().expect("service replies must decode");
        if endpoint == Endpoint::Login {
            let text = String::from_utf8_lossy(&raw.body);
            assert!(!text.contains(SECRET), "secret echoed: {text}");
        }
        assert!(!reply.message().is_empty());
    }
});
