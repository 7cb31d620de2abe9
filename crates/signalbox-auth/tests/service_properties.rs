//! Property-based tests for the auth routes.
//!
//! Requests are generated from arbitrary `{email, password, role}` triples,
//! including empty fields and unknown roles, and sent to both routes.

use proptest::prelude::*;
use signalbox_auth::{
    AuthRequest, AuthService, Endpoint, MemoryCredentialStore,
    wire::{STATUS_BAD_REQUEST, STATUS_CONFLICT, STATUS_INTERNAL, STATUS_OK},
};
use signalbox_core::Role;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(future)
}

/// Emails never contain `-`, so a secret can't appear inside one by chance.
fn arbitrary_email() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,8}@rail\\.test"]
}

fn arbitrary_secret() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "pw-[A-Za-z0-9]{1,12}"]
}

/// Known wire names weighted against arbitrary lowercase words.
fn arbitrary_role() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(Role::ALL.to_vec()).prop_map(|role| role.as_str().to_string()),
        1 => "[a-z]{0,10}",
    ]
}

fn arbitrary_request() -> impl Strategy<Value = AuthRequest> {
    (arbitrary_email(), arbitrary_secret(), arbitrary_role())
        .prop_map(|(email, password, role)| AuthRequest::new(email, password, role))
}

fn is_complete(request: &AuthRequest) -> bool {
    !request.email.is_empty()
        && !request.password.is_empty()
        && request.role.parse::<Role>().is_ok()
}

#[test]
fn prop_routes_answer_known_statuses_without_secrets() {
    proptest!(|(request in arbitrary_request(), endpoint in prop_oneof![Just(Endpoint::Login), Just(Endpoint::Register)])| {
        let service = AuthService::new(MemoryCredentialStore::new());
        let body = request.to_json().unwrap();

        let response = block_on(service.handle(endpoint, &body));

        // PROPERTY: Only the documented statuses are ever produced
        prop_assert!(
            [STATUS_OK, STATUS_BAD_REQUEST, STATUS_CONFLICT, STATUS_INTERNAL]
                .contains(&response.status),
            "unexpected status {}",
            response.status
        );

        // PROPERTY: A user is returned exactly on success
        prop_assert_eq!(response.body.user.is_some(), response.is_success());

        // PROPERTY: The secret never travels back
        let raw = response.into_raw();
        let text = String::from_utf8(raw.body).unwrap();
        if !request.password.is_empty() {
            prop_assert!(!text.contains(&request.password), "secret echoed in {}", text);
        }
    });
}

#[test]
fn prop_register_then_login_succeeds_for_complete_requests() {
    proptest!(|(request in arbitrary_request())| {
        let service = AuthService::new(MemoryCredentialStore::new());
        let body = request.to_json().unwrap();

        let registered = block_on(service.handle(Endpoint::Register, &body));
        let logged_in = block_on(service.handle(Endpoint::Login, &body));

        // PROPERTY: Both succeed iff every field is present and the role is known
        prop_assert_eq!(registered.is_success(), is_complete(&request));
        prop_assert_eq!(logged_in.is_success(), is_complete(&request));
        prop_assert_eq!(service.store().len(), usize::from(is_complete(&request)));

        // PROPERTY: A second registration of the same email conflicts
        if is_complete(&request) {
            let again = block_on(service.handle(Endpoint::Register, &body));
            prop_assert_eq!(again.status, STATUS_CONFLICT);
        }
    });
}
