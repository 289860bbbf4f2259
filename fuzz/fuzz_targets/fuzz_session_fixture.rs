#![no_main]
use connection_status::auth::AuthorizationSession;
use connection_status::{connection_status, ConnectionStatusRequest};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

// Fixture text is either rejected or yields a reply naming each resource once
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(session) = AuthorizationSession::from_toml_str(text) else {
        return;
    };

    let reply = connection_status(&session, &ConnectionStatusRequest::new(true))
        .expect("a loaded session resolves every user it lists");

    let privileges = reply
        .auth_info
        .authenticated_user_privileges
        .expect("privileges were requested");
    let mut seen = HashSet::new();
    for privilege in &privileges {
        assert!(seen.insert(privilege.resource().clone()));
    }
});
