//! Authentication test helpers
//!
//! Session tokens signed with the test server's secret. Without a database
//! the auth middleware only checks the signature, so these are enough to
//! reach protected routes.

use safetrack::backend::auth::sessions::{create_token, Role};
use safetrack::backend::server::state::AppState;
use safetrack::shared::ProducerId;
use uuid::Uuid;

/// A signed-in test account
pub struct TestSession {
    pub account_id: Uuid,
    pub producer: ProducerId,
    pub token: String,
}

fn session(state: &AppState, account_id: Uuid, role: Role, producer: ProducerId) -> TestSession {
    let token = create_token(&state.config.jwt_secret, account_id, role, &producer)
        .expect("Failed to create test token");

    TestSession {
        account_id,
        producer,
        token,
    }
}

/// Session of a child reporting under `producer`
pub fn child_session(state: &AppState, producer: &str) -> TestSession {
    session(state, Uuid::new_v4(), Role::Child, ProducerId::from(producer))
}

/// Session of a parent watching `producer`
pub fn parent_session(state: &AppState, producer: &str) -> TestSession {
    session(state, Uuid::new_v4(), Role::Parent, ProducerId::from(producer))
}

/// Token signed with a secret the server does not know
pub fn forged_token() -> String {
    create_token(
        "not-the-server-secret",
        Uuid::new_v4(),
        Role::Child,
        &ProducerId::from("parent:42"),
    )
    .expect("Failed to create forged token")
}
