use chrono::Utc;
use rstest::fixture;
use uuid::Uuid;

use crate::auth::{authenticated_user::AuthenticatedUser, claim::TOKEN_EXPIRATION_TIME_SECONDS};

fn farmer(expires_at: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        id: 1,
        username: "farmer1".into(),
        session_id: Uuid::new_v4(),
        expires_at,
    }
}

#[fixture]
pub fn user() -> AuthenticatedUser {
    farmer(Utc::now().timestamp() + TOKEN_EXPIRATION_TIME_SECONDS)
}

/// A login whose token ran out a day ago.
#[fixture]
pub fn expired_user() -> AuthenticatedUser {
    farmer(Utc::now().timestamp() - TOKEN_EXPIRATION_TIME_SECONDS)
}
