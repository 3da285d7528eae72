use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TOKEN_EXPIRATION_TIME_SECONDS: i64 = 60 * 60 * 24;
/// Clock skew allowed past `exp` when validating a token.
pub const TOKEN_LEEWAY_SECONDS: i64 = 60;

/// Bearer token payload. `sid` names the login session that owns irrigation state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claim {
    pub sub: String,
    pub sid: String,
    pub iat: u64,
    pub exp: u64,
}

pub fn create_token(
    user_id: i32,
    session_id: Uuid,
    private_key: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();

    encode(
        &Header::default(),
        &Claim {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            iat: now as u64,
            exp: (now + TOKEN_EXPIRATION_TIME_SECONDS) as u64,
        },
        &EncodingKey::from_secret(private_key.as_bytes()),
    )
}
