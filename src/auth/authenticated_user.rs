use actix_web::{dev, error, http::header::HeaderValue, web, Error, FromRequest, HttpRequest};
use futures::future::err;
use jsonwebtoken::{decode, DecodingKey, Validation};
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

use crate::auth::claim::{Claim, TOKEN_LEEWAY_SECONDS};
use crate::config::Settings;
use crate::irrigation::Irrigator;
use crate::repository::Repo;

/// The caller behind a valid bearer token.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub session_id: Uuid,
    /// Token expiry as a unix timestamp.
    pub expires_at: i64,
}

/// Token contents before the user has been confirmed against the database.
#[derive(Debug, PartialEq)]
struct TokenIdentity {
    user_id: i32,
    session_id: Uuid,
    expires_at: i64,
}

type AuthFuture = <AuthenticatedUser as FromRequest>::Future;

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    #[tracing::instrument(skip(req, _payload))]
    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        let (settings, repo, irrigator) = match (
            req.app_data::<web::Data<Settings>>(),
            req.app_data::<web::Data<Repo>>(),
            req.app_data::<web::Data<Irrigator>>(),
        ) {
            (Some(settings), Some(repo), Some(irrigator)) => (settings, repo, irrigator.clone()),
            _ => {
                tracing::error!(
                    target = module_path!(),
                    "Settings, repository or irrigator missing from app data"
                );
                return Box::pin(err(error::ErrorInternalServerError(
                    "Internal server error",
                )));
            }
        };

        let auth_header = req.headers().get("Authorization");
        let identity = match identity_from_header(auth_header, &settings.jwt_secret) {
            Ok(identity) => identity,
            Err(e) => return Box::pin(err(e)),
        };

        validate_user(identity, *repo.get_ref(), irrigator)
    }
}

fn identity_from_header(
    auth_header: Option<&HeaderValue>,
    jwt_secret: &str,
) -> Result<TokenIdentity, Error> {
    let header = auth_header.ok_or_else(|| error::ErrorUnauthorized("Missing authentication"))?;

    let encoded_token = header
        .to_str()
        .map_err(|_| error::ErrorUnauthorized("Invalid token"))?
        .trim_start_matches("Bearer ")
        .to_string();

    parse_token(&encoded_token, jwt_secret)
}

fn parse_token(token: &str, jwt_secret: &str) -> Result<TokenIdentity, Error> {
    let mut validation = Validation::default();
    validation.leeway = TOKEN_LEEWAY_SECONDS as u64;

    let token = decode::<Claim>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| error::ErrorUnauthorized("Invalid token"))?;

    let user_id = token
        .claims
        .sub
        .parse::<i32>()
        .map_err(|_| error::ErrorUnauthorized("Invalid token"))?;
    let session_id = Uuid::parse_str(&token.claims.sid)
        .map_err(|_| error::ErrorUnauthorized("Invalid token"))?;

    Ok(TokenIdentity {
        user_id,
        session_id,
        expires_at: token.claims.exp as i64,
    })
}

/// Rejects logged-out sessions, then confirms the user still exists.
fn validate_user(
    identity: TokenIdentity,
    repo: Repo,
    irrigator: web::Data<Irrigator>,
) -> AuthFuture {
    Box::pin(async move {
        if irrigator.is_ended(identity.session_id).await {
            return Err(error::ErrorUnauthorized("Session has ended"));
        }

        match repo.user_by_id(identity.user_id).await {
            Ok(Some(user)) => Ok(AuthenticatedUser {
                id: user.id,
                username: user.username,
                session_id: identity.session_id,
                expires_at: identity.expires_at,
            }),
            Ok(None) => Err(error::ErrorUnauthorized("Invalid token")),
            Err(e) => {
                tracing::error!(
                    target = module_path!(),
                    error = e.to_string(),
                    "Could not look up token user"
                );
                Err(error::ErrorInternalServerError("Internal server error"))
            }
        }
    })
}
