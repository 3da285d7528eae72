use actix_identity::Identity;
use actix_web::{post, web, HttpMessage, HttpRequest, HttpResponse, Result};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{claim::create_token, password::Password, REQUIRED_FIELDS};
use crate::config::Settings;
use crate::controllers::error_response;
use crate::i18n::{Language, Message};
use crate::repository::Repo;
use crate::util::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct LoginParams {
    username: String,
    password: Password,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[post("/login")]
#[tracing::instrument(skip(request, params, repo, settings), fields(username = %params.username))]
pub async fn login(
    request: HttpRequest,
    params: web::Json<LoginParams>,
    repo: web::Data<Repo>,
    settings: web::Data<Settings>,
    language: Language,
) -> Result<HttpResponse> {
    let LoginParams { username, password } = params.into_inner();
    if username.trim().is_empty() || password.is_empty() {
        return Ok(ApiResponse::bad_request(REQUIRED_FIELDS.to_string()));
    }

    let user = match repo.user_by_username(username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(ApiResponse::unauthorized(
                Message::InvalidCredentials.text(language),
            ))
        }
        Err(e) => return Ok(error_response(e, "Could not look up user")),
    };

    if !password.matches(&user.password_hash) {
        return Ok(ApiResponse::unauthorized(
            Message::InvalidCredentials.text(language),
        ));
    }

    // Every login starts a fresh irrigation session.
    let session_id = Uuid::new_v4();

    if let Err(e) = Identity::login(&request.extensions(), session_id.to_string()) {
        return Ok(error_response(anyhow!(e), "Could not log identity in"));
    }

    let token = match create_token(user.id, session_id, &settings.jwt_secret) {
        Ok(token) => token,
        Err(e) => return Ok(error_response(anyhow!(e), "Could not create token")),
    };

    tracing::info!(target = module_path!(), user_id = user.id, "User logged in");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        username: user.username,
    }))
}
