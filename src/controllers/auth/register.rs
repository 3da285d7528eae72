use actix_web::{post, web, HttpResponse, Result};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::Password;
use crate::controllers::auth::validate::{validate_password, validate_username};
use crate::controllers::{error_response, validation_message};
use crate::i18n::{Language, Message};
use crate::repository::{Repo, USERNAME_TAKEN};
use crate::util::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterParams {
    #[validate(custom(function = "validate_username"))]
    username: String,
    #[validate(custom(function = "validate_password"))]
    password: Password,
}

#[post("/register")]
#[tracing::instrument(skip(params, repo), fields(username = %params.username))]
pub async fn register(
    params: web::Json<RegisterParams>,
    repo: web::Data<Repo>,
    language: Language,
) -> Result<HttpResponse> {
    if let Err(e) = params.validate() {
        return Ok(ApiResponse::bad_request(validation_message(&e, language)));
    }

    let hash = match params.password.hash() {
        Ok(password_hash) => password_hash,
        Err(e) => return Ok(error_response(e, "Could not hash password")),
    };

    match repo.create_user(params.username.clone(), hash).await {
        Ok(user) => {
            tracing::info!(target = module_path!(), user_id = user.id, "User registered");
            Ok(ApiResponse::ok(Message::AccountCreated.text(language)))
        }
        Err(e) if e.to_string() == USERNAME_TAKEN => Ok(ApiResponse::conflict(
            Message::UsernameTaken.text(language),
        )),
        Err(e) => Ok(error_response(e, "User registration failed")),
    }
}
