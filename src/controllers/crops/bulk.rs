use actix_web::{post, web, HttpResponse, Result};
use serde::Deserialize;
use validator::Validate;

use crate::auth::authenticated_user::AuthenticatedUser;
use crate::controllers::{error_response, validation_message};
use crate::crops::bulk::{self, BulkError};
use crate::i18n::{Language, Message};
use crate::repository::Repo;
use crate::util::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct BulkParams {
    /// One crop per line: `name, season, yield`.
    pub text: String,
}

#[post("/bulk")]
#[tracing::instrument(skip(params, repo))]
pub async fn add_crops(
    params: web::Json<BulkParams>,
    repo: web::Data<Repo>,
    user: AuthenticatedUser,
    language: Language,
) -> Result<HttpResponse> {
    let crops = match bulk::parse(&params.text, user.id) {
        Ok(crops) => crops,
        Err(BulkError::Empty) => {
            return Ok(ApiResponse::bad_request(
                Message::NoCropsInBulkInput.text(language),
            ))
        }
        Err(e) => return Ok(ApiResponse::bad_request(e.to_string())),
    };

    for crop in &crops {
        if let Err(e) = crop.validate() {
            return Ok(ApiResponse::bad_request(validation_message(&e, language)));
        }
    }

    match repo.create_crops(crops).await {
        Ok(count) => Ok(ApiResponse::ok(Message::CropsAdded(count).text(language))),
        Err(e) => Ok(error_response(e, "Could not add crops")),
    }
}
