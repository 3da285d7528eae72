use actix_web::{get, post, web, HttpResponse, Result};
use serde::Deserialize;
use validator::Validate;

use crate::auth::authenticated_user::AuthenticatedUser;
use crate::controllers::{irrigation::CropSoilParams, validation_message};
use crate::i18n::{Language, Message};
use crate::irrigation::{CropSoil, IrrigationError, Irrigator};
use crate::util::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct StartParams {
    #[validate(length(min = 1, max = 50, message = "Crop type is required."))]
    pub crop_type: String,
    #[validate(length(min = 1, max = 50, message = "Soil type is required."))]
    pub soil_type: String,
    /// Checked against the crop/soil range after the completed-set guard.
    pub moisture_level: i32,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub crop_type: Option<String>,
    pub soil_type: Option<String>,
}

/// Status of one key when both names are given, otherwise every key this session touched.
#[get("/status")]
#[tracing::instrument(skip(irrigator))]
pub async fn status(
    query: web::Query<StatusParams>,
    irrigator: web::Data<Irrigator>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    match (&query.crop_type, &query.soil_type) {
        (Some(crop_type), Some(soil_type)) => {
            let key = CropSoil::new(crop_type, soil_type);
            let status = irrigator.status(&user, &key).await;
            Ok(HttpResponse::Ok().json(status))
        }
        _ => Ok(HttpResponse::Ok().json(irrigator.statuses(user.session_id).await)),
    }
}

#[post("/start")]
#[tracing::instrument(skip(irrigator))]
pub async fn start(
    params: web::Json<StartParams>,
    irrigator: web::Data<Irrigator>,
    user: AuthenticatedUser,
    language: Language,
) -> Result<HttpResponse> {
    if let Err(e) = params.validate() {
        return Ok(ApiResponse::bad_request(validation_message(&e, language)));
    }

    let key = CropSoil::new(&params.crop_type, &params.soil_type);
    match irrigator.start(&user, key, params.moisture_level).await {
        Ok(started) => Ok(HttpResponse::Accepted().json(started.status)),
        Err(IrrigationError::AlreadyIrrigated { crop, soil }) => Ok(ApiResponse::conflict(
            Message::AlreadyIrrigated { crop, soil }.text(language),
        )),
        Err(IrrigationError::CycleInProgress) => Ok(ApiResponse::conflict(
            Message::CycleInProgress.text(language),
        )),
        Err(IrrigationError::OutOfRange { min, max, .. }) => Ok(ApiResponse::bad_request(
            Message::MoistureOutOfRange { min, max }.text(language),
        )),
    }
}

/// Stopping a key that is not running reports its status unchanged.
#[post("/stop")]
#[tracing::instrument(skip(irrigator))]
pub async fn stop(
    params: web::Json<CropSoilParams>,
    irrigator: web::Data<Irrigator>,
    user: AuthenticatedUser,
    language: Language,
) -> Result<HttpResponse> {
    if let Err(e) = params.validate() {
        return Ok(ApiResponse::bad_request(validation_message(&e, language)));
    }

    let key_status = irrigator.stop(&user, &params.key()).await;

    Ok(HttpResponse::Ok().json(key_status))
}

#[post("/reset")]
#[tracing::instrument(skip(irrigator))]
pub async fn reset(
    params: web::Json<CropSoilParams>,
    irrigator: web::Data<Irrigator>,
    user: AuthenticatedUser,
    language: Language,
) -> Result<HttpResponse> {
    if let Err(e) = params.validate() {
        return Ok(ApiResponse::bad_request(validation_message(&e, language)));
    }

    let key_status = irrigator.reset(&user, &params.key()).await;

    Ok(HttpResponse::Ok().json(key_status))
}
