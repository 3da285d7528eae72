use actix_web::{get, web, HttpResponse, Result};
use serde::Serialize;
use validator::Validate;

use crate::controllers::{irrigation::CropSoilParams, validation_message};
use crate::i18n::Language;
use crate::irrigation::{
    advisory,
    thresholds::{CatalogEntry, CROPS, SOILS},
};
use crate::util::ApiResponse;

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub crops: &'static [&'static str],
    pub soils: &'static [&'static str],
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Serialize)]
pub struct ThresholdResponse {
    pub crop_type: String,
    pub soil_type: String,
    pub min: i32,
    pub max: i32,
}

#[get("/catalog")]
#[tracing::instrument]
pub async fn catalog() -> HttpResponse {
    HttpResponse::Ok().json(Catalog {
        crops: &CROPS,
        soils: &SOILS,
        entries: crate::irrigation::thresholds::catalog(),
    })
}

/// Pairs outside the table report the unconstrained 0-100 range.
#[get("/thresholds")]
#[tracing::instrument]
pub async fn thresholds(
    query: web::Query<CropSoilParams>,
    language: Language,
) -> Result<HttpResponse> {
    if let Err(e) = query.validate() {
        return Ok(ApiResponse::bad_request(validation_message(&e, language)));
    }

    let threshold = crate::irrigation::thresholds::threshold(&query.crop_type, &query.soil_type);
    let query = query.into_inner();

    Ok(HttpResponse::Ok().json(ThresholdResponse {
        crop_type: query.crop_type,
        soil_type: query.soil_type,
        min: threshold.min,
        max: threshold.max,
    }))
}

#[get("/advice")]
#[tracing::instrument]
pub async fn advice(query: web::Query<CropSoilParams>, language: Language) -> Result<HttpResponse> {
    if let Err(e) = query.validate() {
        return Ok(ApiResponse::bad_request(validation_message(&e, language)));
    }

    Ok(HttpResponse::Ok().json(advisory::advice(&query.crop_type, &query.soil_type)))
}
