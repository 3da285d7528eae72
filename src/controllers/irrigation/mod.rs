use actix_web::web::{self, ServiceConfig};
use serde::Deserialize;
use validator::Validate;

use crate::irrigation::CropSoil;

pub mod cycle;
pub mod history;
pub mod reference;

/// Crop/soil selection shared by the irrigation endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct CropSoilParams {
    #[validate(length(min = 1, max = 50, message = "Crop type is required."))]
    pub crop_type: String,
    #[validate(length(min = 1, max = 50, message = "Soil type is required."))]
    pub soil_type: String,
}

impl CropSoilParams {
    pub fn key(&self) -> CropSoil {
        CropSoil::new(&self.crop_type, &self.soil_type)
    }
}

pub fn irrigation_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/irrigation")
            .service(reference::catalog)
            .service(reference::thresholds)
            .service(reference::advice)
            .service(cycle::status)
            .service(cycle::start)
            .service(cycle::stop)
            .service(cycle::reset)
            .service(history::history)
            .service(history::summary),
    );
}
