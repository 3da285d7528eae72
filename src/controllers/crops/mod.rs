use actix_web::web::{self, ServiceConfig};
use serde::{Deserialize, Serialize};

use crate::repository::models::crop::Crop;

pub mod bulk;
pub mod registry;
pub mod reports;

/// A mutated crop along with the confirmation text shown to the farmer.
#[derive(Debug, Deserialize, Serialize)]
pub struct CropResponse {
    pub message: String,
    pub crop: Crop,
}

pub fn crop_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/crops")
            .service(registry::crops)
            .service(registry::add_crop)
            .service(registry::search_crops)
            .service(registry::update_crop)
            .service(registry::delete_crop)
            .service(bulk::add_crops)
            .service(reports::analytics)
            .service(reports::export_csv)
            .service(reports::export_xlsx),
    );
}
