use actix_web::{get, HttpResponse};

use crate::util::ApiResponse;

#[get("/health")]
pub async fn health() -> HttpResponse {
    ApiResponse::ok("ok".to_string())
}
