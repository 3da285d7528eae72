use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, web, HttpResponse, Result};

use crate::controllers::error_response;
use crate::crops::analytics::{analyze, AnalyticsFilter};
use crate::crops::export::{self, ExportError, CSV_CONTENT_TYPE, XLSX_CONTENT_TYPE};
use crate::i18n::{Language, Message};
use crate::repository::{models::crop::Crop, Repo};
use crate::util::ApiResponse;

#[get("/analytics")]
#[tracing::instrument(skip(repo))]
pub async fn analytics(
    filter: web::Query<AnalyticsFilter>,
    repo: web::Data<Repo>,
) -> Result<HttpResponse> {
    match repo.crops().await {
        Ok(crops) => Ok(HttpResponse::Ok().json(analyze(crops, &filter))),
        Err(e) => Ok(error_response(e, "Could not load crops for analytics")),
    }
}

#[get("/export/csv")]
#[tracing::instrument(skip(repo))]
pub async fn export_csv(repo: web::Data<Repo>, language: Language) -> Result<HttpResponse> {
    download(*repo.get_ref(), language, "crops.csv", CSV_CONTENT_TYPE, export::to_csv).await
}

#[get("/export/xlsx")]
#[tracing::instrument(skip(repo))]
pub async fn export_xlsx(repo: web::Data<Repo>, language: Language) -> Result<HttpResponse> {
    download(*repo.get_ref(), language, "crops.xlsx", XLSX_CONTENT_TYPE, export::to_xlsx).await
}

async fn download<F>(
    repo: Repo,
    language: Language,
    filename: &str,
    content_type: &'static str,
    render: F,
) -> Result<HttpResponse>
where
    F: Fn(&[Crop], Language) -> Result<Vec<u8>, ExportError>,
{
    let crops = match repo.crops().await {
        Ok(crops) => crops,
        Err(e) => return Ok(error_response(e, "Could not load crops for export")),
    };

    match render(&crops, language) {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type(content_type)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename.to_string())],
            })
            .body(bytes)),
        Err(ExportError::NoData) => Ok(ApiResponse::not_found(
            Message::NoCropsForExport.text(language),
        )),
        Err(e) => Ok(error_response(e.into(), "Could not render export")),
    }
}
