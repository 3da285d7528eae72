use actix_web::{delete, get, patch, post, web, HttpResponse, Result};
use serde::Deserialize;
use validator::Validate;

use crate::auth::authenticated_user::AuthenticatedUser;
use crate::controllers::{crops::CropResponse, error_response, validation_message};
use crate::i18n::{Language, Message};
use crate::repository::{
    models::crop::{Crop, NewCrop, UpdateCropParams},
    Repo,
};
use crate::util::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

#[get("")]
#[tracing::instrument(skip(repo))]
pub async fn crops(repo: web::Data<Repo>) -> Result<HttpResponse> {
    match repo.crops().await {
        Ok(crops) => Ok(HttpResponse::Ok().json(crops)),
        Err(e) => Ok(error_response(e, "Could not list crops")),
    }
}

#[post("")]
#[tracing::instrument(skip(params, repo))]
pub async fn add_crop(
    params: web::Json<NewCrop>,
    repo: web::Data<Repo>,
    user: AuthenticatedUser,
    language: Language,
) -> Result<HttpResponse> {
    let mut new_crop = params.into_inner();
    if let Err(e) = new_crop.validate() {
        return Ok(ApiResponse::bad_request(validation_message(&e, language)));
    }
    new_crop.added_by = user.id;

    match repo.create_crop(new_crop).await {
        Ok(crop) => Ok(HttpResponse::Created().json(CropResponse {
            message: Message::CropAdded(crop.name.clone()).text(language),
            crop,
        })),
        Err(e) => Ok(error_response(e, "Could not add crop")),
    }
}

/// A blank keyword lists every crop.
#[get("/search")]
#[tracing::instrument(skip(repo))]
pub async fn search_crops(
    query: web::Query<SearchParams>,
    repo: web::Data<Repo>,
) -> Result<HttpResponse> {
    let keyword = query.into_inner().keyword.unwrap_or_default();
    let result = if keyword.trim().is_empty() {
        repo.crops().await
    } else {
        repo.search_crops(keyword.trim().to_string()).await
    };

    match result {
        Ok(found) => Ok(HttpResponse::Ok().json(found)),
        Err(e) => Ok(error_response(e, "Could not search crops")),
    }
}

#[patch("/{id}")]
#[tracing::instrument(skip(params, repo))]
pub async fn update_crop(
    path: web::Path<i32>,
    params: web::Json<UpdateCropParams>,
    repo: web::Data<Repo>,
    user: AuthenticatedUser,
    language: Language,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let params = params.into_inner();
    if let Err(e) = params.validate() {
        return Ok(ApiResponse::bad_request(validation_message(&e, language)));
    }

    if let Err(response) = owned_crop(id, &user, *repo.get_ref(), language).await {
        return Ok(response);
    }

    match repo.update_crop(id, params).await {
        Ok(Some(crop)) => Ok(HttpResponse::Ok().json(CropResponse {
            message: Message::CropUpdated(id).text(language),
            crop,
        })),
        Ok(None) => Ok(ApiResponse::not_found(
            Message::CropNotFound(id).text(language),
        )),
        Err(e) => Ok(error_response(e, "Could not update crop")),
    }
}

#[delete("/{id}")]
#[tracing::instrument(skip(repo))]
pub async fn delete_crop(
    path: web::Path<i32>,
    repo: web::Data<Repo>,
    user: AuthenticatedUser,
    language: Language,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    if let Err(response) = owned_crop(id, &user, *repo.get_ref(), language).await {
        return Ok(response);
    }

    match repo.delete_crop(id).await {
        Ok(true) => Ok(ApiResponse::ok(Message::CropDeleted(id).text(language))),
        Ok(false) => Ok(ApiResponse::not_found(
            Message::CropNotFound(id).text(language),
        )),
        Err(e) => Ok(error_response(e, "Could not delete crop")),
    }
}

/// Loads the crop and checks that the caller added it.
async fn owned_crop(
    id: i32,
    user: &AuthenticatedUser,
    repo: Repo,
    language: Language,
) -> Result<Crop, HttpResponse> {
    match repo.crop_by_id(id).await {
        Ok(Some(crop)) if crop.added_by == user.id => Ok(crop),
        Ok(Some(_)) => Err(ApiResponse::forbidden(
            Message::CropNotOwned(id).text(language),
        )),
        Ok(None) => Err(ApiResponse::not_found(
            Message::CropNotFound(id).text(language),
        )),
        Err(e) => Err(error_response(e, "Could not look up crop")),
    }
}
