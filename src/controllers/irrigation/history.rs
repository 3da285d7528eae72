use actix_web::{get, web, HttpResponse, Result};
use serde::Deserialize;

use crate::auth::authenticated_user::AuthenticatedUser;
use crate::controllers::error_response;
use crate::irrigation::history::summarize;
use crate::repository::Repo;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;
/// Rows read to build the summary charts.
const SUMMARY_LIMIT: i64 = 10_000;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    /// Include every farmer's records, not just the caller's.
    #[serde(default)]
    pub all: bool,
    pub limit: Option<i64>,
}

impl HistoryParams {
    fn username(&self, user: &AuthenticatedUser) -> Option<String> {
        if self.all {
            None
        } else {
            Some(user.username.clone())
        }
    }
}

/// Newest records first.
#[get("/history")]
#[tracing::instrument(skip(repo))]
pub async fn history(
    query: web::Query<HistoryParams>,
    repo: web::Data<Repo>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    match repo.irrigation_events(query.username(&user), limit).await {
        Ok(events) => Ok(HttpResponse::Ok().json(events)),
        Err(e) => Ok(error_response(e, "Could not load irrigation history")),
    }
}

#[get("/history/summary")]
#[tracing::instrument(skip(repo))]
pub async fn summary(
    query: web::Query<HistoryParams>,
    repo: web::Data<Repo>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    match repo
        .irrigation_events(query.username(&user), SUMMARY_LIMIT)
        .await
    {
        Ok(events) => Ok(HttpResponse::Ok().json(summarize(&events))),
        Err(e) => Ok(error_response(e, "Could not summarize irrigation history")),
    }
}
