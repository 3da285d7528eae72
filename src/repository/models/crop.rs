use chrono::NaiveDateTime;
use diesel::sql_types::Text;
use diesel::{prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::i18n::{Language, Message};
use crate::repository::models::rfc3339;
use crate::schema::crops;

diesel::define_sql_function!(fn lower(x: Text) -> Text);

#[derive(Clone, Debug, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crops)]
pub struct Crop {
    pub id: i32,
    pub name: String,
    pub season: String,
    pub yield_per_acre: f64,
    pub added_by: i32,
    #[serde(with = "rfc3339")]
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, Insertable, PartialEq, Validate)]
#[diesel(table_name = crops)]
#[validate(schema(function = "validate_new_crop_yield"))]
pub struct NewCrop {
    #[validate(length(min = 1, max = 255, message = "Crop name is required."))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Season is required."))]
    pub season: String,
    #[validate(range(min = 0.0, message = "Yield cannot be negative."))]
    pub yield_per_acre: f64,
    #[serde(skip)]
    pub added_by: i32,
}

/// Partial update of a crop; `None` fields keep their stored value.
#[derive(AsChangeset, Clone, Debug, Default, Deserialize, PartialEq, Validate)]
#[diesel(table_name = crops)]
#[validate(schema(function = "validate_update_yield"))]
pub struct UpdateCropParams {
    #[validate(length(min = 1, max = 255, message = "Crop name cannot be blank."))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Season cannot be blank."))]
    pub season: Option<String>,
    #[validate(range(min = 0.0, message = "Yield cannot be negative."))]
    pub yield_per_acre: Option<f64>,
}

impl UpdateCropParams {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.season.is_none() && self.yield_per_acre.is_none()
    }
}

/// NaN passes every range comparison and SQLite stores it as NULL.
pub fn validate_yield(yield_per_acre: f64) -> Result<(), ValidationError> {
    if yield_per_acre.is_finite() {
        return Ok(());
    }

    let mut error = ValidationError::new("yield_not_finite");
    error.message = Some(Message::YieldNotFinite.text(Language::English).into());
    Err(error)
}

fn validate_new_crop_yield(crop: &NewCrop) -> Result<(), ValidationError> {
    validate_yield(crop.yield_per_acre)
}

fn validate_update_yield(params: &UpdateCropParams) -> Result<(), ValidationError> {
    params.yield_per_acre.map_or(Ok(()), validate_yield)
}

type BoxedQuery<'a> = crops::BoxedQuery<'a, Sqlite, crops::SqlType>;

impl Crop {
    // Composable queries
    pub fn all() -> BoxedQuery<'static> {
        crops::table.order(crops::id.asc()).into_boxed()
    }

    pub fn by_id(crop_id: i32) -> BoxedQuery<'static> {
        crops::table.filter(crops::id.eq(crop_id)).into_boxed()
    }

    /// Case-insensitive substring match on name or season.
    pub fn search(keyword: &str) -> BoxedQuery<'static> {
        let pattern = format!("%{}%", escape_like(&keyword.to_ascii_lowercase()));

        crops::table
            .filter(
                lower(crops::name)
                    .like(pattern.clone())
                    .escape('\\')
                    .or(lower(crops::season).like(pattern).escape('\\')),
            )
            .order(crops::id.asc())
            .into_boxed()
    }
}

fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}
