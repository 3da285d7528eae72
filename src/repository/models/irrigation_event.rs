use chrono::NaiveDateTime;
use diesel::{prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};

use crate::repository::models::rfc3339;
use crate::schema::irrigation_history;

/// One completed irrigation cycle. Rows are only ever appended.
#[derive(Clone, Debug, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = irrigation_history)]
pub struct IrrigationEvent {
    pub id: i32,
    pub username: String,
    pub crop_type: String,
    pub soil_type: String,
    pub moisture_level: i32,
    #[serde(rename = "timestamp", with = "rfc3339")]
    pub recorded_at: NaiveDateTime,
}

#[derive(Clone, Debug, Insertable, PartialEq)]
#[diesel(table_name = irrigation_history)]
pub struct NewIrrigationEvent {
    pub username: String,
    pub crop_type: String,
    pub soil_type: String,
    pub moisture_level: i32,
}

type BoxedQuery<'a> = irrigation_history::BoxedQuery<'a, Sqlite, irrigation_history::SqlType>;

impl IrrigationEvent {
    // Composable queries
    pub fn for_user(name: String) -> BoxedQuery<'static> {
        irrigation_history::table
            .filter(irrigation_history::username.eq(name))
            .order((
                irrigation_history::recorded_at.desc(),
                irrigation_history::id.desc(),
            ))
            .into_boxed()
    }

    pub fn recent() -> BoxedQuery<'static> {
        irrigation_history::table
            .order((
                irrigation_history::recorded_at.desc(),
                irrigation_history::id.desc(),
            ))
            .into_boxed()
    }
}
