use chrono::NaiveDateTime;
use diesel::{prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};

use crate::repository::models::rfc3339;
use crate::schema::users;

#[derive(Clone, Debug, Identifiable, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(with = "rfc3339")]
    pub created_at: NaiveDateTime,
}

type BoxedQuery<'a> = users::BoxedQuery<'a, Sqlite, users::SqlType>;

impl User {
    // Composable queries
    pub fn by_id(user_id: i32) -> BoxedQuery<'static> {
        users::table.filter(users::id.eq(user_id)).into_boxed()
    }

    pub fn by_username(name: String) -> BoxedQuery<'static> {
        users::table.filter(users::username.eq(name)).into_boxed()
    }
}
