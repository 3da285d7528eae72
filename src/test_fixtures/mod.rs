pub mod auth;
pub mod crops;
pub mod irrigation;

use chrono::NaiveDateTime;

pub fn time() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-05-01 13:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}
