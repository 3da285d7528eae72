pub mod application;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod crops;
pub mod database;
pub mod i18n;
pub mod irrigation;
pub mod middleware;
pub mod repository;
pub mod schema;
pub mod util;

#[cfg(test)]
mod test_fixtures;
