use actix_web::HttpResponse;
use anyhow::Error;
use validator::ValidationErrors;

use crate::i18n::{Language, Message};
use crate::util::ApiResponse;

pub mod auth;
pub mod crops;
pub mod health;
pub mod irrigation;

/// Logs an infrastructure failure and hides it behind a generic 500.
pub fn error_response(e: Error, msg: &str) -> HttpResponse {
    tracing::error!(target = module_path!(), error = e.to_string(), msg);
    ApiResponse::internal_server_error()
}

/// Flattens validation errors into one user-facing sentence, fields in name order.
pub fn validation_message(errors: &ValidationErrors, language: Language) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                match Message::from_code(&error.code) {
                    Some(message) => message.text(language),
                    None => error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("{} is invalid.", field)),
                }
            })
        })
        .collect::<Vec<String>>()
        .join(" ")
}
