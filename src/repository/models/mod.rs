pub mod crop;
pub mod irrigation_event;
pub mod rfc3339;
pub mod user;
