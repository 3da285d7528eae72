use rstest::fixture;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::irrigation::{IrrigationSession, SessionHandle};
use crate::repository::models::irrigation_event::IrrigationEvent;
use crate::test_fixtures::time;

pub fn event(crop_type: &str, moisture_level: i32) -> IrrigationEvent {
    IrrigationEvent {
        id: 0,
        username: "farmer1".into(),
        crop_type: crop_type.into(),
        soil_type: "Loamy".into(),
        moisture_level,
        recorded_at: time(),
    }
}

#[fixture]
pub fn session() -> IrrigationSession {
    IrrigationSession::new(Uuid::new_v4(), "farmer1".into())
}

#[fixture]
pub fn session_handle(session: IrrigationSession) -> SessionHandle {
    Arc::new(Mutex::new(session))
}
