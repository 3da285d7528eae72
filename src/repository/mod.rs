mod implementation;
pub mod models;

use anyhow::Error;
use async_trait::async_trait;
use mockall::automock;
use models::{
    crop::{Crop, NewCrop, UpdateCropParams},
    irrigation_event::{IrrigationEvent, NewIrrigationEvent},
    user::User,
};

use crate::database::DbPool;

pub use implementation::USERNAME_TAKEN;

/// Used in the application to access the database
pub type Repo = &'static dyn Repository;

/// Creates a testable interface for the database pool.
#[automock]
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    async fn create_crop(&self, crop: NewCrop) -> Result<Crop, Error>;
    async fn create_crops(&self, crops: Vec<NewCrop>) -> Result<usize, Error>;
    async fn create_irrigation_event(
        &self,
        event: NewIrrigationEvent,
    ) -> Result<IrrigationEvent, Error>;
    async fn create_user(&self, username: String, password_hash: String) -> Result<User, Error>;
    async fn crop_by_id(&self, crop_id: i32) -> Result<Option<Crop>, Error>;
    async fn crops(&self) -> Result<Vec<Crop>, Error>;
    /// Returns `false` when no crop had the id.
    async fn delete_crop(&self, crop_id: i32) -> Result<bool, Error>;
    async fn irrigation_events(
        &self,
        username: Option<String>,
        limit: i64,
    ) -> Result<Vec<IrrigationEvent>, Error>;
    async fn search_crops(&self, keyword: String) -> Result<Vec<Crop>, Error>;
    /// Returns `None` when no crop had the id.
    async fn update_crop(
        &self,
        crop_id: i32,
        params: UpdateCropParams,
    ) -> Result<Option<Crop>, Error>;
    async fn user_by_id(&self, user_id: i32) -> Result<Option<User>, Error>;
    async fn user_by_username(&self, username: String) -> Result<Option<User>, Error>;
}

/// Builds the diesel-backed repository. The value lives for the rest of the process.
pub fn implementation(pool: DbPool) -> Repo {
    let repository = Box::new(implementation::Implementation::new(pool));

    Box::leak(repository)
}
