use anyhow::{anyhow, Error};
use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};

use crate::database::{DbConn, DbPool};
use crate::repository::models::{
    crop::{Crop, NewCrop, UpdateCropParams},
    irrigation_event::{IrrigationEvent, NewIrrigationEvent},
    user::User,
};
use crate::repository::Repository;
use crate::schema::{crops, irrigation_history, users};
use crate::util::spawn_blocking_with_tracing;

pub const USERNAME_TAKEN: &str = "Username already exists.";

pub struct Implementation {
    pool: DbPool,
}

impl Implementation {
    pub fn new(pool: DbPool) -> Self {
        Implementation { pool }
    }

    fn conn(pool: &DbPool) -> Result<DbConn, Error> {
        pool.get().map_err(|e| anyhow!("Database error: {:?}", e))
    }
}

#[async_trait]
impl Repository for Implementation {
    async fn create_crop(&self, crop: NewCrop) -> Result<Crop, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            diesel::insert_into(crops::table)
                .values(&crop)
                .get_result::<Crop>(&mut conn)
                .map_err(|e| anyhow!("Error creating crop: {}", e))
        })
        .await?
    }

    async fn create_crops(&self, new_crops: Vec<NewCrop>) -> Result<usize, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            conn.transaction::<_, Error, _>(|conn| {
                let mut inserted = 0;
                for crop in &new_crops {
                    inserted += diesel::insert_into(crops::table)
                        .values(crop)
                        .execute(conn)
                        .map_err(|e| anyhow!("Error creating crop {}: {}", crop.name, e))?;
                }

                Ok(inserted)
            })
        })
        .await?
    }

    async fn create_irrigation_event(
        &self,
        event: NewIrrigationEvent,
    ) -> Result<IrrigationEvent, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            diesel::insert_into(irrigation_history::table)
                .values(&event)
                .get_result::<IrrigationEvent>(&mut conn)
                .map_err(|e| anyhow!("Error creating irrigation event: {}", e))
        })
        .await?
    }

    async fn create_user(&self, username: String, password_hash: String) -> Result<User, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            diesel::insert_into(users::table)
                .values((
                    users::username.eq(username),
                    users::password_hash.eq(password_hash),
                ))
                .get_result::<User>(&mut conn)
                .map_err(|e| match e {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        anyhow!(USERNAME_TAKEN)
                    }
                    e => anyhow!("Internal server error when creating user: {}", e),
                })
        })
        .await?
    }

    async fn crop_by_id(&self, crop_id: i32) -> Result<Option<Crop>, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            Crop::by_id(crop_id)
                .first::<Crop>(&mut conn)
                .optional()
                .map_err(|e| anyhow!("Error when fetching crop: {}", e))
        })
        .await?
    }

    async fn crops(&self) -> Result<Vec<Crop>, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            Crop::all()
                .load::<Crop>(&mut conn)
                .map_err(|e| anyhow!("Internal server error when getting crops: {}", e))
        })
        .await?
    }

    async fn delete_crop(&self, crop_id: i32) -> Result<bool, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            let deleted = diesel::delete(crops::table.filter(crops::id.eq(crop_id)))
                .execute(&mut conn)
                .map_err(|e| anyhow!("Error deleting crop: {}", e))?;

            Ok(deleted > 0)
        })
        .await?
    }

    async fn irrigation_events(
        &self,
        username: Option<String>,
        limit: i64,
    ) -> Result<Vec<IrrigationEvent>, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            let query = match username {
                Some(name) => IrrigationEvent::for_user(name),
                None => IrrigationEvent::recent(),
            };

            query.limit(limit).load::<IrrigationEvent>(&mut conn).map_err(|e| {
                anyhow!(
                    "Internal server error when getting irrigation events: {}",
                    e
                )
            })
        })
        .await?
    }

    async fn search_crops(&self, keyword: String) -> Result<Vec<Crop>, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            Crop::search(&keyword)
                .load::<Crop>(&mut conn)
                .map_err(|e| anyhow!("Internal server error when searching crops: {}", e))
        })
        .await?
    }

    async fn update_crop(
        &self,
        crop_id: i32,
        params: UpdateCropParams,
    ) -> Result<Option<Crop>, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            conn.transaction::<_, Error, _>(|conn| {
                let existing = Crop::by_id(crop_id).first::<Crop>(conn).optional()?;

                let crop = match existing {
                    Some(crop) => crop,
                    None => return Ok(None),
                };

                // Diesel refuses an empty changeset
                if params.is_empty() {
                    return Ok(Some(crop));
                }

                let updated = diesel::update(crops::table.filter(crops::id.eq(crop_id)))
                    .set(&params)
                    .get_result::<Crop>(conn)?;

                Ok(Some(updated))
            })
            .map_err(|e| anyhow!("Error updating crop: {}", e))
        })
        .await?
    }

    async fn user_by_id(&self, user_id: i32) -> Result<Option<User>, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            User::by_id(user_id)
                .first::<User>(&mut conn)
                .optional()
                .map_err(|e| anyhow!("Error when looking up user record: {}", e))
        })
        .await?
    }

    async fn user_by_username(&self, username: String) -> Result<Option<User>, Error> {
        let pool = self.pool.clone();

        spawn_blocking_with_tracing(move || {
            let mut conn = Self::conn(&pool)?;

            User::by_username(username)
                .first::<User>(&mut conn)
                .optional()
                .map_err(|e| anyhow!("Error when looking up user record: {}", e))
        })
        .await?
    }
}
