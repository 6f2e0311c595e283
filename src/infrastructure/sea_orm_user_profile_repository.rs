use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema, SqlErr,
};
use tracing::info;

use crate::{
    domain::{
        error::ProfileError,
        models::user::UserProfile,
        repositories::user_profile_repository::UserProfileRepository,
        services::auth_error_message::auth_code,
    },
    infrastructure::entity::user_profiles,
};

#[derive(Clone)]
pub struct SeaOrmUserProfileRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `user_profiles` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(user_profiles::Entity);
        statement.if_not_exists();
        self.db.execute(backend.build(&statement)).await?;
        info!("user_profiles table ready");
        Ok(())
    }
}

#[async_trait]
impl UserProfileRepository for SeaOrmUserProfileRepository {
    async fn create_user(&self, profile: &UserProfile) -> Result<(), ProfileError> {
        let model = user_profiles::ActiveModel {
            uid: Set(profile.uid().to_string()),
            username: Set(profile.username().as_str().to_string()),
            first_name: Set(profile.first_name().to_string()),
            last_name: Set(profile.last_name().to_string()),
            email: Set(profile.email().as_str().to_string()),
            last_login: Set(profile.last_login()),
            role: Set(i16::from(u8::from(profile.role()))),
            created_at: Set(Utc::now()),
        };

        user_profiles::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

fn map_db_error(err: DbErr) -> ProfileError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            ProfileError::with_code(auth_code::PROFILE_ALREADY_EXISTS, detail)
        }
        _ => ProfileError::new(None, Some(err.to_string())),
    }
}
