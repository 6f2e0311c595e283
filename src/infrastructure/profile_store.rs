use async_trait::async_trait;

use crate::{
    domain::{
        error::ProfileError, models::user::UserProfile,
        repositories::user_profile_repository::UserProfileRepository,
    },
    infrastructure::{
        http_user_profile_repository::HttpUserProfileRepository,
        sea_orm_user_profile_repository::SeaOrmUserProfileRepository,
    },
};

/// Profile backend picked at startup from configuration.
#[derive(Clone)]
pub enum ProfileStore {
    Remote(HttpUserProfileRepository),
    Database(SeaOrmUserProfileRepository),
}

#[async_trait]
impl UserProfileRepository for ProfileStore {
    async fn create_user(&self, profile: &UserProfile) -> Result<(), ProfileError> {
        match self {
            ProfileStore::Remote(repository) => repository.create_user(profile).await,
            ProfileStore::Database(repository) => repository.create_user(profile).await,
        }
    }
}
