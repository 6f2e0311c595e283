use async_trait::async_trait;

use crate::domain::{error::ProfileError, models::user::UserProfile};

#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn create_user(&self, profile: &UserProfile) -> Result<(), ProfileError>;
}
