pub mod entity;
pub mod firebase_identity_provider;
pub mod http_user_profile_repository;
pub mod profile_store;
pub mod sea_orm_user_profile_repository;
