pub mod register_user_usecase;
pub mod signup_flow;
