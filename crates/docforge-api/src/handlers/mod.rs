pub mod convert;
pub mod health;
pub mod media_delete;
pub mod media_get;
pub mod rotate;
pub mod upload;
