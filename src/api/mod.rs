pub mod analyze;
pub mod chat;
pub mod error;
pub mod health;
pub mod openapi;
pub mod status;
pub mod upload;
pub mod weather;
pub mod wildfire;
