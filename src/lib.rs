pub mod api_router;
pub mod auth;
pub mod client;
pub mod config;
pub mod contacts;
pub mod image;
pub mod shared;
pub mod ui;
