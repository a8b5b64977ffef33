pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod queries;
pub mod schema;
pub mod seed;

pub use handlers::{router, AppState};
