//! Membership-fee tracker: grounds, their months, and the players owing fees
//! in each month, persisted through a document store and served over HTTP.

pub mod config;
pub mod database;
pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use errors::{AppError, Result};
pub use routes::build_router;
pub use state::AppState;
