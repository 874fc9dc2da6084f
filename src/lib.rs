pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;

#[cfg(test)]
mod test_support;

pub use error::AppError;
