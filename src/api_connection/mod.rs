pub mod connection;
pub mod endpoints;
pub mod failure;

pub use connection::ApiConnectionError;
pub use endpoints::{BackendApi, Recipe};
pub use failure::GenerationFailure;
