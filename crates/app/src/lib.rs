// Library exports shared by the `lpl` binary and integration tests

// Signed HTTP client and request types for the playlist API
pub mod api;

// Config directory, credentials and resolved settings
pub mod state;

pub mod version;

pub use api::client::{ApiClient, ApiError, ApiRequest};
pub use state::{AppConfig, AppState, Settings, StateError};
