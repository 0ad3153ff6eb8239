// This crate holds everything the UI needs that is not a widget: talking to
// the library API, remembering who is signed in, and the state of each screen.
pub mod api;
pub mod config;
pub mod error;
pub mod pages;
pub mod session;

pub use api::ApiClient;
pub use config::FrontendConfig;
pub use error::ClientError;
pub use session::Session;
