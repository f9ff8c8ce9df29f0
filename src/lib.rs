//! Front end for a dispatch-registry document API.
//!
//! The registry stores scanned dispatches and decisions behind a JSON API:
//! listing, full-text search, upload, download, and an assistant chat. This
//! crate is everything a client needs on top of that API: a typed client
//! ([`api::ApiClient`]), explicit session state with view transitions
//! ([`state::AppState`]), the search flow ([`search::SearchPresenter`]),
//! snippet highlighting, and renderers for both the terminal and the
//! built-in web interface.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod notice;
pub mod search;
pub mod server;
pub mod state;
pub mod term;
pub mod upload;
pub mod view;

pub use api::{ApiClient, DocumentService};
pub use config::{load_settings, Config, Settings};
pub use error::{ApiError, ApiResult};
pub use notice::{Locale, Notice};
pub use search::{SearchOutcome, SearchPresenter};
pub use state::AppState;
