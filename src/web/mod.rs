//! Web server module
//!
//! Provides the HTML interface and the JSON API for running research.

mod handlers;
mod routes;
mod session;
mod state;
mod templates;

pub use routes::create_router;
pub use session::{LastResult, SessionStore, SESSION_COOKIE};
pub use state::AppState;
pub use templates::{markdown_to_html, Templates};
