//! Cookie-based admin session: marker cookies, validation, and extractors.

pub mod cookies;
pub mod middleware;
pub mod session;

pub use middleware::{AppState, SessionCookies};
pub use session::{
    generate_secret_token, now_millis, Session, SessionMarker, SessionStatus, SessionValidator,
};
