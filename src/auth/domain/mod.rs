//! Domain model for authenticated users and their sessions.

mod credentials;
mod error;
mod ids;
mod session;

pub use credentials::Credentials;
pub use error::AuthError;
pub use ids::UserId;
pub use session::Session;
