//! `stockwise-auth` — authentication and identity boundary.
//!
//! Users, roles, password hashing, JWT issue/validate, and the
//! register/login service. Decoupled from HTTP and storage.

pub mod password;
pub mod service;
pub mod token;
pub mod user;

pub use service::{AuthService, AuthenticatedUser, UserStore};
pub use token::{Claims, TokenManager};
pub use user::{Role, User};
