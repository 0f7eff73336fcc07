//! Authentication
//!
//! HS256 JWT tokens plus extractors that gate handlers on a valid
//! token (`CurrentUser`) or the ADMIN role (`AdminUser`).

pub mod extractor;
pub mod jwt;

pub use extractor::AdminUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
