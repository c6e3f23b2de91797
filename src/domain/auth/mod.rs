//! Authentication domain - signed-in identity, session state and errors.
//!
//! These types carry **no provider dependencies**: any OAuth2 identity
//! provider can populate them through the `IdentityProvider` port.

mod identity;
mod state;

pub use identity::{AuthError, UserIdentity};
pub use state::AuthState;
