pub mod types;
pub mod verifier;

pub use types::{ClaimMap, IdToken, UserInfo};
pub use verifier::{IdTokenError, IdTokenVerifier};
