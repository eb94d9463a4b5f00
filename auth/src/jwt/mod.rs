pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;

pub use claims::Claims;
pub use errors::JwtError;
pub use errors::TokenRejection;
pub use handler::JwtHandler;
pub use issuer::TokenIssuer;
