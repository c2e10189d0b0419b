pub mod claims;
pub mod client_credentials;
pub mod token;

pub use claims::TokenClaims;
pub use client_credentials::TokenClient;
pub use token::AccessToken;
