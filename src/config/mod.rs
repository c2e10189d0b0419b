pub mod credentials;
pub mod session;

pub use credentials::{Credentials, TokenEndpoint};
pub use session::SessionConfig;
