pub mod token;

pub use token::{ErrorResponse, JoinRequest, TokenRequestBody, TokenResponse};
