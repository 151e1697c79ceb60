pub mod auth_request;
pub mod register_request;

pub use auth_request::*;
pub use register_request::*;
