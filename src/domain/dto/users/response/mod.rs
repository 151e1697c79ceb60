pub mod login_response;
pub mod user_response;

pub use login_response::*;
pub use user_response::*;
