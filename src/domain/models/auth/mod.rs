pub mod authenticated_user;
pub mod role;

pub use authenticated_user::AuthenticatedUser;
pub use role::Role;
