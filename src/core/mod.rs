pub mod registry;

pub use registry::{ServiceRegistry, Stores};
