pub mod envelope;
pub mod pagination;

pub use envelope::*;
pub use pagination::*;
