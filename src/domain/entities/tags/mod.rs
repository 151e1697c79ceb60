pub mod neche;
pub mod tag;

pub use neche::{Neche, NewNeche};
pub use tag::{NewTag, Tag};
