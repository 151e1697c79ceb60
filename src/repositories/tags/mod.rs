pub mod neche_repo;
pub mod tag_repo;

pub use neche_repo::{MongoNecheRepository, NecheRepository};
pub use tag_repo::{MongoTagRepository, TagRepository};
