pub mod media;
pub mod profile;
pub mod summary;
