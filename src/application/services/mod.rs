pub mod aggregator;
pub mod batch_service;
pub mod media_service;
pub mod profile_service;
