pub mod serialization;
pub mod tabular;
