pub mod executor;
pub mod serializer;

pub use executor::aggregate;
pub use serializer::serialize;
