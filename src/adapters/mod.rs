pub mod store;
pub mod upstream;

pub use store::MemoryWindowStore;
pub use upstream::{HttpNumberSource, UpstreamConfig};
