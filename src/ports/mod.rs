pub mod number_source;
pub mod window_store;

pub use number_source::{FetchError, NumberSource};
pub use window_store::{WindowStore, WindowUpdate};
