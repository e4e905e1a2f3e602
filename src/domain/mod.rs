pub mod category;
pub mod snapshot;
pub mod window;

pub use category::{Category, InvalidCategory};
pub use snapshot::WindowSnapshot;
pub use window::NumberWindow;
