pub mod loader;
pub mod relations;
pub mod retry;
pub mod tables;

pub use loader::*;
pub use relations::*;
pub use retry::*;
pub use tables::*;
