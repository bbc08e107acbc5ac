pub mod selection;
pub mod tables;
pub mod types;

pub use selection::*;
pub use tables::*;
pub use types::*;
