pub mod config;
mod decode;
mod encode;
mod heroes;
mod library;

pub use decode::*;
pub use encode::*;
pub use heroes::*;
pub use library::*;
