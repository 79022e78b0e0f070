//! Request handlers.

pub mod generate;
pub mod health;
pub mod niches;
pub mod videos;

pub use generate::*;
pub use health::*;
pub use niches::*;
pub use videos::*;
