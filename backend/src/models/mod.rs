pub mod patent;

pub use patent::*;
