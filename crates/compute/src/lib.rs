pub mod aggregate;
pub mod contains;

pub use aggregate::*;
pub use contains::*;
