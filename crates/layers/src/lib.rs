pub mod markers;
pub mod query;
pub mod submit;
pub mod symbology;

pub use markers::*;
pub use query::*;
pub use submit::*;
pub use symbology::*;
