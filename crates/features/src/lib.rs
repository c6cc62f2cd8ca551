pub mod geojson;
pub mod records;
pub mod store;

pub use geojson::*;
pub use records::*;
pub use store::*;
