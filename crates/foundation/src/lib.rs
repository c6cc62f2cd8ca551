pub mod extent;
pub mod geo;
pub mod geodesy;
pub mod mercator;

// Small geographic primitives only; everything else lives upstream.
pub use extent::*;
pub use geo::*;
pub use geodesy::*;
pub use mercator::*;
