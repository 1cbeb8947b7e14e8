pub mod label_placement;
pub mod polylabel;

pub use label_placement::{label_lat_lng, largest_polygon};
pub use polylabel::polylabel;
