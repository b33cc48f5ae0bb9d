pub mod model;
pub mod sequence;
