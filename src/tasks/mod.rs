pub mod materialize;
pub mod params;
