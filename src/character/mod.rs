pub mod legacy;
pub mod model;
pub mod resolve;
