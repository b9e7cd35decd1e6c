pub mod actor;
pub mod scene;
