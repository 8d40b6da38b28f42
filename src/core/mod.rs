pub mod probe;
pub mod render;
