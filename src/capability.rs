pub mod audio;
pub mod render;
pub mod transform;
