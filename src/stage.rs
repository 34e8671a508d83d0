pub mod arena;
pub mod lifecycle;
pub mod node;
