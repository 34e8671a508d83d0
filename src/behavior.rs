pub mod core;
pub mod library;
