pub mod factory;
pub mod manager;
pub mod settings;
