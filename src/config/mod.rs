pub mod loader;
pub mod options;
pub mod resolver;
pub mod settings;
