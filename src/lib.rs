// Library entry so integration tests and external tools can reference
// internal modules. The binary (`main.rs`) builds on the same modules.
pub mod commands;
pub mod constants;
pub mod handler;
pub mod model;

pub use model::AppState;
