pub mod commands;
pub mod conda;
pub mod report;
pub mod runtime;
pub mod version;
