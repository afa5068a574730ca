pub mod config;
mod outdated;

pub use outdated::{outdated, run};
