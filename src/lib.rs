pub mod aggregate;
pub mod charts;
pub mod loader;
pub mod output;
pub mod stats;
