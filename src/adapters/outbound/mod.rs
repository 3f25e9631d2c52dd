/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod analyzer;
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod network;
