//! Configuration models for the registry and garbage collector.

pub mod registry;

pub use registry::RegistryConfig;
