//! Storage implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "rest")]
pub mod rest;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryGateway;
#[cfg(feature = "rest")]
pub use rest::RestGateway;
