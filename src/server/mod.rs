//! Server module: routing table, middleware stack and builder

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::build_api_routes;
