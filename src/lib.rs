//! # Club API
//!
//! HTTP backend for sports and community clubs. A club registers an account,
//! logs in with its registration number, and keeps a roster of members and a
//! ledger of fee collections. All persistence goes through a hosted REST data
//! API behind the [`DataGateway`](core::gateway::DataGateway) trait.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use club_api::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_gateway(InMemoryGateway::new())
//!     .build()?;
//! ```
//!
//! Every response is a JSON envelope with optional `message`, `data` and
//! `error` members, see [`ApiResponse`](core::envelope::ApiResponse).

pub mod config;
pub mod core;
pub mod entities;
pub mod handlers;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResponse, ApiResult, DataGateway, Filter, GatewayError, Returning,
    };

    // === Entities ===
    pub use crate::entities::{Club, Collection, Member, RecordId};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryGateway;
    #[cfg(feature = "rest")]
    pub use crate::storage::RestGateway;

    // === Config ===
    pub use crate::config::{AppConfig, ServerConfig, StoreConfig};

    // === Server ===
    pub use crate::handlers::AppState;
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
