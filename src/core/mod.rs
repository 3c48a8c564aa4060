//! Core building blocks shared by handlers, storage backends and the server

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod password;
pub mod validation;

pub use envelope::{ApiResponse, Reply};
pub use error::{ApiError, ApiResult, ConfigError, GatewayError};
pub use extractors::{JsonBody, QueryParams, decode_json, required_param};
pub use gateway::{DataGateway, Filter, Returning};
