//! API layer - HTTP entry points.

pub mod auth;
pub mod dto;
pub mod http;
pub mod json;
pub mod response;

pub use response::ServiceResponse;
