//! Shared types used across every service built on the kernel.
//!
//! - [`EntityId`] for UUID-backed identity
//! - [`ApiResponse`] / [`PaginatedResponse`] envelopes with [`ResponseCode`]
//! - [`PageRequest`] / [`PagedResult`] pagination metadata

pub mod pagination;
pub mod response;
pub mod types;

pub use pagination::{PageRequest, PagedResult, PaginationError};
#[allow(deprecated)]
pub use response::{ApiResponse, BasicResponse, DataResponse, PaginatedResponse, ResponseCode};
pub use types::EntityId;
