//! Uniform response envelopes returned by request handlers.

use serde::{Deserialize, Serialize};

use crate::pagination::PagedResult;

/// Outcome class of a handled request.
///
/// Serialized by name (`"NOT_FOUND"`); [`ResponseCode::as_i32`] gives the stable
/// numeric value used by services that store or log codes as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Success,
    InternalError,
    BadRequest,
    Unauthenticated,
    Unauthorized,
    NotFound,
    Exists,
    Forbidden,
    ServiceSpecified,
}

impl ResponseCode {
    pub fn as_i32(self) -> i32 {
        match self {
            ResponseCode::Success => 0,
            ResponseCode::InternalError => 1,
            ResponseCode::BadRequest => 2,
            ResponseCode::Unauthenticated => 3,
            ResponseCode::Unauthorized => 4,
            ResponseCode::NotFound => 5,
            ResponseCode::Exists => 6,
            ResponseCode::Forbidden => 7,
            ResponseCode::ServiceSpecified => 8,
        }
    }

    /// Returns the wire name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCode::Success => "SUCCESS",
            ResponseCode::InternalError => "INTERNAL_ERROR",
            ResponseCode::BadRequest => "BAD_REQUEST",
            ResponseCode::Unauthenticated => "UNAUTHENTICATED",
            ResponseCode::Unauthorized => "UNAUTHORIZED",
            ResponseCode::NotFound => "NOT_FOUND",
            ResponseCode::Exists => "EXISTS",
            ResponseCode::Forbidden => "FORBIDDEN",
            ResponseCode::ServiceSpecified => "SERVICE_SPECIFIED",
        }
    }
}

impl TryFrom<i32> for ResponseCode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => ResponseCode::Success,
            1 => ResponseCode::InternalError,
            2 => ResponseCode::BadRequest,
            3 => ResponseCode::Unauthenticated,
            4 => ResponseCode::Unauthorized,
            5 => ResponseCode::NotFound,
            6 => ResponseCode::Exists,
            7 => ResponseCode::Forbidden,
            8 => ResponseCode::ServiceSpecified,
            other => return Err(other),
        })
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic response envelope.
///
/// Use `ApiResponse<()>` for responses that never carry data. The named
/// constructors pair each [`ResponseCode`] with its default message; the
/// `*_with` variants replace the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<D> {
    pub code: ResponseCode,
    pub message: Option<String>,
    pub data: Option<D>,
}

impl<D> ApiResponse<D> {
    fn failure(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Successful response carrying `data` and no message.
    pub fn success(data: D) -> Self {
        Self::success_with(Some(data), None)
    }

    /// Successful response with neither data nor message.
    pub fn success_empty() -> Self {
        Self::success_with(None, None)
    }

    /// Successful response with optional data and message.
    pub fn success_with(data: Option<D>, message: Option<String>) -> Self {
        Self {
            code: ResponseCode::Success,
            message,
            data,
        }
    }

    pub fn internal_error() -> Self {
        Self::internal_error_with("Internal server error.")
    }

    pub fn internal_error_with(message: impl Into<String>) -> Self {
        Self::failure(ResponseCode::InternalError, message)
    }

    pub fn bad_request() -> Self {
        Self::bad_request_with("Bad request.")
    }

    pub fn bad_request_with(message: impl Into<String>) -> Self {
        Self::failure(ResponseCode::BadRequest, message)
    }

    pub fn unauthenticated() -> Self {
        Self::unauthenticated_with("Unauthenticated.")
    }

    pub fn unauthenticated_with(message: impl Into<String>) -> Self {
        Self::failure(ResponseCode::Unauthenticated, message)
    }

    pub fn unauthorized() -> Self {
        Self::unauthorized_with("Unauthorized.")
    }

    pub fn unauthorized_with(message: impl Into<String>) -> Self {
        Self::failure(ResponseCode::Unauthorized, message)
    }

    pub fn not_found() -> Self {
        Self::not_found_with("Not found.")
    }

    pub fn not_found_with(message: impl Into<String>) -> Self {
        Self::failure(ResponseCode::NotFound, message)
    }

    pub fn exists() -> Self {
        Self::exists_with("Already exists.")
    }

    pub fn exists_with(message: impl Into<String>) -> Self {
        Self::failure(ResponseCode::Exists, message)
    }

    pub fn forbidden() -> Self {
        Self::forbidden_with("Forbidden.")
    }

    pub fn forbidden_with(message: impl Into<String>) -> Self {
        Self::failure(ResponseCode::Forbidden, message)
    }

    /// Service-defined outcome; the caller always supplies the message.
    pub fn service_specified(message: impl Into<String>, data: Option<D>) -> Self {
        Self {
            code: ResponseCode::ServiceSpecified,
            message: Some(message.into()),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ResponseCode::Success
    }
}

/// Response without data.
#[deprecated(since = "0.4.0", note = "use `ApiResponse<()>`")]
pub type BasicResponse = ApiResponse<()>;

/// Response with data.
#[deprecated(since = "0.4.0", note = "use `ApiResponse<D>`")]
pub type DataResponse<D> = ApiResponse<D>;

/// Successful envelope around a [`PagedResult`] with page metadata lifted to the
/// top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub code: ResponseCode,
    pub message: Option<String>,
    pub data: Option<PagedResult<T>>,
    pub page_number: u64,
    pub total_page: u64,
    pub total_count: u64,
}

impl<T> PaginatedResponse<T> {
    /// Creates a successful paginated response with explicit metadata.
    pub fn create(
        data: PagedResult<T>,
        page_number: u64,
        total_page: u64,
        total_count: u64,
        message: Option<String>,
    ) -> Self {
        Self {
            code: ResponseCode::Success,
            message,
            data: Some(data),
            page_number,
            total_page,
            total_count,
        }
    }

    /// Creates a successful paginated response whose metadata is taken from `data`.
    pub fn from_page(data: PagedResult<T>) -> Self {
        let page_number = data.page();
        let total_page = data.total_pages();
        let total_count = data.total_count();
        Self::create(data, page_number, total_page, total_count, None)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_page
    }

    /// Drops the top-level page metadata.
    pub fn into_api_response(self) -> ApiResponse<PagedResult<T>> {
        ApiResponse {
            code: self.code,
            message: self.message,
            data: self.data,
        }
    }
}
