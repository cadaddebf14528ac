//! API 서버용 HTTP middleware.

mod error_details;

pub use error_details::expose_internal_errors;
