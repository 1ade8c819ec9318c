pub mod client;
pub mod error;
pub mod response;
pub mod types;

pub use client::{FetchStatus, StatusClient};
pub use error::{ApiError, ResponseError};
pub use response::check_response;
pub use types::{CheckedResponse, Homework};
