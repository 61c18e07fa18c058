pub(crate) mod error;
pub(crate) mod recordings;

pub(crate) use error::ApiError;
