pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("HTTP method \"{0}\" is not supported, use GET or POST")]
    UnsupportedMethod(http::Method),
    #[error("GraphQL request parameter \"{name}\" must be {expected}, got {actual}")]
    InvalidParameter {
        name: &'static str,
        expected: &'static str,
        actual: String,
    },
    #[error("batch requests are not supported")]
    UnsupportedBatch,
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, expected: &'static str, actual: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            expected,
            actual: actual.into(),
        }
    }
}
