pub type Result<T> = std::result::Result<T, RequestError>;

/// The two JSON form fields of a multipart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MultipartField {
    Operations,
    Map,
}

/// Reasons a request cannot be turned into operation parameters.
///
/// Every error is terminal for the request it was raised for.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("could not decode request with content type `{content_type}`")]
    UnsupportedContentType { content_type: String },
    #[error("request body is not valid JSON ({reason}), got `{body}`")]
    MalformedJson { reason: String, body: String },
    #[error("expected an object or array of objects, got `{value}`")]
    UnexpectedShape { value: String },
    #[error("request body is not valid UTF-8")]
    NonUtf8Body,
    #[error("request body is not a valid form ({reason})")]
    MalformedForm { reason: String },
    #[error("query string could not be decoded ({reason})")]
    MalformedQueryString { reason: String },
    #[error("Could not find a valid {field}, be sure to conform to the GraphQL multipart request specification: https://github.com/jaydenseric/graphql-multipart-request-spec")]
    MissingMultipartField { field: MultipartField },
    #[error("{field} is not valid json ({reason})")]
    InvalidMultipartJson { field: MultipartField, reason: String },
    #[error("expected {field} to be an object or array, got {kind}")]
    InvalidMultipartShape { field: MultipartField, kind: &'static str },
    #[error("map value for file `{file_key}` must be an array of strings, got {kind}")]
    InvalidMapEntry { file_key: String, kind: &'static str },
    #[error("map value for file `{file_key}` must be an array of strings, got {kind} at position {position}")]
    InvalidMapPath {
        file_key: String,
        position: usize,
        kind: &'static str,
    },
    #[error("operations path `{path}` for file `{file_key}` is invalid: {reason}")]
    InvalidOperationsPath {
        file_key: String,
        path: String,
        reason: String,
    },
    #[error("file uploads are disabled")]
    UploadsDisabled,
    #[error("batch requests are disabled")]
    BatchingDisabled,
    #[error("batch of {size} operations exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
    #[error(transparent)]
    Operation(#[from] operation::Error),
}

impl RequestError {
    pub(crate) fn malformed_json(err: serde_json::Error, body: &[u8]) -> Self {
        RequestError::MalformedJson {
            reason: err.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    pub(crate) fn unexpected_shape(value: operation::Value) -> Self {
        RequestError::UnexpectedShape {
            value: value.to_string(),
        }
    }

    pub fn status_code(&self) -> http::StatusCode {
        match self {
            RequestError::UnsupportedContentType { .. } => http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::Operation(operation::Error::UnsupportedMethod(_)) => http::StatusCode::METHOD_NOT_ALLOWED,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }

    pub fn is_multipart_error(&self) -> bool {
        matches!(
            self,
            RequestError::MissingMultipartField { .. }
                | RequestError::InvalidMultipartJson { .. }
                | RequestError::InvalidMultipartShape { .. }
                | RequestError::InvalidMapEntry { .. }
                | RequestError::InvalidMapPath { .. }
                | RequestError::InvalidOperationsPath { .. }
                | RequestError::UploadsDisabled
        )
    }
}
