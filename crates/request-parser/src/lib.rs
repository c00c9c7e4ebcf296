//! Decoding of GraphQL-over-HTTP requests.
//!
//! [`RequestParser`] turns a buffered HTTP request into operation parameters. It understands
//! the usual transport encodings of GraphQL operations:
//!
//! - GET requests with the operation in the query string,
//! - JSON bodies, either one operation or a batch of them,
//! - `application/graphql` bodies holding the query text,
//! - URL-encoded forms,
//! - multipart requests carrying file uploads, following
//!   <https://github.com/jaydenseric/graphql-multipart-request-spec>.

mod body;
mod config;
mod content_type;
mod error;
mod multipart;
mod parser;
mod request;

pub use config::{BatchingConfig, FileUploadsConfig, RequestParserConfig};
pub use content_type::ContentType;
pub use error::{MultipartField, RequestError, Result};
pub use parser::RequestParser;
pub use request::{BufferedRequest, GraphqlHttpRequest};

pub use operation::{
    BatchRequest, DefaultOperationParamsBuilder, Map, OperationParams, OperationParamsBuilder, RawParameters, Upload,
    UploadedFile, Value,
};
