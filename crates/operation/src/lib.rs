//! Operation parameters of GraphQL-over-HTTP requests.
//!
//! A request body is first decoded into a dynamic [`Value`] tree and classified as
//! [`RawParameters`]. An [`OperationParamsBuilder`] then validates every field and produces
//! typed [`OperationParams`], one per operation of a [`BatchRequest`].

mod builder;
mod error;
mod params;
mod raw;
mod upload;
mod value;

pub use builder::{DefaultOperationParamsBuilder, OperationParamsBuilder};
pub use error::{Error, Result};
pub use params::{BatchRequest, OperationParams};
pub use raw::RawParameters;
pub use upload::{Upload, UploadedFile};
pub use value::{Map, Value};
