use operation::{Map, RawParameters, Value};

use crate::{multipart, ContentType, GraphqlHttpRequest, RequestError, Result};

/// Decodes the body of a POST request according to its content type.
///
/// Apart from multipart requests and raw `application/graphql` text, the body is classified by
/// its shape: an object is a single operation and an array of objects is a batch. Form bodies
/// and bodies without a content type are decoded as a form unless they parse as JSON.
pub(crate) fn extract<R>(request: &R, content_type: &ContentType, uploads_enabled: bool) -> Result<RawParameters>
where
    R: GraphqlHttpRequest + ?Sized,
{
    let body = request.raw_body();

    match content_type {
        ContentType::Multipart => {
            if !uploads_enabled {
                return Err(RequestError::UploadsDisabled);
            }
            shape(multipart::inline_files(request)?)
        }
        // The body is the query text even if it happens to look like JSON.
        ContentType::GraphqlText => {
            let query = std::str::from_utf8(body).map_err(|_| RequestError::NonUtf8Body)?;
            Ok(RawParameters::Single(Map::from_iter([(
                "query".to_owned(),
                Value::from(query),
            )])))
        }
        ContentType::Json => {
            let value = serde_json::from_slice::<serde_json::Value>(body)
                .map_err(|err| RequestError::malformed_json(err, body))?;
            shape(Value::from(value))
        }
        ContentType::FormUrlEncoded | ContentType::Missing => match json(body) {
            Some(value) => shape(value),
            None => form(body),
        },
        ContentType::Other(content_type) => match json(body) {
            Some(value) => shape(value),
            None => Err(RequestError::UnsupportedContentType {
                content_type: content_type.clone(),
            }),
        },
    }
}

fn json(body: &[u8]) -> Option<Value> {
    serde_json::from_slice::<serde_json::Value>(body).ok().map(Value::from)
}

fn shape(value: Value) -> Result<RawParameters> {
    RawParameters::try_from(value).map_err(RequestError::unexpected_shape)
}

fn form(body: &[u8]) -> Result<RawParameters> {
    let fields = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
        .map_err(|err| RequestError::MalformedForm { reason: err.to_string() })?;

    Ok(RawParameters::Single(
        fields.into_iter().map(|(name, value)| (name, Value::String(value))).collect(),
    ))
}
