//! GraphQL multipart requests: <https://github.com/jaydenseric/graphql-multipart-request-spec>
//!
//! The `operations` field holds the operations as JSON, with `null` wherever a file goes. The
//! `map` field associates each file field name with the paths inside `operations` it should be
//! written to.

mod path;

use operation::Value;

use crate::{GraphqlHttpRequest, MultipartField, RequestError, Result};

use self::path::OperationsPath;

/// Decodes `operations` and writes the uploaded files into it at the locations given by `map`.
pub(crate) fn inline_files<R>(request: &R) -> Result<Value>
where
    R: GraphqlHttpRequest + ?Sized,
{
    let map = required_field(request, MultipartField::Map)?;
    let operations = required_field(request, MultipartField::Operations)?;

    let mut operations = decode(MultipartField::Operations, operations)?;
    let entries = file_map(decode(MultipartField::Map, map)?)?;

    // Every path is checked before the first file is written.
    let targets = entries
        .iter()
        .map(|(file_key, paths)| -> Result<_> {
            let paths = paths
                .iter()
                .map(|path| {
                    OperationsPath::parse(path).map_err(|err| RequestError::InvalidOperationsPath {
                        file_key: file_key.clone(),
                        path: path.clone(),
                        reason: err.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok((file_key.as_str(), paths))
        })
        .collect::<Result<Vec<_>>>()?;

    for (file_key, paths) in targets {
        let upload = request.file(file_key);

        match &upload {
            Some(upload) => tracing::debug!(
                file_key,
                filename = upload.filename(),
                size = upload.size(),
                paths = paths.len(),
                "inlining uploaded file"
            ),
            None => tracing::trace!(file_key, "no file part for map entry, inlining null"),
        }

        for path in paths {
            let value = upload.clone().map(Value::Upload).unwrap_or_default();
            path.assign(&mut operations, value);
        }
    }

    Ok(operations)
}

fn required_field<R>(request: &R, field: MultipartField) -> Result<&str>
where
    R: GraphqlHttpRequest + ?Sized,
{
    request
        .form_field(field.as_ref())
        .ok_or(RequestError::MissingMultipartField { field })
}

fn decode(field: MultipartField, text: &str) -> Result<Value> {
    let value = serde_json::from_str::<serde_json::Value>(text)
        .map(Value::from)
        .map_err(|err| RequestError::InvalidMultipartJson {
            field,
            reason: err.to_string(),
        })?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(RequestError::InvalidMultipartShape {
            field,
            kind: other.kind(),
        }),
    }
}

/// Checks that every entry of the decoded `map` is a list of strings. An array `map` is keyed
/// by position.
fn file_map(map: Value) -> Result<Vec<(String, Vec<String>)>> {
    let entries: Vec<(String, Value)> = match map {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        other => {
            return Err(RequestError::InvalidMultipartShape {
                field: MultipartField::Map,
                kind: other.kind(),
            });
        }
    };

    entries
        .into_iter()
        .map(|(file_key, paths)| -> Result<_> {
            let paths = match paths {
                Value::Array(paths) => paths,
                other => {
                    return Err(RequestError::InvalidMapEntry {
                        file_key,
                        kind: other.kind(),
                    });
                }
            };

            let paths = paths
                .into_iter()
                .enumerate()
                .map(|(position, path)| match path {
                    Value::String(path) => Ok(path),
                    other => Err(RequestError::InvalidMapPath {
                        file_key: file_key.clone(),
                        position,
                        kind: other.kind(),
                    }),
                })
                .collect::<Result<Vec<_>>>()?;

            Ok((file_key, paths))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keyed_by_position() {
        let map = Value::from(serde_json::json!([["variables.a"], ["variables.b", "variables.c"]]));

        assert_eq!(
            file_map(map).unwrap(),
            [
                ("0".to_owned(), vec!["variables.a".to_owned()]),
                ("1".to_owned(), vec!["variables.b".to_owned(), "variables.c".to_owned()]),
            ]
        );
    }

    #[test]
    fn map_keeps_decoded_order() {
        let map = decode(MultipartField::Map, r#"{"b": ["x"], "a": ["y"], "c": []}"#).unwrap();

        let keys: Vec<_> = file_map(map).unwrap().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn decode_errors() {
        let error = decode(MultipartField::Operations, "\"query\"").unwrap_err();
        insta::assert_snapshot!(error.to_string(), @"expected operations to be an object or array, got string");

        let error = decode(MultipartField::Map, "5").unwrap_err();
        insta::assert_snapshot!(error.to_string(), @"expected map to be an object or array, got number");

        let error = decode(MultipartField::Map, "{").unwrap_err();
        assert!(matches!(
            error,
            RequestError::InvalidMultipartJson {
                field: MultipartField::Map,
                ..
            }
        ));
    }
}
