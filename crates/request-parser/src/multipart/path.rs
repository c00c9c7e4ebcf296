use std::borrow::Cow;

use operation::{Map, Value};

/// Largest array index a path may address. Indexing past the end of an array pads it with
/// nulls, so this bounds what a single path can allocate.
pub(crate) const MAX_INDEX: usize = 10_000;

/// Largest number of segments in a path, matching the nesting limit of `serde_json`. Writing
/// through a path recurses once per segment.
pub(crate) const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum PathError {
    #[error("index {segment} is larger than {max}")]
    IndexTooLarge { segment: String, max: usize },
    #[error("path is nested deeper than {max} segments")]
    TooDeep { max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> Segment<'a> {
    fn parse(raw: &'a str) -> Result<Self, PathError> {
        let is_index = !raw.is_empty()
            && raw.bytes().all(|byte| byte.is_ascii_digit())
            && (raw == "0" || !raw.starts_with('0'));

        if !is_index {
            return Ok(Segment::Key(raw));
        }

        match raw.parse::<usize>() {
            Ok(index) if index <= MAX_INDEX => Ok(Segment::Index(index)),
            _ => Err(PathError::IndexTooLarge {
                segment: raw.to_owned(),
                max: MAX_INDEX,
            }),
        }
    }

    fn to_key(self) -> Cow<'a, str> {
        match self {
            Segment::Key(key) => Cow::Borrowed(key),
            Segment::Index(index) => Cow::Owned(index.to_string()),
        }
    }
}

#[derive(Default)]
struct PathSegments<'a>(Vec<Segment<'a>>);

impl<'a> PathSegments<'a> {
    fn push(&mut self, raw: &'a str) -> Result<(), PathError> {
        if self.0.len() == MAX_DEPTH {
            return Err(PathError::TooDeep { max: MAX_DEPTH });
        }
        self.0.push(Segment::parse(raw)?);
        Ok(())
    }
}

/// A location inside the `operations` value of a multipart request, such as `variables.file`
/// or `0.variables.files.1`. `files[1]` is accepted as an alias of `files.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperationsPath<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> OperationsPath<'a> {
    pub(crate) fn parse(path: &'a str) -> Result<Self, PathError> {
        let mut path_segments = PathSegments::default();

        for part in path.split('.') {
            match part.split_once('[') {
                None => path_segments.push(part)?,
                Some((head, rest)) => {
                    if !head.is_empty() {
                        path_segments.push(head)?;
                    }
                    for piece in rest.split('[') {
                        path_segments.push(piece.strip_suffix(']').unwrap_or(piece))?;
                    }
                }
            }
        }

        Ok(OperationsPath {
            segments: path_segments.0,
        })
    }

    /// Writes `value` at this path, replacing whatever was there.
    ///
    /// Missing or scalar intermediate nodes become arrays for index segments and objects for key
    /// segments. A key segment reaching an array turns it into an object keyed by the former
    /// indices, and an index segment reaching an object is used as a key.
    pub(crate) fn assign(&self, root: &mut Value, value: Value) {
        *root = assign(std::mem::take(root), &self.segments, value);
    }
}

fn assign(node: Value, segments: &[Segment<'_>], value: Value) -> Value {
    let Some((segment, rest)) = segments.split_first() else {
        return value;
    };

    match (node, *segment) {
        (Value::Array(mut items), Segment::Index(index)) => {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            let child = std::mem::take(&mut items[index]);
            items[index] = assign(child, rest, value);
            Value::Array(items)
        }
        (Value::Object(mut map), segment) => {
            let key = segment.to_key();
            let child = map.get_mut(key.as_ref()).map(std::mem::take).unwrap_or_default();
            let child = assign(child, rest, value);
            map.insert(key.into_owned(), child);
            Value::Object(map)
        }
        (Value::Array(items), Segment::Key(_)) => {
            let map: Map = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect();
            assign(Value::Object(map), segments, value)
        }
        (_, Segment::Index(_)) => assign(Value::Array(Vec::new()), segments, value),
        (_, Segment::Key(_)) => assign(Value::Object(Map::new()), segments, value),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn assign_at(root: serde_json::Value, path: &str, value: serde_json::Value) -> Value {
        let mut root = Value::from(root);
        OperationsPath::parse(path).unwrap().assign(&mut root, Value::from(value));
        root
    }

    #[test]
    fn segments() {
        let path = OperationsPath::parse("0.variables.files[1].a[2][3]").unwrap();

        assert_eq!(
            path.segments,
            [
                Segment::Index(0),
                Segment::Key("variables"),
                Segment::Key("files"),
                Segment::Index(1),
                Segment::Key("a"),
                Segment::Index(2),
                Segment::Index(3),
            ]
        );
    }

    #[test]
    fn non_canonical_numbers_are_keys() {
        let path = OperationsPath::parse("01.-1.1e3").unwrap();

        assert_eq!(
            path.segments,
            [Segment::Key("01"), Segment::Key("-1"), Segment::Key("1e3")]
        );
    }

    #[test]
    fn index_too_large() {
        let error = OperationsPath::parse("variables.files.10001").unwrap_err();
        insta::assert_snapshot!(error.to_string(), @"index 10001 is larger than 10000");

        assert!(OperationsPath::parse("variables.files.99999999999999999999999").is_err());
        assert!(OperationsPath::parse("variables.files.10000").is_ok());
    }

    #[test]
    fn too_deep() {
        let error = OperationsPath::parse(&"a.".repeat(20_000)).unwrap_err();
        insta::assert_snapshot!(error.to_string(), @"path is nested deeper than 128 segments");

        let error = OperationsPath::parse(&format!("variables{}", "[0]".repeat(MAX_DEPTH))).unwrap_err();
        assert_eq!(error, PathError::TooDeep { max: MAX_DEPTH });

        assert!(OperationsPath::parse(&format!("{}a", "a.".repeat(MAX_DEPTH - 1))).is_ok());
    }

    #[test]
    fn replaces_existing_null() {
        let root = assign_at(
            json!({"query": "q", "variables": {"file": null}}),
            "variables.file",
            json!("F"),
        );

        assert_eq!(root, Value::from(json!({"query": "q", "variables": {"file": "F"}})));
    }

    #[test]
    fn creates_missing_intermediate_nodes() {
        let root = assign_at(json!({"query": "q"}), "variables.input.files.0", json!("F"));

        assert_eq!(
            root,
            Value::from(json!({"query": "q", "variables": {"input": {"files": ["F"]}}}))
        );
    }

    #[test]
    fn extends_arrays_past_their_length() {
        let root = assign_at(json!({"variables": {"files": [null]}}), "variables.files.2", json!("F"));

        assert_eq!(root, Value::from(json!({"variables": {"files": [null, null, "F"]}})));
    }

    #[test]
    fn overwrites_scalars() {
        let root = assign_at(json!({"variables": "oops"}), "variables.file", json!("F"));
        assert_eq!(root, Value::from(json!({"variables": {"file": "F"}})));

        let root = assign_at(json!({"variables": {"files": 3}}), "variables.files.0", json!("F"));
        assert_eq!(root, Value::from(json!({"variables": {"files": ["F"]}})));
    }

    #[test]
    fn batch_root() {
        let root = assign_at(
            json!([{"variables": {"file": null}}, {"variables": {"file": null}}]),
            "1.variables.file",
            json!("F"),
        );

        assert_eq!(
            root,
            Value::from(json!([{"variables": {"file": null}}, {"variables": {"file": "F"}}]))
        );
    }

    #[test]
    fn key_on_array_keeps_items() {
        let root = assign_at(json!({"list": ["a", "b"]}), "list.extra", json!("F"));

        assert_eq!(root, Value::from(json!({"list": {"0": "a", "1": "b", "extra": "F"}})));
    }

    #[test]
    fn index_on_object_is_a_key() {
        let root = assign_at(json!({"variables": {"a": 1}}), "variables.0", json!("F"));

        assert_eq!(root, Value::from(json!({"variables": {"a": 1, "0": "F"}})));
    }

    #[test]
    fn keeps_key_order_when_overwriting() {
        let root = assign_at(json!({"a": 1, "b": 2, "c": 3}), "b", json!("F"));

        let Value::Object(map) = root else {
            unreachable!("assigned into an object")
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    }
}
