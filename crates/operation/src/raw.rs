use crate::{Map, Value};

/// Body parameters before they are checked field by field: a single operation or a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RawParameters {
    Single(Map),
    Batch(Vec<Map>),
}

impl RawParameters {
    pub fn len(&self) -> usize {
        match self {
            RawParameters::Single(_) => 1,
            RawParameters::Batch(operations) => operations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, RawParameters::Batch(_))
    }
}

/// Accepts an object, or a non-empty array made only of objects. Anything else is handed back.
impl TryFrom<Value> for RawParameters {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(RawParameters::Single(map)),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                let operations = items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(map),
                        _ => None,
                    })
                    .collect();

                Ok(RawParameters::Batch(operations))
            }
            other => Err(other),
        }
    }
}

impl From<RawParameters> for Value {
    fn from(parameters: RawParameters) -> Self {
        match parameters {
            RawParameters::Single(map) => Value::Object(map),
            RawParameters::Batch(operations) => Value::Array(operations.into_iter().map(Value::Object).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(json: serde_json::Value) -> Result<RawParameters, Value> {
        RawParameters::try_from(Value::from(json))
    }

    #[test]
    fn object_is_single() {
        let parameters = raw(json!({"query": "{ a }"})).unwrap();

        assert!(!parameters.is_batch());
        assert_eq!(parameters.len(), 1);
    }

    #[test]
    fn array_of_objects_is_batch() {
        let parameters = raw(json!([{"query": "{ a }"}, {"query": "{ b }"}])).unwrap();

        assert!(parameters.is_batch());
        assert_eq!(parameters.len(), 2);
    }

    #[test]
    fn rejected_shapes_are_handed_back() {
        for json in [json!([]), json!([{"query": "{ a }"}, 1]), json!("{ a }"), json!(null), json!(12)] {
            let rejected = raw(json.clone()).unwrap_err();
            assert_eq!(rejected, Value::from(json));
        }
    }
}
