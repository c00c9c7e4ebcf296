use http::Method;

use crate::{BatchRequest, Error, Map, OperationParams, RawParameters, Result, Value};

/// Turns decoded request parameters into typed operation parameters.
///
/// `body` is `None` when the request carried no body parameters at all, as for GET requests.
/// `query` holds the decoded query string, which is the base for every operation.
pub trait OperationParamsBuilder {
    fn build(&self, method: &Method, body: Option<RawParameters>, query: Map) -> Result<BatchRequest>;
}

impl<T: OperationParamsBuilder + ?Sized> OperationParamsBuilder for &T {
    fn build(&self, method: &Method, body: Option<RawParameters>, query: Map) -> Result<BatchRequest> {
        (**self).build(method, body, query)
    }
}

/// Builder following the GraphQL-over-HTTP conventions: GET requests are read from the query
/// string and are read-only, POST requests overlay their body on the query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOperationParamsBuilder;

impl OperationParamsBuilder for DefaultOperationParamsBuilder {
    fn build(&self, method: &Method, body: Option<RawParameters>, query: Map) -> Result<BatchRequest> {
        if method == Method::GET {
            return OperationParams::from_parameters(query, true).map(BatchRequest::Single);
        }

        if method != Method::POST {
            return Err(Error::UnsupportedMethod(method.clone()));
        }

        match body {
            None => OperationParams::from_parameters(query, false).map(BatchRequest::Single),
            Some(RawParameters::Single(fields)) => {
                OperationParams::from_parameters(overlay(query, fields), false).map(BatchRequest::Single)
            }
            Some(RawParameters::Batch(operations)) => operations
                .into_iter()
                .map(|fields| OperationParams::from_parameters(overlay(query.clone(), fields), false))
                .collect::<Result<Vec<_>>>()
                .map(BatchRequest::Batch),
        }
    }
}

fn overlay(mut base: Map, fields: Map) -> Map {
    base.extend(fields);
    base
}

const QUERY_ID_KEYS: [&str; 4] = ["queryid", "documentid", "doc_id", "id"];

impl OperationParams {
    /// Reads the parameters of one operation. Field names are matched case-insensitively.
    pub fn from_parameters(fields: Map, read_only: bool) -> Result<Self> {
        let mut fields: Map = fields
            .into_iter()
            .map(|(key, value)| (key.to_ascii_lowercase(), value))
            .collect();

        let query = take_string(&mut fields, "query", "query")?;
        let operation_name = take_string(&mut fields, "operationname", "operationName")?;

        let mut query_id = None;
        for key in QUERY_ID_KEYS {
            if let Some(id) = take_string(&mut fields, key, "queryId")? {
                query_id.get_or_insert(id);
            }
        }

        let variables = take_object(&mut fields, "variables", "variables")?;
        let extensions = take_object(&mut fields, "extensions", "extensions")?;

        // Apollo clients send the hash of a persisted query in place of the query text.
        if query.as_deref().unwrap_or_default().is_empty() && query_id.is_none() {
            query_id = extensions
                .as_ref()
                .and_then(|extensions| extensions.get("persistedQuery"))
                .and_then(|persisted_query| persisted_query.pointer(["sha256Hash"]))
                .and_then(Value::as_str)
                .map(str::to_owned);

            if query_id.is_some() {
                tracing::trace!("using the persisted query hash as query id");
            }
        }

        Ok(OperationParams {
            query,
            operation_name,
            query_id,
            variables,
            extensions,
            read_only,
        })
    }
}

fn take_string(fields: &mut Map, key: &str, name: &'static str) -> Result<Option<String>> {
    match fields.swap_remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::invalid_parameter(name, "a string", other.kind())),
    }
}

const EXPECTED_OBJECT: &str = "an object or a JSON encoded object";

fn take_object(fields: &mut Map, key: &str, name: &'static str) -> Result<Option<Map>> {
    match fields.swap_remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => match serde_json::from_str::<serde_json::Value>(&s).map(Value::from) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(Value::Null) => Ok(None),
            Ok(other) => Err(Error::invalid_parameter(name, EXPECTED_OBJECT, format!("encoded {}", other.kind()))),
            Err(err) => Err(Error::invalid_parameter(name, EXPECTED_OBJECT, format!("invalid JSON ({err})"))),
        },
        Some(other) => Err(Error::invalid_parameter(name, EXPECTED_OBJECT, other.kind())),
    }
}
