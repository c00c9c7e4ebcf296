use crate::{Error, Map};

/// Parameters of a single GraphQL operation, ready for the execution engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationParams {
    pub query: Option<String>,
    pub operation_name: Option<String>,
    /// Identifier of a persisted or trusted document, sent instead of the query text.
    pub query_id: Option<String>,
    pub variables: Option<Map>,
    pub extensions: Option<Map>,
    /// Set for requests which must not run mutations, such as GET requests.
    pub read_only: bool,
}

/// What the builder produced for one HTTP request: one operation, or the operations of a JSON
/// array body in the order they were sent.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchRequest {
    Single(OperationParams),
    Batch(Vec<OperationParams>),
}

impl BatchRequest {
    /// Returns the operation of a non-batched request, or `UnsupportedBatch` for a batch.
    pub fn into_single(self) -> Result<OperationParams, Error> {
        match self {
            BatchRequest::Single(params) => Ok(params),
            BatchRequest::Batch(_) => Err(Error::UnsupportedBatch),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationParams> {
        let (single, batch) = match self {
            BatchRequest::Single(params) => (Some(params), None),
            BatchRequest::Batch(operations) => (None, Some(operations.iter())),
        };

        single.into_iter().chain(batch.into_iter().flatten())
    }

    pub fn len(&self) -> usize {
        match self {
            BatchRequest::Single(_) => 1,
            BatchRequest::Batch(operations) => operations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, BatchRequest::Batch(_))
    }
}

impl IntoIterator for BatchRequest {
    type Item = OperationParams;
    type IntoIter = std::vec::IntoIter<OperationParams>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            BatchRequest::Single(params) => vec![params].into_iter(),
            BatchRequest::Batch(operations) => operations.into_iter(),
        }
    }
}
