use operation::{BatchRequest, DefaultOperationParamsBuilder, Map, OperationParamsBuilder, RawParameters, Value};

use crate::{body, ContentType, GraphqlHttpRequest, RequestError, RequestParserConfig, Result};

/// Converts incoming HTTP requests into GraphQL operation parameters.
///
/// GET requests are read from the query string only. POST requests have their body decoded
/// first, the result being handed together with the query string to the
/// [`OperationParamsBuilder`], which produces the final single operation or batch.
#[derive(Debug, Clone)]
pub struct RequestParser<B = DefaultOperationParamsBuilder> {
    builder: B,
    config: RequestParserConfig,
}

impl RequestParser {
    pub fn new() -> Self {
        Self::with_builder(DefaultOperationParamsBuilder)
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: OperationParamsBuilder> RequestParser<B> {
    pub fn with_builder(builder: B) -> Self {
        RequestParser {
            builder,
            config: RequestParserConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RequestParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RequestParserConfig {
        &self.config
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Converts an incoming HTTP request to one or more operation parameters.
    ///
    /// The request is only read, so parsing it again yields the same result.
    pub fn parse_request<R>(&self, request: &R) -> Result<BatchRequest>
    where
        R: GraphqlHttpRequest + ?Sized,
    {
        let method = request.method();
        let query = decode_query_string(request.query_string())?;

        let body = if method == http::Method::POST {
            Some(self.extract_body(request)?)
        } else {
            None
        };

        tracing::debug!(
            %method,
            operations = body.as_ref().map_or(1, RawParameters::len),
            batch = body.as_ref().is_some_and(RawParameters::is_batch),
            "building operation parameters"
        );

        Ok(self.builder.build(method, body, query)?)
    }

    /// Decodes the body of a POST request into raw parameters, without building operations.
    pub fn extract_body<R>(&self, request: &R) -> Result<RawParameters>
    where
        R: GraphqlHttpRequest + ?Sized,
    {
        let content_type = ContentType::extract_from(request.headers());

        tracing::debug!(%content_type, body_size = request.raw_body().len(), "decoding request body");

        let parameters = body::extract(request, &content_type, self.config.file_uploads.enabled)?;
        self.check_batch(&parameters)?;

        Ok(parameters)
    }

    fn check_batch(&self, parameters: &RawParameters) -> Result<()> {
        let RawParameters::Batch(operations) = parameters else {
            return Ok(());
        };

        if !self.config.batching.enabled {
            return Err(RequestError::BatchingDisabled);
        }

        match self.config.batching.limit {
            Some(limit) if operations.len() > limit => Err(RequestError::BatchTooLarge {
                size: operations.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}

fn decode_query_string(query: Option<&str>) -> Result<Map> {
    let Some(query) = query else {
        return Ok(Map::new());
    };

    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .map(|pairs| pairs.into_iter().map(|(name, value)| (name, Value::String(value))).collect())
        .map_err(|err| RequestError::MalformedQueryString { reason: err.to_string() })
}
