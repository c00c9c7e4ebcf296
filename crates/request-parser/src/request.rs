use bytes::Bytes;
use operation::Upload;

/// The parts of an incoming HTTP request needed to decode GraphQL operations.
///
/// The request is expected to be fully buffered. Servers which support multipart requests
/// split the body into form fields and files beforehand and expose them through
/// [`form_field`](Self::form_field) and [`file`](Self::file).
pub trait GraphqlHttpRequest {
    fn method(&self) -> &http::Method;

    fn headers(&self) -> &http::HeaderMap;

    /// The raw query string, without the leading `?`.
    fn query_string(&self) -> Option<&str>;

    fn raw_body(&self) -> &[u8];

    /// A non-file field of a multipart body.
    fn form_field(&self, name: &str) -> Option<&str>;

    /// A file field of a multipart body.
    fn file(&self, name: &str) -> Option<Upload>;
}

impl<B: AsRef<[u8]>> GraphqlHttpRequest for http::Request<B> {
    fn method(&self) -> &http::Method {
        http::Request::method(self)
    }

    fn headers(&self) -> &http::HeaderMap {
        http::Request::headers(self)
    }

    fn query_string(&self) -> Option<&str> {
        self.uri().query()
    }

    fn raw_body(&self) -> &[u8] {
        self.body().as_ref()
    }

    fn form_field(&self, _name: &str) -> Option<&str> {
        None
    }

    fn file(&self, _name: &str) -> Option<Upload> {
        None
    }
}

/// A buffered request together with the parts of its multipart body.
#[derive(Debug)]
pub struct BufferedRequest {
    inner: http::Request<Bytes>,
    form_fields: Vec<(String, String)>,
    files: Vec<(String, Upload)>,
}

impl BufferedRequest {
    pub fn new(request: http::Request<Bytes>) -> Self {
        BufferedRequest {
            inner: request,
            form_fields: Vec::new(),
            files: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, upload: impl Into<Upload>) -> Self {
        self.files.push((name.into(), upload.into()));
        self
    }

    pub fn inner(&self) -> &http::Request<Bytes> {
        &self.inner
    }

    pub fn into_inner(self) -> http::Request<Bytes> {
        self.inner
    }
}

impl From<http::Request<Bytes>> for BufferedRequest {
    fn from(request: http::Request<Bytes>) -> Self {
        BufferedRequest::new(request)
    }
}

// When a field is repeated the last occurrence wins, as with any other form.
impl GraphqlHttpRequest for BufferedRequest {
    fn method(&self) -> &http::Method {
        self.inner.method()
    }

    fn headers(&self) -> &http::HeaderMap {
        self.inner.headers()
    }

    fn query_string(&self) -> Option<&str> {
        self.inner.uri().query()
    }

    fn raw_body(&self) -> &[u8] {
        self.inner.body()
    }

    fn form_field(&self, name: &str) -> Option<&str> {
        self.form_fields
            .iter()
            .rev()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    fn file(&self, name: &str) -> Option<Upload> {
        self.files
            .iter()
            .rev()
            .find(|(field, _)| field == name)
            .map(|(_, upload)| upload.clone())
    }
}
