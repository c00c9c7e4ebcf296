/// Request decoding settings. The defaults accept batches of any size and file uploads.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestParserConfig {
    /// Batched operations, sent as a JSON array
    pub batching: BatchingConfig,
    /// Multipart requests carrying files
    pub file_uploads: FileUploadsConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchingConfig {
    pub enabled: bool,
    /// Maximum number of operations in one batch.
    pub limit: Option<usize>,
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileUploadsConfig {
    pub enabled: bool,
}

impl Default for FileUploadsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
