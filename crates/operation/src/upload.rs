use std::{fmt, sync::Arc};

use bytes::Bytes;

/// A file part of a multipart request, as handed over by the HTTP server.
///
/// The content is never inspected while decoding a request.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        UploadedFile {
            filename: filename.into(),
            content_type: None,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Shared handle to an [`UploadedFile`].
///
/// Cloning is cheap and two handles are equal only if they point to the same file.
#[derive(Clone)]
pub struct Upload(Arc<UploadedFile>);

impl Upload {
    pub fn new(file: UploadedFile) -> Self {
        Upload(Arc::new(file))
    }

    pub fn filename(&self) -> &str {
        &self.0.filename
    }

    pub fn content_type(&self) -> Option<&str> {
        self.0.content_type.as_deref()
    }

    pub fn size(&self) -> usize {
        self.0.content.len()
    }

    pub fn content(&self) -> &Bytes {
        &self.0.content
    }
}

impl From<UploadedFile> for Upload {
    fn from(file: UploadedFile) -> Self {
        Upload::new(file)
    }
}

impl PartialEq for Upload {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("filename", &self.0.filename)
            .field("content_type", &self.0.content_type)
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_identity() {
        let upload = Upload::new(UploadedFile::new("a.txt", "hello"));
        let same_content = Upload::new(UploadedFile::new("a.txt", "hello"));

        assert_eq!(upload, upload.clone());
        assert_ne!(upload, same_content);
    }

    #[test]
    fn metadata() {
        let upload = Upload::from(UploadedFile::new("a.png", vec![0u8; 16]).with_content_type("image/png"));

        assert_eq!(upload.filename(), "a.png");
        assert_eq!(upload.content_type(), Some("image/png"));
        assert_eq!(upload.size(), 16);
    }
}
