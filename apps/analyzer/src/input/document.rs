//! Document selection surface: the only place resume files are accepted or rejected by type.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::errors::SelectionError;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Resume formats the analysis service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Pdf,
    Docx,
}

impl DocumentType {
    pub fn mime(self) -> &'static str {
        match self {
            DocumentType::Pdf => PDF_MIME,
            DocumentType::Docx => DOCX_MIME,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        // Ignore parameters such as "; charset=binary".
        let essence = mime.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            Some(DocumentType::Pdf)
        } else if essence.eq_ignore_ascii_case(DOCX_MIME) {
            Some(DocumentType::Docx)
        } else {
            None
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentType::Pdf),
            "docx" => Some(DocumentType::Docx),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Pdf => write!(f, "pdf"),
            DocumentType::Docx => write!(f, "docx"),
        }
    }
}

/// A selected resume document. Content is immutable once selected; cloning
/// shares the underlying buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    name: String,
    doc_type: DocumentType,
    content: Bytes,
}

impl ResumeFile {
    /// Browse equivalent: reads a document from disk.
    /// The type is checked from the extension before any bytes are read.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SelectionError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let doc_type = DocumentType::from_file_name(&name)
            .ok_or_else(|| SelectionError::UnsupportedType(name.clone()))?;

        let content = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", content.len(), path.display());

        Self::build(name, doc_type, Bytes::from(content))
    }

    /// Drag-and-drop equivalent: accepts an in-memory document by MIME type.
    pub fn from_bytes(
        name: impl Into<String>,
        mime: &str,
        content: impl Into<Bytes>,
    ) -> Result<Self, SelectionError> {
        let doc_type = DocumentType::from_mime(mime)
            .ok_or_else(|| SelectionError::UnsupportedType(mime.to_string()))?;
        Self::build(name.into(), doc_type, content.into())
    }

    fn build(name: String, doc_type: DocumentType, content: Bytes) -> Result<Self, SelectionError> {
        if content.is_empty() {
            return Err(SelectionError::Empty(name));
        }
        Ok(Self {
            name,
            doc_type,
            content,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    pub fn mime(&self) -> &'static str {
        self.doc_type.mime()
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// Keeps document bytes out of logs.
impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("name", &self.name)
            .field("doc_type", &self.doc_type)
            .field("len", &self.content.len())
            .finish()
    }
}
