//! Inbound file sources for statement imports.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// An uploaded file as seen by the import path.
pub trait Upload {
    fn is_empty(&self) -> bool;

    fn content_type(&self) -> Option<&str>;

    fn reader(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// Upload backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileUpload {
    path: PathBuf,
    len: u64,
    content_type: Option<String>,
}

impl FileUpload {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a file", path.display()),
            ));
        }

        Ok(Self {
            content_type: content_type_for(&path).map(str::to_string),
            len: metadata.len(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Upload for FileUpload {
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn reader(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}

/// Upload held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryUpload {
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl MemoryUpload {
    pub fn new(content_type: Option<&str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    pub fn csv(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Some(CSV_CONTENT_TYPE), bytes)
    }
}

impl Upload for MemoryUpload {
    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn reader(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(self.bytes.as_slice()))
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "csv" => Some(CSV_CONTENT_TYPE),
        "txt" => Some("text/plain"),
        _ => None,
    }
}
