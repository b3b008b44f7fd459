#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::fs;
use std::path::Path;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::new_id;

/// Declared types an upload may carry. The list is enforced for every entry
/// point; anything else is accepted into the pending list but routed to the
/// error status by the pipeline.
pub const ACCEPTED_EXTENSIONS: [&str; 14] = [
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "csv", "png", "jpg", "jpeg", "gif",
    "webp",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Pdf,
    Word,
    Sheet,
    Slides,
    Text,
    Image,
    Other,
}

impl FileKind {
    pub fn from_extension(extension: &str) -> FileKind {
        match extension.to_lowercase().as_str() {
            "pdf" => return FileKind::Pdf,
            "doc" | "docx" => return FileKind::Word,
            "xls" | "xlsx" | "csv" => return FileKind::Sheet,
            "ppt" | "pptx" => return FileKind::Slides,
            "txt" => return FileKind::Text,
            "png" | "jpg" | "jpeg" | "gif" | "webp" => return FileKind::Image,
            _ => return FileKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Pdf => return "PDF",
            FileKind::Word => return "DOC",
            FileKind::Sheet => return "XLS",
            FileKind::Slides => return "PPT",
            FileKind::Text => return "TXT",
            FileKind::Image => return "IMG",
            FileKind::Other => return "FILE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Uploading,
    Processing,
    Complete,
    Error,
}

impl FileStatus {
    fn rank(self) -> u8 {
        match self {
            FileStatus::Uploading => return 0,
            FileStatus::Processing => return 1,
            // Both are terminal.
            FileStatus::Complete | FileStatus::Error => return 2,
        }
    }

    /// The lifecycle only ever moves forward. Stale pipeline events for a
    /// stage already passed are dropped by this check.
    pub fn can_advance_to(self, next: FileStatus) -> bool {
        return next.rank() > self.rank();
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Uploading => return "uploading",
            FileStatus::Processing => return "processing",
            FileStatus::Complete => return "ready",
            FileStatus::Error => return "error",
        }
    }
}

/// Metadata and lifecycle status for one attached file. The file's content is
/// opaque to DocuChat and is never read.
#[derive(Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub kind: FileKind,
    pub status: FileStatus,
}

impl FileRecord {
    pub fn from_path(path: &Path) -> Result<FileRecord> {
        let metadata = fs::metadata(path)?;
        if metadata.is_dir() {
            bail!(format!("{} is a directory, not a file", path.display()));
        }

        let name = match path.file_name() {
            Some(file_name) => file_name.to_string_lossy().to_string(),
            None => bail!(format!("{} has no file name", path.display())),
        };

        return Ok(FileRecord {
            id: new_id(),
            kind: FileKind::from_extension(&extension_of(&name)),
            name,
            size: metadata.len(),
            status: FileStatus::Uploading,
        });
    }

    pub fn is_accepted(&self) -> bool {
        return ACCEPTED_EXTENSIONS.contains(&extension_of(&self.name).as_str());
    }
}

fn extension_of(name: &str) -> String {
    if let Some((_, extension)) = name.rsplit_once('.') {
        return extension.to_lowercase();
    }
    return "".to_string();
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let mut formatted = format!("{size:.2}");
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }

    return format!("{formatted} {}", UNITS[unit]);
}
