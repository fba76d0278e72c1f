use std::fs;
use std::path::{Path, PathBuf};

use crate::slug::slugify;

/// Maximum accepted photo size (5MB).
pub const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug)]
pub enum UploadError {
    Empty,
    TooLarge(usize),
    UnknownFormat,
    Io(std::io::Error),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::Empty => write!(f, "empty file"),
            UploadError::TooLarge(size) => {
                write!(f, "file is {size} bytes, maximum is {MAX_PHOTO_SIZE}")
            }
            UploadError::UnknownFormat => write!(f, "unrecognized file format"),
            UploadError::Io(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err)
    }
}

/// Writes submitted files into the configured uploads directory under a
/// sanitized, collision-free name.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `data` and return the filename it was stored under.
    ///
    /// The extension comes from the sniffed content (falling back to the
    /// declared MIME type), never from the client-supplied filename, so a
    /// `.jpg` that is really a PNG lands as `.png`. The stored name is
    /// `<sanitized-stem>_<random-token>.<ext>`; the token makes concurrent
    /// uploads of identically-named files collision-free in practice.
    pub fn store(
        &self,
        original_filename: &str,
        mime_hint: &str,
        data: &[u8],
    ) -> Result<String, UploadError> {
        if data.is_empty() {
            return Err(UploadError::Empty);
        }
        if data.len() > MAX_PHOTO_SIZE {
            return Err(UploadError::TooLarge(data.len()));
        }

        let ext = detect_extension(data, mime_hint).ok_or(UploadError::UnknownFormat)?;

        let stem = slugify(file_stem(original_filename));
        let stem = if stem.is_empty() { "file" } else { stem.as_str() };

        let token: [u8; 8] = rand::random();
        let filename = format!("{stem}_{}.{ext}", hex::encode(token));

        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(&filename), data)?;

        tracing::info!(
            original = %original_filename,
            stored = %filename,
            size = data.len(),
            "File stored"
        );

        Ok(filename)
    }
}

/// Client filename with its extension (and any path prefix) stripped.
fn file_stem(filename: &str) -> &str {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Derive a file extension from the actual bytes, not the client's word.
fn detect_extension(data: &[u8], mime_hint: &str) -> Option<&'static str> {
    if let Ok(format) = image::guess_format(data) {
        return match format {
            image::ImageFormat::Png => Some("png"),
            image::ImageFormat::Jpeg => Some("jpg"),
            image::ImageFormat::WebP => Some("webp"),
            image::ImageFormat::Gif => Some("gif"),
            other => other.extensions_str().first().copied(),
        };
    }

    // Not an image the sniffer knows; trust the declared type for the few
    // non-image formats the catalog accepts.
    match mime_hint {
        "application/pdf" => Some("pdf"),
        "text/plain" => Some("txt"),
        _ => None,
    }
}
