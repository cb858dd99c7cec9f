// Image storage — uploaded images go to a blob container so the OCR service
// can fetch them by URL.

pub mod blob;

use anyhow::Result;
use async_trait::async_trait;

pub use blob::AzureBlobStore;

/// Stores an uploaded file and returns a URL the OCR service can read.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

/// Content type for an image file, from its extension.
pub fn image_content_type(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
