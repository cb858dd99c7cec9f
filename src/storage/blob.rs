// Azure Blob Storage upload (Put Blob) with Shared Key authorization.
//
// Auth docs: https://learn.microsoft.com/rest/api/storageservices/authorize-with-shared-key
//
// Only the headers we actually send take part in the signature. Blob names
// are sanitized to URL-safe ASCII before they get here, so the canonical
// resource never needs percent-encoding.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;
use tracing::info;
use uuid::Uuid;

use super::BlobStore;
use crate::services::azure::{ensure_success, http_client};

const API_VERSION: &str = "2021-08-06";

/// Blob store backed by one Azure Storage container.
pub struct AzureBlobStore {
    client: Client,
    account: String,
    key: Vec<u8>,
    container: String,
    base_url: String,
}

impl AzureBlobStore {
    /// `account_key` is the base64 key shown in the Azure portal.
    /// `endpoint` overrides `https://<account>.blob.core.windows.net`.
    pub fn new(
        account: &str,
        account_key: &str,
        container: &str,
        endpoint: Option<&str>,
    ) -> Result<Self> {
        let key = STANDARD
            .decode(account_key.trim())
            .context("Storage account key is not valid base64")?;
        let base_url = endpoint
            .map(|e| e.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{account}.blob.core.windows.net"));

        Ok(Self {
            client: http_client()?,
            account: account.to_string(),
            key,
            container: container.to_string(),
            base_url,
        })
    }

    fn blob_url(&self, blob_name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.container, blob_name)
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let blob_name = unique_blob_name(file_name);
        let url = self.blob_url(&blob_name);
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let size = bytes.len();

        let to_sign = string_to_sign(&PutBlobRequest {
            account: &self.account,
            container: &self.container,
            blob: &blob_name,
            content_length: size,
            content_type,
            date: &date,
        });
        let signature = sign(&self.key, &to_sign)?;

        let response = self
            .client
            .put(&url)
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-date", &date)
            .header("x-ms-version", API_VERSION)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("SharedKey {}:{}", self.account, signature),
            )
            .body(bytes)
            .send()
            .await
            .context("Failed to upload blob")?;

        ensure_success(response, "Azure Blob Storage").await?;

        info!(blob = %blob_name, size, "Uploaded image");
        Ok(url)
    }
}

/// `<uuid v4>_<sanitized name>`, unique per upload.
pub fn unique_blob_name(file_name: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize_file_name(file_name))
}

/// Reduce an uploaded file name to a safe ASCII name.
///
/// Drops any directory part, folds accented Latin letters to their base
/// letter ("reseña" becomes "resena"), turns whitespace runs into `_`, keeps
/// only ASCII alphanumerics, `.`, `-` and `_`, and strips leading/trailing
/// dots and underscores. Falls back to "upload" when nothing survives.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(fold_accent)
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Base letter of a precomposed Latin-1 accented letter; other chars pass through.
///
/// Decomposed input needs no folding: the combining mark is not ASCII and gets
/// filtered out, leaving the base letter.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        other => other,
    }
}

struct PutBlobRequest<'a> {
    account: &'a str,
    container: &'a str,
    blob: &'a str,
    content_length: usize,
    content_type: &'a str,
    date: &'a str,
}

/// Canonical string-to-sign for a Put Blob request.
///
/// Standard header slots in order: verb, Content-Encoding, Content-Language,
/// Content-Length (empty when zero), Content-MD5, Content-Type, Date,
/// If-Modified-Since, If-Match, If-None-Match, If-Unmodified-Since, Range.
fn string_to_sign(req: &PutBlobRequest<'_>) -> String {
    let length = if req.content_length == 0 {
        String::new()
    } else {
        req.content_length.to_string()
    };

    format!(
        "PUT\n\n\n{length}\n\n{content_type}\n\n\n\n\n\n\n\
         x-ms-blob-type:BlockBlob\n\
         x-ms-date:{date}\n\
         x-ms-version:{version}\n\
         /{account}/{container}/{blob}",
        content_type = req.content_type,
        date = req.date,
        version = API_VERSION,
        account = req.account,
        container = req.container,
        blob = req.blob,
    )
}

fn sign(key: &[u8], string_to_sign: &str) -> Result<String> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).context("Invalid storage account key length")?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request(content_length: usize) -> PutBlobRequest<'static> {
        PutBlobRequest {
            account: "cuenta",
            container: "imagenes-ocr",
            blob: "abc_foto.png",
            content_length,
            content_type: "image/png",
            date: "Mon, 19 Oct 2026 10:00:00 GMT",
        }
    }

    #[test]
    fn test_string_to_sign_layout() {
        let s = string_to_sign(&sample_request(4));
        let lines: Vec<&str> = s.split('\n').collect();
        assert_eq!(lines[0], "PUT");
        assert_eq!(lines[3], "4");
        assert_eq!(lines[5], "image/png");
        assert_eq!(lines[12], "x-ms-blob-type:BlockBlob");
        assert_eq!(lines[15], "/cuenta/imagenes-ocr/abc_foto.png");
        assert_eq!(lines.len(), 16);
    }

    #[test]
    fn test_zero_length_is_blank() {
        let s = string_to_sign(&sample_request(0));
        assert_eq!(s.split('\n').nth(3), Some(""));
    }

    #[test]
    fn test_sign_known_vector() {
        let key = STANDARD.decode("Y2xhdmUtZGUtcHJ1ZWJh").unwrap();
        let signature = sign(&key, &string_to_sign(&sample_request(4))).unwrap();
        assert_eq!(signature, "cRFbr+il7YhPuMyZ/ZyEJy4BhoRQ/sS6BxPlegZKxXU=");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("foto reseña 1.png"), "foto_resena_1.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\fotos\\ticket.jpg"), "ticket.jpg");
        assert_eq!(sanitize_file_name(".oculto"), "oculto");
        assert_eq!(sanitize_file_name("日本語"), "upload");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn test_sanitize_folds_accents() {
        assert_eq!(sanitize_file_name("Canción Año.JPG"), "Cancion_Ano.JPG");
        assert_eq!(sanitize_file_name("pingüino.png"), "pinguino.png");
        // already decomposed: "n" + combining tilde
        assert_eq!(sanitize_file_name("resen\u{0303}a.png"), "resena.png");
    }

    #[test]
    fn test_unique_blob_name_prefix() {
        let a = unique_blob_name("foto.png");
        let b = unique_blob_name("foto.png");
        assert!(a.ends_with("_foto.png"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_rejects_bad_key() {
        assert!(AzureBlobStore::new("cuenta", "%%%no-base64%%%", "imagenes-ocr", None).is_err());
    }

    #[test]
    fn test_default_endpoint() {
        let store = AzureBlobStore::new("cuenta", "Y2xhdmUtZGUtcHJ1ZWJh", "imagenes-ocr", None).unwrap();
        assert_eq!(
            store.blob_url("x.png"),
            "https://cuenta.blob.core.windows.net/imagenes-ocr/x.png"
        );
    }
}
