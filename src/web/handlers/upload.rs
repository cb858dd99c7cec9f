// POST /upload — multipart image upload followed by the full analysis.
//
// Fields: `file` (required, the image) and `to` (optional target language).
// Returns 400 for a malformed or empty upload and 502 when storage or one of
// the Azure services fails.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::storage::image_content_type;
use crate::web::{api_error, AppState};

struct UploadedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// POST /upload — store the image, then run OCR, translation and analysis.
pub async fn upload_and_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file: Option<UploadedFile> = None;
    let mut target: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.body_text()),
        };

        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| image_content_type(&name).to_string());
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.body_text()),
                };
                file = Some(UploadedFile {
                    name,
                    content_type,
                    bytes,
                });
            }
            Some("to") => match field.text().await {
                Ok(value) if !value.trim().is_empty() => target = Some(value.trim().to_string()),
                Ok(_) => {}
                Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.body_text()),
            },
            _ => {}
        }
    }

    let Some(file) = file.filter(|f| !f.bytes.is_empty()) else {
        return api_error(StatusCode::BAD_REQUEST, "Missing or empty 'file' field");
    };
    let to = target.unwrap_or_else(|| state.pipeline.target_language().to_string());

    match state
        .pipeline
        .analyze_upload(
            state.store.as_ref(),
            &file.name,
            file.bytes,
            &file.content_type,
            &to,
        )
        .await
    {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), file = %file.name, "Image analysis failed");
            api_error(StatusCode::BAD_GATEWAY, &format!("{e:#}"))
        }
    }
}
