use crate::dtos::{GenerateResponse, GenerateTextRequest};
use crate::error::AppError;
use crate::services::StagedFile;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};

const DOCUMENT_INSTRUCTION: &str = "Analyze this Document";
const AUDIO_INSTRUCTION: &str = "Transcribe or analyze this Audio";

/// Sent upstream regardless of the upload's declared type.
const AUDIO_MIME_TYPE: &str = "audio/mpeg";

pub async fn generate_text(
    State(state): State<AppState>,
    Json(req): Json<GenerateTextRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let prompt = match req.prompt {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::BadRequest(anyhow::anyhow!("Prompt is required"))),
    };

    let text = state.provider.generate(&prompt, &[]).await?;
    Ok(Json(GenerateResponse { text }))
}

pub async fn generate_from_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let (file, prompt) = read_upload(&state, &mut multipart, "image").await?;
    let upload =
        file.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Image file is required")))?;

    let part = upload.staged.to_media_part(&upload.mime_type).await?;
    let text = state
        .provider
        .generate(prompt.as_deref().unwrap_or(""), &[part])
        .await?;

    Ok(Json(GenerateResponse { text }))
}

pub async fn generate_from_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let (file, _) = read_upload(&state, &mut multipart, "document").await?;
    let upload =
        file.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Document file is required")))?;

    let part = upload.staged.to_media_part(&upload.mime_type).await?;
    let text = state.provider.generate(DOCUMENT_INSTRUCTION, &[part]).await?;

    Ok(Json(GenerateResponse { text }))
}

pub async fn generate_from_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let (file, _) = read_upload(&state, &mut multipart, "audio").await?;
    let upload =
        file.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Audio file is required")))?;

    let part = upload.staged.to_media_part(AUDIO_MIME_TYPE).await?;
    let text = state.provider.generate(AUDIO_INSTRUCTION, &[part]).await?;

    Ok(Json(GenerateResponse { text }))
}

/// An upload staged for one request. The staged file is removed when this
/// drops, whether the provider call succeeded or failed.
struct UploadedFile {
    staged: StagedFile,
    mime_type: String,
}

/// Read the multipart form, staging the named file field and collecting an
/// optional `prompt` text field. Unknown fields are ignored.
async fn read_upload(
    state: &AppState,
    multipart: &mut Multipart,
    file_field: &str,
) -> Result<(Option<UploadedFile>, Option<String>), AppError> {
    let mut file = None;
    let mut prompt = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some(name) if name == file_field => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                })?;

                tracing::debug!(
                    field = %file_field,
                    mime_type = %mime_type,
                    size = data.len(),
                    "Staging uploaded file"
                );

                let staged = state.staging.stage(&data).await?;
                file = Some(UploadedFile { staged, mime_type });
            }
            Some("prompt") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read prompt field: {}", e))
                })?;
                prompt = Some(text);
            }
            _ => {}
        }
    }

    Ok((file, prompt))
}
