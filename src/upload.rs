use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::constants::{ACCEPTED_IMAGE_MIMES, IMAGE_FIELD_NAME};
use crate::error::{AnalysisError, ValidationError};
use crate::models::UploadedImage;

/// Picks the declared content type when there is one, otherwise guesses from
/// the file name. `image/jpg` is rewritten to `image/jpeg`, the only JPEG type
/// Gemini recognises.
pub fn resolve_mime_type(candidate: Option<&str>, file_name: Option<&str>) -> String {
    let declared = candidate
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty() && value != "application/octet-stream");

    let mime_type = declared.unwrap_or_else(|| {
        file_name
            .and_then(|name| mime_guess::from_path(name).first_raw())
            .unwrap_or("application/octet-stream")
            .to_string()
    });

    if mime_type == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        mime_type
    }
}

pub fn sanitize_file_name(file_name: &str) -> Option<String> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() || trimmed.contains('\0') {
        return None;
    }

    // browsers on some platforms send the full client path
    let base = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    if base.is_empty() || base == ".." {
        return None;
    }

    Some(base.to_string())
}

/// Drains the form and returns the first non-empty `image` field, or the last
/// empty one when no field carried bytes. Other fields are ignored.
pub async fn read_image_field(
    multipart: &mut Multipart,
) -> Result<Option<UploadedImage>, AnalysisError> {
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD_NAME) {
            continue;
        }
        if image
            .as_ref()
            .is_some_and(|kept: &UploadedImage| !kept.bytes.is_empty())
        {
            continue;
        }

        let file_name = field.file_name().and_then(sanitize_file_name);
        let declared = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_error)?;

        let mime_type = resolve_mime_type(declared.as_deref(), file_name.as_deref());
        tracing::debug!(
            file_name = file_name.as_deref().unwrap_or("<none>"),
            %mime_type,
            size = bytes.len(),
            "received image field"
        );

        image = Some(UploadedImage {
            file_name,
            mime_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(image)
}

fn upload_error(err: MultipartError) -> ValidationError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::TooLarge
    } else {
        ValidationError::MalformedUpload {
            message: err.body_text(),
        }
    }
}

fn is_accepted_mime(mime_type: &str) -> bool {
    ACCEPTED_IMAGE_MIMES.contains(&mime_type)
}

/// Inline preview for uploads that would be accepted for analysis.
pub fn preview_uri(upload: &UploadedImage) -> Option<String> {
    (!upload.bytes.is_empty() && is_accepted_mime(&upload.mime_type)).then(|| upload.data_uri())
}

/// Turns the optional upload into an image ready to send, or fails with
/// "no image" when nothing usable was uploaded.
pub fn input_image_setup(upload: Option<UploadedImage>) -> Result<UploadedImage, ValidationError> {
    let image = upload
        .filter(|image| !image.bytes.is_empty())
        .ok_or(ValidationError::NoImage)?;

    if !is_accepted_mime(&image.mime_type) {
        return Err(ValidationError::UnsupportedType {
            mime_type: image.mime_type,
        });
    }

    Ok(image)
}
