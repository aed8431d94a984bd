use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::warn;

use crate::errors::{AppError, ErrorKind, Rejection};
use crate::models::resume::FileInput;
use crate::resume::validation::too_large_message;

/// Name of the multipart field carrying the résumé document.
pub const FILE_FIELD: &str = "file";

/// Reads the `file` part of a multipart upload into memory.
///
/// Other parts are drained and ignored. A zero-byte `file` part is returned as-is;
/// rejecting it is the pipeline's job. A body cut off by the request size limit is
/// reported as `TooLarge` against `max_bytes`, the same as the pipeline's size gate.
pub async fn read_resume_file(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<FileInput, AppError> {
    let mut file: Option<FileInput> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(e, "Failed to read form field", max_bytes))?
    {
        let is_file = field.name() == Some(FILE_FIELD) && file.is_none();
        let declared_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| read_error(e, "Failed to read file data", max_bytes))?;

        if is_file {
            file = Some(FileInput::new(declared_name, bytes));
        }
    }

    file.ok_or_else(|| AppError::BadRequest(format!("Missing multipart field '{FILE_FIELD}'")))
}

fn read_error(err: MultipartError, context: &str, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let rejection = Rejection::new(ErrorKind::TooLarge, too_large_message(max_bytes));
        warn!(
            kind = rejection.kind.code(),
            max_bytes, "Upload exceeded the request body limit"
        );
        AppError::Rejected(rejection)
    } else {
        AppError::BadRequest(format!("{context}: {err}"))
    }
}
