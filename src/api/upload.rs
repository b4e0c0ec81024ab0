//! Multipart upload reading
//!
//! Streams the multipart payload field-by-field, enforcing size limits while
//! the data is still arriving rather than after buffering it whole. Text
//! fields carry their own smaller cap so no part of the payload is unbounded.

use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;

use crate::model::{AnalysisRequest, MediaKind, ValidationError, MAX_UPLOAD_BYTES};

/// Maximum accepted size for a non-file text field: 1 MB
pub const MAX_TEXT_FIELD_BYTES: usize = 1024 * 1024;

/// A received file before modality validation
struct ReceivedFile {
    bytes: Vec<u8>,
    mime_type: String,
    filename: String,
}

/// Read a multipart payload and validate its file field for the given modality
///
/// Text fields are collected alongside the file (the transcription endpoint
/// sends a `language` field this way).
pub async fn read_upload(
    payload: Multipart,
    file_field: &'static str,
    kind: MediaKind,
) -> Result<(AnalysisRequest, HashMap<String, String>), ValidationError> {
    let (file, fields) = collect_parts(payload, file_field).await?;

    let file = file.ok_or(ValidationError::MissingFile(kind.label()))?;
    let request = AnalysisRequest::new(file.bytes, file.mime_type, file.filename, kind)?;

    Ok((request, fields))
}

async fn collect_parts(
    mut payload: Multipart,
    file_field: &'static str,
) -> Result<(Option<ReceivedFile>, HashMap<String, String>), ValidationError> {
    let mut file = None;
    let mut fields = HashMap::new();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ValidationError::Unreadable(e.to_string()))?
    {
        let name = field.name().to_string();
        let limit = if name == file_field {
            MAX_UPLOAD_BYTES
        } else {
            MAX_TEXT_FIELD_BYTES
        };

        let data = read_field_data(&mut field, limit).await?;

        if name == file_field {
            let mime_type = field
                .content_type()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let filename = field
                .content_disposition()
                .get_filename()
                .unwrap_or("upload")
                .to_string();

            file = Some(ReceivedFile {
                bytes: data,
                mime_type,
                filename,
            });
        } else {
            fields.insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    Ok((file, fields))
}

/// Buffer a field up to `limit` bytes
///
/// On overflow the buffer is dropped and the rest of the field is drained
/// counting only, so the error reports the actual size without holding it.
async fn read_field_data(field: &mut Field, limit: usize) -> Result<Vec<u8>, ValidationError> {
    let mut data = Vec::new();
    let mut overflow: Option<usize> = None;

    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| ValidationError::Unreadable(e.to_string()))?
    {
        match overflow.as_mut() {
            Some(total) => *total += chunk.len(),
            None => {
                if data.len() + chunk.len() > limit {
                    overflow = Some(data.len() + chunk.len());
                    data = Vec::new();
                } else {
                    data.extend_from_slice(&chunk);
                }
            }
        }
    }

    match overflow {
        Some(size) => Err(ValidationError::TooLarge { size, limit }),
        None => Ok(data),
    }
}
