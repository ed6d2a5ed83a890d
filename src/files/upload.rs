use axum::body::Bytes;
use axum::extract::Multipart;

use crate::core::config::UploadConfig;
use crate::core::errors::ApiError;

/// Multipart field the browser client puts the document in.
pub const FILE_FIELD: &str = "file";

const TOO_LARGE: &str = "File too large or invalid";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub contents: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.contents.len()
    }
}

/// Pulls the `file` field out of an upload form and validates it.
///
/// The extension is checked from the part's file name before any of its
/// bytes are read; the body is then read chunk by chunk and abandoned as soon
/// as it passes `max_bytes`. Other fields are skipped.
pub async fn read_upload(
    multipart: &mut Multipart,
    config: &UploadConfig,
) -> Result<UploadedFile, ApiError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request(TOO_LARGE))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(sanitize_file_name)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::bad_request("No file provided"))?;

        if !has_allowed_extension(&file_name, &config.allowed_extensions) {
            tracing::warn!(file_name = %file_name, "Rejected upload with unsupported extension");
            return Err(ApiError::bad_request(format!(
                "File type not allowed: {}",
                file_name
            )));
        }

        let mut contents = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|_| ApiError::bad_request(TOO_LARGE))?
        {
            if contents.len() + chunk.len() > config.max_bytes {
                tracing::warn!(
                    file_name = %file_name,
                    limit = config.max_bytes,
                    "Rejected upload over size limit"
                );
                return Err(ApiError::bad_request(TOO_LARGE));
            }
            contents.extend_from_slice(&chunk);
        }

        return Ok(UploadedFile {
            file_name,
            contents: Bytes::from(contents),
        });
    }

    Err(ApiError::bad_request("No file provided"))
}

/// Last path component of a client-supplied name; browsers on Windows may
/// send full paths.
pub fn sanitize_file_name(raw: &str) -> String {
    raw.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Case-insensitive match on the text after the last `.`. A name with no dot
/// has no extension and is refused.
pub fn has_allowed_extension(file_name: &str, allowed: &[String]) -> bool {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    allowed.iter().any(|candidate| candidate.eq_ignore_ascii_case(ext))
}
