//! Request payloads.
//!
//! Whether a payload goes out as JSON or as `multipart/form-data` is decided
//! by the caller through [`Body`], never by inspecting the payload.

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::ApiError;

/// Payload for `post`, `put` and `patch`.
pub enum Body {
    /// Serialized as JSON and sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Sent as-is; the HTTP stack writes the multipart content type and boundary.
    Multipart(Form),
}

impl Body {
    /// Serialize any value into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBody` if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(ApiError::InvalidBody)
    }

    /// Wrap a multipart form.
    #[must_use]
    pub const fn multipart(form: Form) -> Self {
        Self::Multipart(form)
    }

    /// Whether this body is a multipart form.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Form> for Body {
    fn from(form: Form) -> Self {
        Self::Multipart(form)
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Multipart(form) => f
                .debug_struct("Multipart")
                .field("boundary", &form.boundary())
                .finish_non_exhaustive(),
        }
    }
}

/// A file to attach to a multipart form.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Form field name (e.g. `images`, `image`, `logo`).
    pub field: String,
    /// File name reported to the backend.
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub mime: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create an upload for the given form field.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    fn into_part(self) -> Result<(String, Part), ApiError> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?;
        Ok((self.field, part))
    }
}

/// Build a multipart form from the top-level fields of a serializable value
/// plus any number of file uploads.
///
/// Strings are sent verbatim, numbers and booleans in their JSON text form,
/// arrays and objects as JSON text, and `null` fields are left out.
///
/// # Errors
///
/// Returns `ApiError::InvalidBody` if the value does not serialize to a JSON
/// object, or `ApiError::Transport` if an upload has an invalid MIME type.
pub fn form_from_fields<T: Serialize + ?Sized>(
    fields: &T,
    files: Vec<FileUpload>,
) -> Result<Form, ApiError> {
    let value = serde_json::to_value(fields).map_err(ApiError::InvalidBody)?;
    let serde_json::Value::Object(map) = value else {
        return Err(ApiError::InvalidBody(serde::ser::Error::custom(
            "multipart fields must serialize to a JSON object",
        )));
    };

    let mut form = Form::new();
    for (key, value) in map {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        form = form.text(key, text);
    }

    for file in files {
        let (field, part) = file.into_part()?;
        form = form.part(field, part);
    }

    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body_from_struct() {
        #[derive(Serialize)]
        struct Payload {
            name: &'static str,
        }

        let body = Body::json(&Payload { name: "Ganesha" }).unwrap();
        assert!(!body.is_multipart());
        match body {
            Body::Json(value) => assert_eq!(value, json!({"name": "Ganesha"})),
            Body::Multipart(_) => panic!("expected JSON body"),
        }
    }

    #[test]
    fn test_multipart_body_is_tagged() {
        let body = Body::from(Form::new().text("name", "Lakshmi"));
        assert!(body.is_multipart());
        assert!(format!("{body:?}").starts_with("Multipart"));
    }

    #[test]
    fn test_form_from_fields_rejects_non_object() {
        let err = form_from_fields(&json!([1, 2, 3]), Vec::new()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[test]
    fn test_form_from_fields_accepts_files() {
        let upload = FileUpload::new("images", "idol.jpg", "image/jpeg", vec![0xFF, 0xD8]);
        let form = form_from_fields(&json!({"name": "Idol", "price": 1499, "note": null}), vec![upload]);
        assert!(form.is_ok());
    }

    #[test]
    fn test_invalid_mime_is_rejected() {
        let upload = FileUpload::new("images", "idol.jpg", "not a mime", vec![1]);
        assert!(form_from_fields(&json!({}), vec![upload]).is_err());
    }
}
