//! Request DTOs for the HTTP API.

use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::auth::RegistrationRequest;
use crate::file::UploadRequest;

/// User registration request.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Login email.
    #[serde(default)]
    pub email: Option<String>,
    /// Clear-text password.
    #[serde(default)]
    pub password: Option<String>,
}

impl From<CreateUserRequest> for RegistrationRequest {
    fn from(req: CreateUserRequest) -> Self {
        RegistrationRequest {
            email: req.email,
            password: req.password,
        }
    }
}

/// File entry creation request.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// One of `folder`, `file`, `image`.
    #[serde(default, rename = "type")]
    #[schema(value_type = Option<String>)]
    pub file_type: Option<Value>,
    /// Initial visibility (default false).
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub is_public: Option<Value>,
    /// Parent folder ID, or `0` for the root.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub parent_id: Option<Value>,
    /// Base64 content; required unless `type` is `folder`.
    #[serde(default)]
    pub data: Option<String>,
}

impl From<CreateFileRequest> for UploadRequest {
    fn from(req: CreateFileRequest) -> Self {
        let parent_id = match req.parent_id {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        // Anything but a string falls through to "Missing type"
        let file_type = match req.file_type {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        UploadRequest {
            name: req.name,
            file_type,
            is_public: req.is_public.as_ref().is_some_and(is_truthy),
            parent_id,
            data: req.data,
        }
    }
}

/// Loose truthiness for flags sent by untyped clients.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Query parameters for listing entries.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Parent folder ID; absent, `0` or unknown means the root.
    pub parent_id: Option<String>,
    /// Zero-based page number.
    pub page: Option<String>,
}

/// Query parameters for reading content.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileDataQuery {
    /// Image rendition width: 100, 250 or 500.
    pub size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upload(body: Value) -> UploadRequest {
        serde_json::from_value::<CreateFileRequest>(body).unwrap().into()
    }

    #[test]
    fn test_create_file_request_full() {
        let req = upload(json!({
            "name": "hello.txt",
            "type": "file",
            "isPublic": true,
            "parentId": "b3c0e6f2-9e59-4a35-8a1c-7a3c7f1f0a11",
            "data": "aGVsbG8=",
        }));

        assert_eq!(req.name.as_deref(), Some("hello.txt"));
        assert_eq!(req.file_type.as_deref(), Some("file"));
        assert!(req.is_public);
        assert_eq!(
            req.parent_id.as_deref(),
            Some("b3c0e6f2-9e59-4a35-8a1c-7a3c7f1f0a11")
        );
        assert_eq!(req.data.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn test_create_file_request_root_variants() {
        assert_eq!(upload(json!({})).parent_id, None);
        assert_eq!(upload(json!({"parentId": null})).parent_id, None);
        assert_eq!(upload(json!({"parentId": 0})).parent_id.as_deref(), Some("0"));
        assert_eq!(upload(json!({"parentId": "0"})).parent_id.as_deref(), Some("0"));
    }

    #[test]
    fn test_create_file_request_defaults() {
        let req = upload(json!({"name": "docs", "type": "folder"}));
        assert!(!req.is_public);
        assert!(req.data.is_none());
    }

    #[test]
    fn test_create_file_request_loose_types() {
        let req = upload(json!({"name": "a", "type": 5, "isPublic": "true"}));
        assert!(req.file_type.is_none());
        assert!(req.is_public);

        for flag in [json!(null), json!(false), json!(0), json!("")] {
            assert!(!upload(json!({ "isPublic": flag })).is_public);
        }
        for flag in [json!(1), json!("yes"), json!([])] {
            assert!(upload(json!({ "isPublic": flag })).is_public);
        }
    }

    #[test]
    fn test_create_user_request() {
        let req: CreateUserRequest = serde_json::from_value(json!({"email": "a@b.c"})).unwrap();
        let reg: RegistrationRequest = req.into();
        assert_eq!(reg.email.as_deref(), Some("a@b.c"));
        assert!(reg.password.is_none());
    }
}
