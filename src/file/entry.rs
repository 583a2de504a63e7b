//! File entry model for files-manager.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{FilesError, Result};

/// Kind of a file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Directory node without content.
    Folder,
    /// Plain file.
    File,
    /// Image file; gets thumbnail renditions after upload.
    Image,
}

impl FileType {
    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Folder => "folder",
            FileType::File => "file",
            FileType::Image => "image",
        }
    }

    /// Whether this entry carries content.
    pub fn has_content(&self) -> bool {
        !matches!(self, FileType::Folder)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = FilesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "folder" => Ok(FileType::Folder),
            "file" => Ok(FileType::File),
            "image" => Ok(FileType::Image),
            _ => Err(FilesError::Validation("Missing type".to_string())),
        }
    }
}

/// Parent of a file entry: the root or a folder.
///
/// On the wire the root is the number `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentId {
    /// No parent folder.
    #[default]
    Root,
    /// The folder with this ID.
    Folder(Uuid),
}

impl ParentId {
    /// Parse a client-supplied parent reference.
    ///
    /// `""` and `"0"` mean the root. Returns `None` for anything that is
    /// neither the root nor a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" | "0" => Some(ParentId::Root),
            s => Uuid::parse_str(s).ok().map(ParentId::Folder),
        }
    }

    /// Parent reference for listing: unparsable input falls back to the root.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    /// The folder ID, or `None` for the root.
    pub fn as_option(&self) -> Option<Uuid> {
        match self {
            ParentId::Root => None,
            ParentId::Folder(id) => Some(*id),
        }
    }

    /// Inverse of [`ParentId::as_option`].
    pub fn from_option(id: Option<Uuid>) -> Self {
        id.map_or(ParentId::Root, ParentId::Folder)
    }
}

impl Serialize for ParentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ParentId::Root => serializer.serialize_u8(0),
            ParentId::Folder(id) => id.serialize(serializer),
        }
    }
}

/// A stored file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Unique entry ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Display name; its extension drives the served content type.
    pub name: String,
    /// Entry kind.
    pub file_type: FileType,
    /// Whether anyone may read the content.
    pub is_public: bool,
    /// Parent folder.
    pub parent_id: ParentId,
    /// Content location; always `None` for folders.
    pub local_path: Option<String>,
}

impl FileEntry {
    /// The public projection of this entry.
    pub fn view(&self) -> FileView {
        FileView {
            id: self.id,
            user_id: self.user_id,
            name: self.name.clone(),
            file_type: self.file_type,
            is_public: self.is_public,
            parent_id: self.parent_id,
        }
    }
}

/// Data for creating a new file entry.
#[derive(Debug, Clone)]
pub struct NewFileEntry {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Entry kind.
    pub file_type: FileType,
    /// Initial visibility.
    pub is_public: bool,
    /// Parent folder.
    pub parent_id: ParentId,
    /// Content location (non-folders only).
    pub local_path: Option<String>,
}

/// File entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    /// Entry ID.
    pub id: Uuid,
    /// Owner ID.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Visibility.
    pub is_public: bool,
    /// Parent folder ID, or `0` for the root.
    #[schema(value_type = String, example = "0")]
    pub parent_id: ParentId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_type_round_trip() {
        for t in [FileType::Folder, FileType::File, FileType::Image] {
            assert_eq!(t.as_str().parse::<FileType>().unwrap(), t);
        }
    }

    #[test]
    fn test_file_type_rejects_unknown() {
        let err = "video".parse::<FileType>().unwrap_err();
        assert_eq!(err.to_string(), "validation error: Missing type");
        assert!("Folder".parse::<FileType>().is_err());
    }

    #[test]
    fn test_file_type_has_content() {
        assert!(!FileType::Folder.has_content());
        assert!(FileType::File.has_content());
        assert!(FileType::Image.has_content());
    }

    #[test]
    fn test_parent_id_parse() {
        let id = Uuid::new_v4();

        assert_eq!(ParentId::parse(""), Some(ParentId::Root));
        assert_eq!(ParentId::parse("0"), Some(ParentId::Root));
        assert_eq!(ParentId::parse(&id.to_string()), Some(ParentId::Folder(id)));
        assert_eq!(ParentId::parse("not-an-id"), None);
    }

    #[test]
    fn test_parent_id_parse_lenient() {
        assert_eq!(ParentId::parse_lenient(None), ParentId::Root);
        assert_eq!(ParentId::parse_lenient(Some("garbage")), ParentId::Root);

        let id = Uuid::new_v4();
        assert_eq!(
            ParentId::parse_lenient(Some(&id.to_string())),
            ParentId::Folder(id)
        );
    }

    #[test]
    fn test_parent_id_option_conversion() {
        let id = Uuid::new_v4();
        assert_eq!(ParentId::from_option(None), ParentId::Root);
        assert_eq!(ParentId::from_option(Some(id)).as_option(), Some(id));
    }

    #[test]
    fn test_file_view_json_shape() {
        let entry = FileEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "hello.txt".to_string(),
            file_type: FileType::File,
            is_public: false,
            parent_id: ParentId::Root,
            local_path: Some("/tmp/files_manager/x".to_string()),
        };

        let json = serde_json::to_value(entry.view()).unwrap();
        assert_eq!(
            json,
            json!({
                "id": entry.id.to_string(),
                "userId": entry.user_id.to_string(),
                "name": "hello.txt",
                "type": "file",
                "isPublic": false,
                "parentId": 0,
            })
        );
    }

    #[test]
    fn test_file_view_folder_parent() {
        let folder = Uuid::new_v4();
        let view = FileView {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "pic.png".to_string(),
            file_type: FileType::Image,
            is_public: true,
            parent_id: ParentId::Folder(folder),
        };

        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["parentId"], folder.to_string());
        assert_eq!(json["type"], "image");
    }
}
