//! File entry repository for files-manager.
//!
//! SQLite implementation of [`FileStore`].

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::entry::{FileEntry, FileType, NewFileEntry, ParentId};
use crate::db::FileStore;
use crate::{FilesError, Result};

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, name, type, is_public, parent_id, local_path FROM files";

#[derive(sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    #[sqlx(rename = "type")]
    file_type: String,
    is_public: bool,
    parent_id: Option<Uuid>,
    local_path: Option<String>,
}

impl TryFrom<FileRow> for FileEntry {
    type Error = FilesError;

    fn try_from(row: FileRow) -> Result<Self> {
        let file_type: FileType = row.file_type.parse().map_err(|_| {
            FilesError::Database(format!("unknown file type '{}' for {}", row.file_type, row.id))
        })?;

        Ok(FileEntry {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            file_type,
            is_public: row.is_public,
            parent_id: ParentId::from_option(row.parent_id),
            local_path: row.local_path,
        })
    }
}

/// Repository for file entry records.
#[derive(Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new FileRepository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn insert(&self, new_entry: &NewFileEntry) -> Result<FileEntry> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO files (id, user_id, name, type, is_public, parent_id, local_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(new_entry.user_id)
        .bind(&new_entry.name)
        .bind(new_entry.file_type.as_str())
        .bind(new_entry.is_public)
        .bind(new_entry.parent_id.as_option())
        .bind(&new_entry.local_path)
        .execute(&self.pool)
        .await
        .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(FileEntry {
            id,
            user_id: new_entry.user_id,
            name: new_entry.name.clone(),
            file_type: new_entry.file_type,
            is_public: new_entry.is_public,
            parent_id: new_entry.parent_id,
            local_path: new_entry.local_path.clone(),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileEntry>> {
        let row = sqlx::query_as::<_, FileRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| FilesError::Database(e.to_string()))?;

        row.map(FileEntry::try_from).transpose()
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<FileEntry>> {
        let row = sqlx::query_as::<_, FileRow>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FilesError::Database(e.to_string()))?;

        row.map(FileEntry::try_from).transpose()
    }

    async fn list_children(
        &self,
        owner: Uuid,
        parent: ParentId,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<FileEntry>> {
        // `IS` matches NULL for root entries as well as folder IDs.
        let rows = sqlx::query_as::<_, FileRow>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = $1 AND parent_id IS $2
             ORDER BY rowid LIMIT $3 OFFSET $4"
        ))
        .bind(owner)
        .bind(parent.as_option())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(skip).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FilesError::Database(e.to_string()))?;

        rows.into_iter().map(FileEntry::try_from).collect()
    }

    async fn set_public(&self, id: Uuid, is_public: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE files SET is_public = $1 WHERE id = $2")
            .bind(is_public)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository, UserStore};

    async fn setup() -> (Database, FileRepository, Uuid) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool().clone());
        let owner = users
            .insert(&NewUser::new("owner@test.com", "digest"))
            .await
            .unwrap()
            .id;
        (db.clone(), FileRepository::new(db.pool().clone()), owner)
    }

    fn new_entry(owner: Uuid, name: &str, file_type: FileType, parent: ParentId) -> NewFileEntry {
        NewFileEntry {
            user_id: owner,
            name: name.to_string(),
            file_type,
            is_public: false,
            parent_id: parent,
            local_path: file_type
                .has_content()
                .then(|| format!("/tmp/files_manager/{name}")),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (_db, repo, owner) = setup().await;

        let created = repo
            .insert(&new_entry(owner, "a.txt", FileType::File, ParentId::Root))
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.parent_id, ParentId::Root);
        assert_eq!(found.local_path.as_deref(), Some("/tmp/files_manager/a.txt"));
    }

    #[tokio::test]
    async fn test_folder_has_no_local_path() {
        let (_db, repo, owner) = setup().await;

        let folder = repo
            .insert(&new_entry(owner, "docs", FileType::Folder, ParentId::Root))
            .await
            .unwrap();

        let found = repo.find_by_id(folder.id).await.unwrap().unwrap();
        assert_eq!(found.file_type, FileType::Folder);
        assert!(found.local_path.is_none());
    }

    #[tokio::test]
    async fn test_find_owned_scopes_by_owner() {
        let (_db, repo, owner) = setup().await;
        let entry = repo
            .insert(&new_entry(owner, "a.txt", FileType::File, ParentId::Root))
            .await
            .unwrap();

        assert!(repo.find_owned(entry.id, owner).await.unwrap().is_some());
        assert!(repo.find_owned(entry.id, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_children_by_parent() {
        let (_db, repo, owner) = setup().await;
        let folder = repo
            .insert(&new_entry(owner, "docs", FileType::Folder, ParentId::Root))
            .await
            .unwrap();
        repo.insert(&new_entry(owner, "root.txt", FileType::File, ParentId::Root))
            .await
            .unwrap();
        repo.insert(&new_entry(
            owner,
            "inner.txt",
            FileType::File,
            ParentId::Folder(folder.id),
        ))
        .await
        .unwrap();

        let root = repo.list_children(owner, ParentId::Root, 0, 20).await.unwrap();
        let names: Vec<_> = root.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["docs", "root.txt"]);

        let inner = repo
            .list_children(owner, ParentId::Folder(folder.id), 0, 20)
            .await
            .unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].name, "inner.txt");
    }

    #[tokio::test]
    async fn test_list_children_skip_limit_keeps_insertion_order() {
        let (_db, repo, owner) = setup().await;
        for i in 0..5 {
            repo.insert(&new_entry(owner, &format!("f{i}"), FileType::File, ParentId::Root))
                .await
                .unwrap();
        }

        let page = repo.list_children(owner, ParentId::Root, 2, 2).await.unwrap();
        let names: Vec<_> = page.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["f2", "f3"]);

        let tail = repo.list_children(owner, ParentId::Root, 4, 2).await.unwrap();
        assert_eq!(tail.len(), 1);

        let other = repo
            .list_children(Uuid::new_v4(), ParentId::Root, 0, 20)
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_set_public() {
        let (_db, repo, owner) = setup().await;
        let entry = repo
            .insert(&new_entry(owner, "a.txt", FileType::File, ParentId::Root))
            .await
            .unwrap();

        assert!(repo.set_public(entry.id, true).await.unwrap());
        assert!(repo.find_by_id(entry.id).await.unwrap().unwrap().is_public);

        assert!(repo.set_public(entry.id, false).await.unwrap());
        assert!(!repo.find_by_id(entry.id).await.unwrap().unwrap().is_public);

        assert!(!repo.set_public(Uuid::new_v4(), true).await.unwrap());
    }

    #[tokio::test]
    async fn test_count() {
        let (_db, repo, owner) = setup().await;
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.insert(&new_entry(owner, "a", FileType::Folder, ParentId::Root))
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
