//! In-memory `FileStore` for tests. Counts every remote call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use super::{AccessToken, DriveError, FileQuery, FileStore, RemoteFile};

/// Token the fake rejects the way Drive rejects an expired one.
pub const EXPIRED_TOKEN: &str = "expired";

#[derive(Debug, Clone)]
pub struct FakeEntry {
    pub id: String,
    pub name: String,
    pub parent: Option<String>,
    pub is_folder: bool,
    pub trashed: bool,
    pub content: Bytes,
}

#[derive(Default)]
pub struct MemoryDrive {
    entries: Mutex<Vec<FakeEntry>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MemoryDrive {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn folders(&self) -> Vec<FakeEntry> {
        self.snapshot().into_iter().filter(|e| e.is_folder).collect()
    }

    pub fn files(&self) -> Vec<FakeEntry> {
        self.snapshot().into_iter().filter(|e| !e.is_folder).collect()
    }

    pub fn insert(&self, entry: FakeEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    fn snapshot(&self) -> Vec<FakeEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn touch(&self, token: &AccessToken) -> Result<(), DriveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if token.secret() == EXPIRED_TOKEN {
            return Err(DriveError::Unauthorized("Invalid Credentials".into()));
        }
        Ok(())
    }

    fn add(&self, name: &str, parent: Option<&str>, is_folder: bool, content: Bytes) -> String {
        let id = format!("id-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.insert(FakeEntry {
            id: id.clone(),
            name: name.to_string(),
            parent: parent.map(str::to_string),
            is_folder,
            trashed: false,
            content,
        });
        id
    }
}

#[async_trait]
impl FileStore for MemoryDrive {
    async fn list(
        &self,
        token: &AccessToken,
        query: &FileQuery,
    ) -> Result<Vec<RemoteFile>, DriveError> {
        self.touch(token)?;
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|e| !e.trashed && e.name == query.name)
            .filter(|e| !query.folders_only || e.is_folder)
            .filter(|e| query.parent.is_none() || e.parent == query.parent)
            .map(|e| RemoteFile { id: e.id, name: e.name })
            .collect())
    }

    async fn create_folder(&self, token: &AccessToken, name: &str) -> Result<String, DriveError> {
        self.touch(token)?;
        Ok(self.add(name, None, true, Bytes::new()))
    }

    async fn create_file(
        &self,
        token: &AccessToken,
        parent_id: &str,
        name: &str,
        body: Bytes,
    ) -> Result<String, DriveError> {
        self.touch(token)?;
        Ok(self.add(name, Some(parent_id), false, body))
    }

    async fn update_file(
        &self,
        token: &AccessToken,
        file_id: &str,
        body: Bytes,
    ) -> Result<(), DriveError> {
        self.touch(token)?;
        let mut entries = self.entries.lock().unwrap();
        match entries.iter_mut().find(|e| e.id == file_id) {
            Some(entry) => {
                entry.content = body;
                Ok(())
            }
            None => Err(DriveError::Api {
                status: 404,
                message: format!("File not found: {file_id}"),
            }),
        }
    }

    async fn download(&self, token: &AccessToken, file_id: &str) -> Result<Bytes, DriveError> {
        self.touch(token)?;
        self.snapshot()
            .into_iter()
            .find(|e| e.id == file_id)
            .map(|e| e.content)
            .ok_or_else(|| DriveError::Api {
                status: 404,
                message: format!("File not found: {file_id}"),
            })
    }
}
