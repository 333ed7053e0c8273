use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub status: &'static str,
    pub file_id: String,
}
