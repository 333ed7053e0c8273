mod client;
mod error;
#[cfg(test)]
pub mod fake;
mod query;

pub use client::{FileStore, GoogleDrive, RemoteFile};
pub use error::DriveError;
pub use query::FileQuery;

/// OAuth access token supplied by the caller for a single request.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
