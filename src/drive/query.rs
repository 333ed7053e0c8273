pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// A name lookup against the store. Trashed items never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
    pub name: String,
    pub parent: Option<String>,
    pub folders_only: bool,
}

impl FileQuery {
    pub fn folder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            folders_only: true,
        }
    }

    pub fn file_in(parent_id: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: Some(parent_id.to_string()),
            folders_only: false,
        }
    }

    /// Renders the Drive v3 `q` parameter.
    pub fn to_drive_q(&self) -> String {
        let mut clauses = Vec::with_capacity(4);
        if self.folders_only {
            clauses.push(format!("mimeType='{}'", FOLDER_MIME));
        }
        clauses.push(format!("name='{}'", escape(&self.name)));
        if let Some(parent) = &self.parent {
            clauses.push(format!("'{}' in parents", escape(parent)));
        }
        clauses.push("trashed=false".to_string());
        clauses.join(" and ")
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
