use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier used when a caller saves without naming a project.
pub const DEFAULT_PROJECT_ID: &str = "default";

/// Relative file path -> file content, in the order the caller supplied them.
pub type ProjectFiles = IndexMap<String, String>;

/// The saved state of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub files: ProjectFiles,
    pub last_modified: DateTime<Utc>,
}

impl ProjectRecord {
    pub fn new(id: impl Into<String>, files: ProjectFiles) -> Self {
        Self {
            id: id.into(),
            files,
            last_modified: Utc::now(),
        }
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            name: self.id.clone(),
            files_count: self.files.len(),
            last_modified: self.last_modified,
        }
    }
}

/// Listing entry for a stored project. `name` mirrors `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub files_count: usize,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResult {
    pub project_id: String,
    pub files_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mirrors_id_as_name() {
        let mut files = ProjectFiles::new();
        files.insert("index.html".to_string(), "<html></html>".to_string());
        files.insert("app.js".to_string(), String::new());

        let record = ProjectRecord::new("p1", files);
        let summary = record.summary();

        assert_eq!(summary.id, "p1");
        assert_eq!(summary.name, "p1");
        assert_eq!(summary.files_count, 2);
        assert_eq!(summary.last_modified, record.last_modified);
    }

    #[test]
    fn test_files_keep_document_order() {
        let files: ProjectFiles =
            serde_json::from_str(r#"{"z.txt": "1", "a.txt": "2", "m.txt": "3"}"#).unwrap();
        let keys: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z.txt", "a.txt", "m.txt"]);
    }
}
