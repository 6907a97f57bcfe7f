use std::io::{Cursor, Write};

use indexmap::IndexMap;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::ExportError;

/// Project name used for the archive when the caller does not give one.
pub const DEFAULT_PROJECT_NAME: &str = "my-project";

/// Any path containing one of these fragments is left out of the archive.
///
/// This is a plain substring match, so `my.gitignore-notes.txt` is dropped
/// along with `.git/HEAD` and `node_modules/lib/a.js`.
pub const EXCLUDED_PATH_FRAGMENTS: &[&str] = &["node_modules", ".git"];

/// A finished archive and the file name it should be downloaded as.
#[derive(Debug, Clone)]
pub struct ExportedArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn is_excluded(path: &str) -> bool {
    EXCLUDED_PATH_FRAGMENTS
        .iter()
        .any(|fragment| path.contains(fragment))
}

pub fn archive_file_name(project_name: &str) -> String {
    format!("{}.zip", project_name)
}

/// Build a deflate-compressed zip from `files`, one entry per path, in map
/// order.
pub fn export(
    project_name: &str,
    files: &IndexMap<String, String>,
) -> Result<ExportedArchive, ExportError> {
    if files.is_empty() {
        return Err(ExportError::EmptyInput);
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut skipped = 0usize;

    for (path, content) in files {
        if is_excluded(path) {
            skipped += 1;
            continue;
        }
        writer.start_file(path.as_str(), options)?;
        writer.write_all(content.as_bytes())?;
    }

    let bytes = writer.finish()?.into_inner();

    tracing::debug!(
        project_name,
        entries = files.len() - skipped,
        skipped,
        size = bytes.len(),
        "archive built"
    );

    Ok(ExportedArchive {
        file_name: archive_file_name(project_name),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn files(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(path, content)| (path.to_string(), content.to_string()))
            .collect()
    }

    fn entries(bytes: &[u8]) -> Vec<(String, String)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut entry = archive.by_index(i).unwrap();
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                (entry.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = export("demo", &IndexMap::new()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyInput));
        assert_eq!(err.to_string(), "No files to export");
    }

    #[test]
    fn test_dependency_and_vcs_paths_are_dropped() {
        let archive = export(
            "demo",
            &files(&[
                ("src/index.js", "x"),
                ("node_modules/lib/a.js", "y"),
                (".gitignore", "z"),
            ]),
        )
        .unwrap();

        assert_eq!(archive.file_name, "demo.zip");
        assert_eq!(
            entries(&archive.bytes),
            vec![("src/index.js".to_string(), "x".to_string())]
        );
    }

    #[test]
    fn test_exclusion_is_substring_based() {
        assert!(is_excluded("my.gitignore-notes.txt"));
        assert!(is_excluded("docs/.github/workflow.yml"));
        assert!(is_excluded("vendor/node_modules_backup/readme.md"));
        assert!(!is_excluded("src/git/mod.rs"));
        assert!(!is_excluded("node/modules.js"));
    }

    #[test]
    fn test_entries_follow_input_order_and_keep_content() {
        let archive = export(
            "site",
            &files(&[
                ("index.html", "<html>\n  <body>héllo</body>\n</html>\n"),
                ("css/style.css", "body { margin: 0 }"),
                ("app.js", ""),
            ]),
        )
        .unwrap();

        assert_eq!(
            entries(&archive.bytes),
            vec![
                (
                    "index.html".to_string(),
                    "<html>\n  <body>héllo</body>\n</html>\n".to_string()
                ),
                ("css/style.css".to_string(), "body { margin: 0 }".to_string()),
                ("app.js".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_entries_are_deflated() {
        let content = "a".repeat(4096);
        let archive = export("big", &files(&[("a.txt", content.as_str())])).unwrap();
        let mut zip = ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        let entry = zip.by_index(0).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        assert!(entry.compressed_size() < entry.size());
    }

    #[test]
    fn test_all_entries_excluded_still_yields_valid_archive() {
        let archive = export("deps", &files(&[("node_modules/x.js", "1")])).unwrap();
        assert!(entries(&archive.bytes).is_empty());
    }
}
