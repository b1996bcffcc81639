use std::path::PathBuf;
use std::{fs, io};

/// Enumerates the markdown drafts to publish.
pub struct DraftList {
    pub drafts_dir: PathBuf,
}

impl DraftList {
    pub fn retrieve(&self) -> io::Result<Vec<PathBuf>> {
        let mut drafts = vec![];
        let entries = fs::read_dir(self.drafts_dir.as_path())?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(file_name) = file_name.to_str() {
                // Check if the file has a .md extension
                if file_name.ends_with(".md") {
                    drafts.push(entry.path());
                }
            }
        }

        // Directory order is filesystem dependent
        drafts.sort();

        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_retrieve_only_markdown_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b-second.md"), "b").unwrap();
        fs::write(dir.path().join("a-first.md"), "a").unwrap();
        fs::write(dir.path().join("notes.txt"), "n").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let drafts = DraftList { drafts_dir: dir.path().to_path_buf() }.retrieve().unwrap();
        assert_eq!(drafts, vec![
            dir.path().join("a-first.md"),
            dir.path().join("b-second.md"),
        ]);
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let drafts = DraftList { drafts_dir: PathBuf::from("no-such-dir") }.retrieve();
        assert!(drafts.is_err());
    }
}
