use std::collections::HashMap;
use std::io;
use std::io::ErrorKind;
use std::path::Path;

/// Metadata block parsed from the top of a draft.
#[derive(Debug, Default, PartialEq)]
pub struct FrontMatter {
    fields: HashMap<String, String>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_str())
    }

    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or("").to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

const DELIMITER: &str = "---";

/// Splits a draft into its metadata block and body.
///
/// Example of draft:
/// ---
/// title: "Hello World"
/// date: 2024-01-01
/// author: Daniel
/// ---
///
/// # Hello World
///
/// Some text
pub fn split_front_matter(file_name: &Path, raw: &str) -> io::Result<(FrontMatter, String)> {
    let mut lines = raw.lines();
    let mut maybe_line = lines.next();

    // Leading empty lines are ok
    loop {
        match maybe_line {
            Some(line) if line.trim().is_empty() => maybe_line = lines.next(),
            _ => break,
        }
    }

    let Some(first) = maybe_line else {
        return Ok((FrontMatter::default(), String::new()));
    };

    if first.trim() != DELIMITER {
        // No metadata block, the whole file is body
        return Ok((FrontMatter::default(), collect_body(Some(first), lines)));
    }

    let mut fields = HashMap::new();
    loop {
        let Some(line) = lines.next() else {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Closing --- of the metadata block is missing - file={}", file_name.display()),
            ));
        };

        let line = line.trim();
        if line == DELIMITER {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Invalid metadata line {:?} - file={}", line, file_name.display()),
            ));
        };
        fields.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }

    let first_body_line = lines.next();
    Ok((FrontMatter { fields }, collect_body(first_body_line, lines)))
}

fn collect_body(first: Option<&str>, lines: std::str::Lines) -> String {
    let mut body = String::new();
    if let Some(line) = first {
        body.push_str(line);
        body.push('\n');
    }
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    body
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::test_data::DRAFT_DATA;

    use super::*;

    #[test]
    fn test_split_front_matter() {
        let file_name = PathBuf::from("drafts/hello-world.md");
        let (meta, body) = split_front_matter(&file_name, DRAFT_DATA).unwrap();

        assert_eq!(meta.get("title"), Some("Hello World"));
        assert_eq!(meta.get("date"), Some("2024-01-01"));
        assert_eq!(meta.get("description"), Some("A first post"));
        assert_eq!(meta.get("author"), Some("Daniel"));
        assert_eq!(meta.get("app_id"), None);
        assert!(body.contains("# Hello World\n"));
        assert!(body.contains("Some text"));
    }

    #[test]
    fn test_quoted_values() {
        let raw = "---\ntitle: \"Quoted: with a colon\"\nauthor: 'Single'\n---\nbody\n";
        let (meta, body) = split_front_matter(&PathBuf::from("a.md"), raw).unwrap();
        assert_eq!(meta.get("title"), Some("Quoted: with a colon"));
        assert_eq!(meta.get("author"), Some("Single"));
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_no_front_matter() {
        let raw = "Just a body\n\nwith two paragraphs\n";
        let (meta, body) = split_front_matter(&PathBuf::from("a.md"), raw).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "Just a body\n\nwith two paragraphs\n");
    }

    #[test]
    fn test_empty_file() {
        let (meta, body) = split_front_matter(&PathBuf::from("a.md"), "").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "");
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let raw = "---\ntitle: Oops\n";
        let res = split_front_matter(&PathBuf::from("a.md"), raw);
        assert!(res.is_err());
    }

    #[test]
    fn test_invalid_metadata_line() {
        let raw = "---\ntitle Oops\n---\nbody\n";
        let res = split_front_matter(&PathBuf::from("a.md"), raw);
        assert!(res.is_err());
    }
}
