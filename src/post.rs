use fmt::Display;
use std::fmt::Formatter;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::frontmatter::split_front_matter;
use crate::markdown_render::MarkdownRenderer;
use crate::text_utils::{format_display_date, parse_date, slugify};

/// A rendered blog post, ready for template composition and the feed.
pub struct Post {
    pub file_name: PathBuf,
    pub title: String,
    pub date: NaiveDateTime,
    pub formatted_date: String,
    pub content: String,
    pub slug: String,
    pub description: String,
    pub author: String,
    pub author_image: String,
    pub author_url: String,
    pub app_banner: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, author={}\ntitle={}\ncontent:\n{}",
               self.slug,
               self.date,
               self.author,
               self.title,
               self.content
        )
    }
}

/// Example of draft:
/// ---
/// title: "Hello World"
/// date: 2024-01-01
/// description: A first post
/// author: Daniel
/// ---
///
/// # Hello World
///
/// Some text
impl Post {
    pub fn from_file(file_name: &Path, renderer: &MarkdownRenderer) -> io::Result<Post> {
        let raw = fs::read_to_string(file_name)?;
        let fallback_date = mtime_date(file_name)?;

        Self::from_string(file_name, &raw, fallback_date, renderer)
    }

    /// `fallback_date` stands in when the metadata has no date; from a file
    /// that is its modification time.
    pub fn from_string(
        file_name: &Path,
        raw: &str,
        fallback_date: NaiveDateTime,
        renderer: &MarkdownRenderer,
    ) -> io::Result<Post> {
        let (meta, body) = split_front_matter(file_name, raw)?;

        let date = match meta.get("date") {
            Some(date_str) => match parse_date(date_str) {
                Ok(d) => d,
                Err(e) => {
                    return Err(io::Error::new(
                        ErrorKind::InvalidData,
                        format!("{} - file={}", e, file_name.display()),
                    ));
                }
            },
            None => fallback_date,
        };

        // Missing title is not an error: it propagates as an empty string
        let title = meta.get_or_empty("title");

        let slug = match meta.get("url-slug") {
            Some(slug) => slug.to_string(),
            None => slugify(&title),
        };

        let app_banner = match meta.get("app_id") {
            Some(app_id) => format!(r#"<meta name="apple-itunes-app" content="app-id={}">"#, app_id),
            None => String::new(),
        };

        let content = renderer.render(&body)?;

        Ok(Post {
            file_name: file_name.to_path_buf(),
            title,
            formatted_date: format_display_date(&date),
            date,
            content,
            slug,
            description: meta.get_or_empty("description"),
            author: meta.get_or_empty("author"),
            author_image: meta.get_or_empty("author_image"),
            author_url: meta.get_or_empty("author_url"),
            app_banner,
        })
    }

    pub fn output_file(&self) -> String {
        format!("{}.html", self.slug)
    }
}

fn mtime_date(path: &Path) -> io::Result<NaiveDateTime> {
    let modified = fs::metadata(path)?.modified()?;
    let modified: DateTime<Utc> = modified.into();
    Ok(modified.naive_utc())
}
