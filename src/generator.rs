use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use spdlog::{info, warn};

use crate::config::Config;
use crate::draft_list::DraftList;
use crate::markdown_render::MarkdownRenderer;
use crate::post::Post;
use crate::publisher::Publisher;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;

pub const FEED_FILE: &str = "feed.xml";
const DEFAULT_SCRATCH_DIR: &str = "blogs-generated";

/// A draft that could not be published and why.
pub struct DraftFailure {
    pub file_name: PathBuf,
    pub reason: String,
}

pub struct RunSummary {
    pub posts_published: usize,
    pub failures: Vec<DraftFailure>,
}

/// Runs the whole pipeline once: drafts in, site pages and feed out.
///
/// A draft that fails to parse or render is recorded in the summary and
/// the rest of the batch still publishes. A missing template, a missing
/// drafts directory or a publish error aborts the run.
pub fn run_generator(config: &Config) -> Result<RunSummary> {
    let template_src = fs::read_to_string(&config.paths.template_file)
        .with_context(|| format!("Error reading template {}", config.paths.template_file.display()))?;
    let page_renderer = PostRenderer::new(&template_src)?;
    let markdown_renderer = MarkdownRenderer::new(&config.site.url);

    let scratch_dir = match config.paths.scratch_dir {
        Some(ref dir) => dir.clone(),
        None => config.paths.site_dir.join(DEFAULT_SCRATCH_DIR),
    };
    let publisher = Publisher {
        scratch_dir,
        site_dir: config.paths.site_dir.clone(),
    };
    publisher.prepare()?;

    let draft_list = DraftList { drafts_dir: config.paths.drafts_dir.clone() };
    let drafts = draft_list.retrieve()
        .with_context(|| format!("Error listing drafts in {}", config.paths.drafts_dir.display()))?;

    let mut posts: Vec<Post> = vec![];
    let mut failures: Vec<DraftFailure> = vec![];
    let mut written_slugs: HashSet<String> = HashSet::new();

    for draft in drafts {
        let post = match Post::from_file(&draft, &markdown_renderer) {
            Ok(post) => post,
            Err(e) => {
                warn!("Skipping draft {}: {}", draft.display(), e);
                failures.push(DraftFailure { file_name: draft, reason: e.to_string() });
                continue;
            }
        };

        if !written_slugs.insert(post.slug.clone()) {
            let reason = format!("slug {:?} already written by another draft", post.slug);
            warn!("Skipping draft {}: {}", draft.display(), reason);
            failures.push(DraftFailure { file_name: draft, reason });
            continue;
        }

        let page = page_renderer.render(&post);
        publisher.write_page(&post.output_file(), page.as_bytes())?;
        info!("Rendered {} -> {}", draft.display(), post.output_file());
        posts.push(post);
    }

    // Newest first; equal dates keep draft enumeration order
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    let channel = RssChannel {
        ch_title: &config.feed.title,
        ch_link: &config.site.url,
        ch_desc: &config.feed.description,
        author_email: &config.feed.author_email,
    };
    let feed = channel.render(&posts).context("Error rendering feed")?;
    publisher.write_page(FEED_FILE, &feed)?;

    let published = publisher.publish().context("Error publishing generated files")?;
    info!("Generated {} blog posts and the feed, moved {} files to the site root", posts.len(), published);

    Ok(RunSummary {
        posts_published: posts.len(),
        failures,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::config::{Feed, Paths, Site};
    use crate::test_data::TEMPLATE_DATA;

    use super::*;

    fn write_site(root: &Path) -> Config {
        let drafts_dir = root.join("drafts");
        fs::create_dir(&drafts_dir).unwrap();
        let template_file = root.join("blog-template.html");
        fs::write(&template_file, TEMPLATE_DATA).unwrap();

        Config {
            paths: Paths {
                drafts_dir,
                template_file,
                site_dir: root.to_path_buf(),
                scratch_dir: None,
            },
            site: Site { url: "https://example.com".to_string() },
            feed: Feed {
                title: "Example Blog".to_string(),
                description: "Notes on building apps and the indie web".to_string(),
                author_email: "author@example.com".to_string(),
            },
            log: None,
        }
    }

    fn write_draft(config: &Config, name: &str, contents: &str) {
        fs::write(config.paths.drafts_dir.join(name), contents).unwrap();
    }

    const HELLO_DRAFT: &str = "---\ntitle: \"Hello World\"\ndate: 2024-01-01\ndescription: A first post\nauthor: Daniel\n---\n\n# Hello World\n\nSome text\n";
    const SECOND_DRAFT: &str = "---\ntitle: Second Post\ndate: 2024-02-03\ndescription: Another post\nauthor: Daniel\n---\n\n# Second Post\n\nMore text\n";

    #[test]
    fn test_full_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());
        write_draft(&config, "hello-world.md", HELLO_DRAFT);
        write_draft(&config, "second-post.md", SECOND_DRAFT);

        let summary = run_generator(&config).unwrap();
        assert_eq!(summary.posts_published, 2);
        assert!(summary.failures.is_empty());

        let hello = fs::read_to_string(dir.path().join("hello-world.html")).unwrap();
        assert!(hello.contains("<p>Some text</p>"));
        assert!(hello.contains("January 1, 2024"));
        assert!(!hello.contains("# Hello World"));

        assert!(dir.path().join("second-post.html").exists());
        assert!(!dir.path().join(DEFAULT_SCRATCH_DIR).exists());

        let feed = fs::read_to_string(dir.path().join(FEED_FILE)).unwrap();
        // Newest post first
        let first = feed.find("Second Post").unwrap();
        let second = feed.find("Hello World").unwrap();
        assert!(first < second);
        assert!(feed.contains("<pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate>"));
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());
        write_draft(&config, "hello-world.md", HELLO_DRAFT);
        write_draft(&config, "second-post.md", SECOND_DRAFT);

        run_generator(&config).unwrap();
        let page_before = fs::read(dir.path().join("hello-world.html")).unwrap();
        let feed_before = fs::read(dir.path().join(FEED_FILE)).unwrap();

        run_generator(&config).unwrap();
        assert_eq!(fs::read(dir.path().join("hello-world.html")).unwrap(), page_before);
        assert_eq!(fs::read(dir.path().join(FEED_FILE)).unwrap(), feed_before);
    }

    #[test]
    fn test_bad_draft_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());
        write_draft(&config, "bad.md", "---\ntitle: Bad\ndate: not a date\n---\n\nBody\n");
        write_draft(&config, "hello-world.md", HELLO_DRAFT);

        let summary = run_generator(&config).unwrap();
        assert_eq!(summary.posts_published, 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].file_name.ends_with("bad.md"));
        assert!(dir.path().join("hello-world.html").exists());
        assert!(dir.path().join(FEED_FILE).exists());
    }

    #[test]
    fn test_slug_collision_keeps_first_draft() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_site(dir.path());
        write_draft(&config, "a-hello.md", HELLO_DRAFT);
        let duplicate = HELLO_DRAFT.replace("Some text", "Other text");
        write_draft(&config, "b-hello.md", &duplicate);

        let summary = run_generator(&config).unwrap();
        assert_eq!(summary.posts_published, 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].file_name.ends_with("b-hello.md"));

        let hello = fs::read_to_string(dir.path().join("hello-world.html")).unwrap();
        assert!(hello.contains("Some text"));
        assert!(!hello.contains("Other text"));
    }

    #[test]
    fn test_missing_template_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_site(dir.path());
        config.paths.template_file = dir.path().join("no-such-template.html");

        assert!(run_generator(&config).is_err());
    }
}
