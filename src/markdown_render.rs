use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use markdown::Options;
use regex::{Captures, Regex};

/// Immutable rendering configuration, built once from the site URL and
/// passed wherever a draft body is rendered. Links pointing outside the
/// site's own domain open in a new tab.
pub struct MarkdownRenderer {
    site_domain: String,
}

impl MarkdownRenderer {
    pub fn new(site_url: &str) -> MarkdownRenderer {
        let site_domain = site_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string();

        MarkdownRenderer { site_domain }
    }

    pub fn render(&self, body: &str) -> io::Result<String> {
        let body = strip_leading_title(body);
        let body = repair_link_annotations(&body);
        let body = strip_link_annotations(&body);

        let html = match markdown::to_html_with_options(body.as_str(), &Options::gfm()) {
            Ok(x) => x,
            Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
        };

        Ok(self.open_external_links(&html))
    }

    fn is_external(&self, href: &str) -> bool {
        (href.starts_with("http://") || href.starts_with("https://"))
            && !href.contains(&self.site_domain)
    }

    fn open_external_links(&self, html: &str) -> String {
        lazy_static! {
            static ref LINK_REGEX: Regex = Regex::new(r#"<a href="([^"]*)""#).unwrap();
        }

        let result = LINK_REGEX.replace_all(html, |caps: &Captures| {
            let href = caps.get(1).unwrap().as_str();
            if self.is_external(href) {
                format!(r#"<a href="{}" target="_blank" rel="noopener noreferrer""#, href)
            } else {
                caps.get(0).unwrap().as_str().to_string()
            }
        });

        result.to_string()
    }
}

/// The first top-level heading duplicates the frontmatter title, which the
/// page template renders on its own, so the heading line is dropped.
fn strip_leading_title(body: &str) -> String {
    lazy_static! {
        static ref TITLE_REGEX: Regex = Regex::new(r"(?m)^#[ \t].*$").unwrap();
    }

    TITLE_REGEX.replace(body, "").trim().to_string()
}

/// Repairs an authoring mistake where a {:target="_blank"} annotation was
/// typed right after the closing parenthesis of a link instead of inside
/// it. Single pattern only, this is not a general sanitizer.
fn repair_link_annotations(body: &str) -> String {
    lazy_static! {
        static ref MISPLACED_REGEX: Regex =
            Regex::new(r#"\[(.*?)\]\((.*?)\)\{:target="_blank"\}"#).unwrap();
    }

    MISPLACED_REGEX
        .replace_all(body, r#"[${1}](${2}{:target="_blank"})"#)
        .to_string()
}

/// The annotation must not leak into rendered hrefs. External links get
/// their target attribute from the domain check, so the marker is dropped
/// from link targets before the markdown pass.
fn strip_link_annotations(body: &str) -> String {
    lazy_static! {
        static ref INLINE_REGEX: Regex = Regex::new(r#"\{:target="_blank"\}\)"#).unwrap();
    }

    INLINE_REGEX.replace_all(body, ")").to_string()
}
