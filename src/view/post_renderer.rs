use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;

/// Typed view of a post as the page template sees it. Scalar fields are
/// interpolated with mustache escaping; `content` and `app_banner` are
/// already HTML and belong in triple-brace placeholders. Placeholders the
/// template adds beyond these fields render as empty.
#[derive(ramhorns::Content)]
struct PostPage<'a> {
    title: &'a str,
    formatted_date: &'a str,
    content: &'a str,
    slug: &'a str,
    description: &'a str,
    author: &'a str,
    author_image: &'a str,
    author_url: &'a str,
    app_banner: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(page_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(page_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing page template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, post: &Post) -> String {
        let rendered_page = self.template.render(&PostPage {
            title: post.title.as_str(),
            formatted_date: post.formatted_date.as_str(),
            content: post.content.as_str(),
            slug: post.slug.as_str(),
            description: post.description.as_str(),
            author: post.author.as_str(),
            author_image: post.author_image.as_str(),
            author_url: post.author_url.as_str(),
            app_banner: post.app_banner.as_str(),
        });

        rendered_page
    }
}
