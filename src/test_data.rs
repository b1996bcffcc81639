#[cfg(test)]
pub const DRAFT_DATA: &str = r#"---
title: "Hello World"
date: 2024-01-01
description: A first post
author: Daniel
---

# Hello World

Some text

Read the [release notes](https://othersite.org/notes) or the
[about page](https://example.com/about).
"#;

#[cfg(test)]
pub const DRAFT_DATA_FULL_META: &str = r#"---
title: "Full Metadata"
date: 2024-02-03 09:15:00
url-slug: custom-slug
description: Everything filled in
author: Daniel
author_image: https://cdn.example.com/me.jpg
author_url: https://example.com/about
app_id: 123456789
---

# Full Metadata

Body of the full metadata post
"#;

#[cfg(test)]
pub const TEMPLATE_DATA: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>{{title}}</title>
    <meta name="description" content="{{description}}">
    {{{app_banner}}}
  </head>
  <body>
    <h1>{{title}}</h1>
    <p class="byline"><a href="{{author_url}}">{{author}}</a> - {{formatted_date}}</p>
    <article>{{{content}}}</article>
  </body>
</html>
"#;
