use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::post::Post;
use crate::text_utils::format_rfc822;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">

<channel>
  <title>Example Blog</title>
  <link>https://example.com</link>
  <description>Notes on building apps and the indie web</description>
  <language>en-us</language>
  <lastBuildDate>Sat, 3 Feb 2024 09:15:00 +0000</lastBuildDate>
  <atom:link href="https://example.com/feed.xml" rel="self" type="application/rss+xml"/>
  <item>
    <title>Hello World</title>
    <link>https://example.com/hello-world</link>
    <description>A first post</description>
    <pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate>
    <guid isPermaLink="true">https://example.com/hello-world</guid>
    <author>author@example.com (Daniel)</author>
  </item>
</channel>

</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
    pub author_email: &'a str,
}

impl<'a> RssChannel<'a> {
    /// Posts must arrive sorted by date descending; items are emitted in
    /// the order given.
    pub fn render(&self, posts: &[Post]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8" ?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        // <rss version="2.0" xmlns:atom="...">
        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"));
        writer.write_event(Event::Start(rss))?;

        // <channel>
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;
        push_text(&mut writer, "language", "en-us")?;

        // The newest post stamps the channel, keeping rebuilds reproducible
        if let Some(newest) = posts.iter().map(|p| p.date).max() {
            push_text(&mut writer, "lastBuildDate", &format_rfc822(&newest))?;
        }

        // <atom:link href="https://example.com/feed.xml" rel="self" .../>
        let self_link = format!("{}/feed.xml", self.ch_link.trim_end_matches('/'));
        let mut atom_link = BytesStart::new("atom:link");
        atom_link.push_attribute(("href", self_link.as_str()));
        atom_link.push_attribute(("rel", "self"));
        atom_link.push_attribute(("type", "application/rss+xml"));
        writer.write_event(Event::Empty(atom_link))?;

        for post in posts {
            // <item>
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            // <title>Hello World</title>
            push_text(&mut writer, "title", post.title.as_str())?;

            // <link>https://example.com/hello-world</link>
            let link = permalink(self.ch_link, post.slug.as_str());
            push_text(&mut writer, "link", link.as_str())?;

            // <description>A first post</description>
            push_text(&mut writer, "description", post.description.as_str())?;

            // <pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate>
            push_text(&mut writer, "pubDate", &format_rfc822(&post.date))?;

            // <guid isPermaLink="true">https://example.com/hello-world</guid>
            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(link.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            // <author>author@example.com (Daniel)</author>
            let author = format!("{} ({})", self.author_email, post.author);
            push_text(&mut writer, "author", author.as_str())?;

            // </item>
            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        // </channel>
        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        // </rss>
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn permalink(base_url: &str, slug: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), slug)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
