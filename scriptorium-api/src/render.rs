//! Markdown rendering and post excerpts.

use pulldown_cmark::{Event, Options, Parser, html};
use scriptorium_common::model::post::Post;

pub const EXCERPT_CHARS: usize = 150;

/// Renders post content to HTML. Raw HTML in the source is escaped.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        event => event,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}

/// The summary, or the start of the content when there is none.
#[must_use]
pub fn excerpt(post: &Post) -> String {
    match post.summary.as_deref().filter(|summary| !summary.is_empty()) {
        Some(summary) => summary.to_owned(),
        None => {
            let mut excerpt: String = post.content.chars().take(EXCERPT_CHARS).collect();
            excerpt.push_str("...");
            excerpt
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::render::{EXCERPT_CHARS, excerpt, markdown_to_html};
    use scriptorium_common::model::{Id, post::Post, user::UserId};
    use time::macros::datetime;

    fn post(content: &str, summary: Option<&str>) -> Post {
        Post {
            id: Id::new(1),
            title: "Title".to_owned(),
            content: content.to_owned(),
            summary: summary.map(str::to_owned),
            author_id: UserId::new_unchecked("user_1"),
            created_at: datetime!(2025-06-01 00:00 UTC),
            author: None,
        }
    }

    #[test]
    fn renders_markdown() {
        let html = markdown_to_html("### Automatic Batching\n\nIt is **fast**.\n\n- one\n- two");

        assert!(html.contains("<h3>Automatic Batching</h3>"));
        assert!(html.contains("<strong>fast</strong>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn renders_code_blocks() {
        let html = markdown_to_html("```javascript\nsetCount(c => c + 1);\n```");

        assert!(html.contains("<code class=\"language-javascript\">"));
        assert!(html.contains("c =&gt; c + 1"));
    }

    #[test]
    fn escapes_raw_html() {
        let html = markdown_to_html("<script>alert(1)</script>\n\nHi <b>there</b>");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn excerpt_prefers_summary() {
        assert_eq!(excerpt(&post("Long content", Some("Short."))), "Short.");
    }

    #[test]
    fn excerpt_truncates_content() {
        let content = "é".repeat(EXCERPT_CHARS + 20);
        let truncated = excerpt(&post(&content, None));

        assert_eq!(truncated.chars().count(), EXCERPT_CHARS + 3);
        assert!(truncated.ends_with("é..."));

        assert_eq!(excerpt(&post("Short", Some(""))), "Short...");
    }
}
