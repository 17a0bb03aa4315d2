//! Markdown to HTML conversion for note bodies.

use pulldown_cmark::{Event, Options, Parser, Tag, html};

/// Schemes a link or image may point at. Relative URLs are always allowed.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

fn is_safe_destination(dest: &str) -> bool {
    let dest = dest.trim();
    let Some(colon) = dest.find(':') else {
        return true;
    };
    let scheme = &dest[..colon];
    // A colon after a path, query or fragment start is not a scheme separator
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    ALLOWED_SCHEMES
        .iter()
        .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

fn has_unsafe_destination(tag: &Tag<'_>) -> bool {
    match tag {
        Tag::Link(_, dest, _) | Tag::Image(_, dest, _) => !is_safe_destination(dest),
        _ => false,
    }
}

/// Converts note text to HTML.
///
/// Enables tables, strikethrough and task lists. Raw HTML in the input is
/// emitted as escaped text, so user content cannot inject markup. Links and
/// images with a scheme other than http, https or mailto are reduced to
/// their text.
///
/// # Example
///
/// ```
/// use notes::infra::markdown_to_html;
///
/// let html = markdown_to_html("# Hello\n\n<script>x</script>");
/// assert!(html.contains("<h1>Hello</h1>"));
/// assert!(!html.contains("<script>"));
/// ```
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(raw) => Some(Event::Text(raw)),
        Event::Start(tag) | Event::End(tag) if has_unsafe_destination(&tag) => None,
        other => Some(other),
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
