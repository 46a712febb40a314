//! Markdown to HTML. A pure text transform; nothing here touches state.

use pulldown_cmark::{html, Options, Parser};

/// Render markdown source to an HTML fragment. Fenced code blocks keep their
/// language as a `language-*` class for client-side highlighting.
pub fn markdown_to_html(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph() {
        assert_eq!(markdown_to_html("B"), "<p>B</p>\n");
    }

    #[test]
    fn fenced_code_keeps_language_class() {
        let html = markdown_to_html("```python\nprint('hi')\n```\n");
        assert!(html.contains(r#"<pre><code class="language-python">"#));
        assert!(html.contains("print('hi')"));
    }

    #[test]
    fn raw_angle_brackets_in_code_are_escaped() {
        let html = markdown_to_html("`a < b`");
        assert!(html.contains("<code>a &lt; b</code>"));
    }

    #[test]
    fn tables_are_enabled() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
