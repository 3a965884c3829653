//! Folding accepted suggestions into a document body.

use crate::Suggestion;

/// Strategy that produces a new canonical body from an accepted suggestion.
pub trait ChangeMergeEngine: Send + Sync {
    /// Returns the merged body. Inputs are never mutated.
    fn merge(&self, body: &str, suggestion: &Suggestion) -> String;
}

/// Replaces the whole body with the suggestion rendered as block markup.
///
/// Blank-line separated segments become `<p>` blocks and single line breaks
/// become `<br>`. Applying the same suggestion twice is not idempotent with
/// respect to the original plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeDocumentMerge;

impl ChangeMergeEngine for WholeDocumentMerge {
    fn merge(&self, _body: &str, suggestion: &Suggestion) -> String {
        render_block_markup(suggestion.suggested_text.as_str())
    }
}

/// Converts `\n\n`-delimited plain text into paragraph block markup.
#[must_use]
pub fn render_block_markup(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");

    normalized
        .split("\n\n")
        .map(|segment| segment.trim_matches('\n'))
        .filter(|segment| !segment.trim().is_empty())
        .map(|paragraph| {
            let lines: Vec<String> = paragraph.split('\n').map(escape_html).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        })
        .collect()
}

/// Counts `<p>` blocks in rendered markup.
#[must_use]
pub fn paragraph_count(markup: &str) -> usize {
    markup.matches("<p>").count()
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{ChangeMergeEngine, WholeDocumentMerge, paragraph_count, render_block_markup};
    use crate::Suggestion;

    fn suggestion(text: &str) -> Suggestion {
        Suggestion {
            original_text: String::new(),
            suggested_text: text.to_owned(),
            operation_type: "rewrite".to_owned(),
            operation_description: "restructure".to_owned(),
        }
    }

    #[test]
    fn merge_replaces_whole_body() {
        let merged = WholeDocumentMerge.merge("<p>old</p>", &suggestion("new"));
        assert_eq!(merged, "<p>new</p>");
    }

    #[test]
    fn paragraphs_and_line_breaks_become_block_markup() {
        let merged = render_block_markup("Line one\nline two\n\nSecond paragraph");
        assert_eq!(
            merged,
            "<p>Line one<br>line two</p><p>Second paragraph</p>"
        );
    }

    #[test]
    fn paragraph_count_matches_non_empty_segments() {
        let text = "Intro\n\n\n\nBody\r\n\r\nOutro\n\n   \n\n";
        let expected = text
            .replace("\r\n", "\n")
            .split("\n\n")
            .filter(|segment| !segment.trim().is_empty())
            .count();

        let merged = WholeDocumentMerge.merge("", &suggestion(text));
        assert_eq!(paragraph_count(&merged), expected);
        assert_eq!(expected, 3);
    }

    #[test]
    fn markup_characters_are_escaped() {
        let merged = render_block_markup("a < b && c > d");
        assert_eq!(merged, "<p>a &lt; b &amp;&amp; c &gt; d</p>");
    }

    #[test]
    fn input_body_is_left_untouched() {
        let body = String::from("<p>original</p>");
        let _ = WholeDocumentMerge.merge(&body, &suggestion("replacement"));
        assert_eq!(body, "<p>original</p>");
    }
}
