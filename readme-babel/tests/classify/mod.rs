use readme_babel::{classify, ContentKind};

#[test]
fn test_markdown_is_markdown() {
    assert_eq!(classify("# Title\n\nSome *text*"), ContentKind::Markdown);
}

#[test]
fn test_html_is_html() {
    assert_eq!(classify("<p>Hello</p>"), ContentKind::Html);
    assert_eq!(classify("text then <DIV>late</DIV>"), ContentKind::Html);
}

#[test]
fn test_empty_defaults_to_markdown() {
    assert_eq!(classify(""), ContentKind::Markdown);
    assert_eq!(classify("   \n"), ContentKind::Markdown);
}

#[test]
fn test_comparisons_are_not_tags() {
    assert_eq!(classify("if a < b and c > d"), ContentKind::Markdown);
    assert_eq!(classify("1 <2>"), ContentKind::Markdown);
}

// Markdown prose showing a tag in a code span reads as HTML. Known limitation.
#[test]
fn test_code_span_with_tag_reads_as_html() {
    assert_eq!(classify("Wrap it in a `<div>`"), ContentKind::Html);
}
