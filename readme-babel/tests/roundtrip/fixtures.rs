use readme_babel::{render_markdown, serialize_to_markdown, Pipeline};

fn round_trip(markdown: &str) -> String {
    serialize_to_markdown(&render_markdown(markdown))
}

fn assert_identity(markdown: &str) {
    assert_eq!(round_trip(markdown), markdown);
    assert!(Pipeline::default().is_round_trip_stable(markdown));
}

#[test]
fn test_task_list_is_exact() {
    assert_identity("- [x] done");
    assert_identity("- [x] done\n- [ ] todo");
}

#[test]
fn test_fenced_code_keeps_language_and_quotes() {
    assert_identity("```javascript\nconsole.log(1);\n```");
    assert_identity("```js\nconst s = \"quoted\" + 'single';\n```");
}

#[test]
fn test_headings_and_emphasis() {
    assert_identity("# Title\n\n## Section\n\nSome **bold**, *italic* and ~~struck~~ text.");
}

#[test]
fn test_links_and_images() {
    assert_identity("See [the docs](https://docs.rs) for more.\n\n![Logo](logo.png \"The logo\")");
}

#[test]
fn test_nested_lists() {
    assert_identity("- one\n  - nested\n- two");
    assert_identity("1. first\n2. second");
}

#[test]
fn test_nested_mixed_task_lists() {
    assert_identity("- parent\n  - [x] child\n  - [ ] other");
    assert_identity("- [ ] parent\n  - plain child");
}

#[test]
fn test_code_showing_center_markup_is_untouched() {
    assert_identity("```html\n<div align=\"center\">\n```");
    assert_identity("Use `<div align=\"center\">` to center.");
}

#[test]
fn test_blockquote() {
    assert_identity("> quoted **text**");
}

#[test]
fn test_alert() {
    assert_identity("> [!WARNING]\n> Breaking change");
}

#[test]
fn test_table() {
    assert_identity("| A | B |\n| --- | :---: |\n| 1 | 2 |");
}

#[test]
fn test_badges() {
    assert_identity(
        "![build](https://img.shields.io/badge/build-passing-green?style=flat) ![license](https://img.shields.io/badge/license-MIT-blue)",
    );
}

#[test]
fn test_centered_block() {
    assert_identity("<div align=\"center\">\n\n# Project\n\n</div>");
}

#[test]
fn test_hard_break() {
    assert_identity("line one  \nline two");
}

#[test]
fn test_first_cycle_normalizes() {
    assert_eq!(round_trip("* a\n* b"), "- a\n- b");
    assert_eq!(round_trip("Title\n====="), "# Title");
    let pipeline = Pipeline::default();
    assert!(pipeline.is_round_trip_stable("* a\n\n* b"));
}
