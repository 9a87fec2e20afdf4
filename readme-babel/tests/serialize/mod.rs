//! HTML → Markdown conversion through the default and custom rule sets.

use readme_babel::dom::Element;
use readme_babel::serializer::rules::{FnRule, NodeContext, RuleSet};
use readme_babel::{serialize_to_markdown, MarkdownSerializer, SerializeOptions};

#[test]
fn test_editor_document() {
    let html = concat!(
        "<h1>Project</h1>",
        "<p>A <strong>fast</strong> tool with <em>style</em>.</p>",
        "<ul><li>one</li><li>two</li></ul>",
        "<hr>",
        "<ol><li>first</li><li>second</li></ol>",
    );
    insta::assert_snapshot!(serialize_to_markdown(html), @r"
    # Project

    A **fast** tool with *style*.

    - one
    - two

    ---

    1. first
    2. second
    ");
}

#[test]
fn test_task_list() {
    let html = r#"<ul><li><input type="checkbox" checked> done</li><li><input type="checkbox"> todo</li></ul>"#;
    assert_eq!(serialize_to_markdown(html), "- [x] done\n- [ ] todo");
}

#[test]
fn test_code_keeps_quotes() {
    let html = r#"<pre><code class="language-javascript">console.log("hi");</code></pre>"#;
    assert_eq!(
        serialize_to_markdown(html),
        "```javascript\nconsole.log(\"hi\");\n```"
    );
}

#[test]
fn test_strikethrough_underline_and_breaks() {
    assert_eq!(serialize_to_markdown("<p><del>old</del></p>"), "~~old~~");
    assert_eq!(serialize_to_markdown("<p><s>old</s></p>"), "~~old~~");
    assert_eq!(serialize_to_markdown("<p><u>under</u></p>"), "<u>under</u>");
    assert_eq!(serialize_to_markdown("<p>a<br>b</p>"), "a  \nb");
}

#[test]
fn test_image_attributes_preserved() {
    assert_eq!(
        serialize_to_markdown(r#"<img src="https://img.shields.io/badge/a-b-c?style=flat" alt="a b">"#),
        "![a b](https://img.shields.io/badge/a-b-c?style=flat)"
    );
}

#[test]
fn test_text_is_escaped() {
    assert_eq!(serialize_to_markdown("<p>1 * 2 = 2</p>"), "1 \\* 2 = 2");
    assert_eq!(serialize_to_markdown("<p># not a heading</p>"), "\\# not a heading");
}

#[test]
fn test_escaping_disabled() {
    let serializer = MarkdownSerializer::with_options(SerializeOptions {
        escape_text: false,
        ..Default::default()
    });
    assert_eq!(serializer.serialize("<p>1 * 2</p>"), "1 * 2");
}

#[test]
fn test_custom_bullet_marker() {
    let serializer = MarkdownSerializer::with_options(SerializeOptions {
        bullet_marker: '*',
        ..Default::default()
    });
    assert_eq!(serializer.serialize("<ul><li>a</li></ul>"), "* a");
}

#[test]
fn test_custom_rule_takes_precedence() {
    let rules = RuleSet::builtin().with_rule_first(FnRule::new(
        "highlight",
        |ctx: &NodeContext<'_>| ctx.element.is("mark"),
        |content: &str, _: &NodeContext<'_>, _: &MarkdownSerializer| format!("=={content}=="),
    ));
    let serializer = MarkdownSerializer::new(rules, SerializeOptions::default());
    assert_eq!(serializer.serialize("<p><mark>hot</mark></p>"), "==hot==");
}

#[test]
fn test_serialize_element_reads_without_mutating() {
    let root: Element = readme_babel::dom::parse_fragment("<p>keep <b>me</b></p>");
    let before = root.clone();
    let out = MarkdownSerializer::default().serialize_element(&root);
    assert_eq!(out, "keep **me**");
    assert_eq!(root, before);
}

#[test]
fn test_deeply_nested_html_serializes() {
    let html = format!("{}<p>bottom</p>", "<div>".repeat(5_000));
    assert_eq!(serialize_to_markdown(&html), "bottom");
}
