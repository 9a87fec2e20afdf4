use readme_babel::{render, render_markdown, RenderOptions, Renderer};

const BADGES: &str = "![build](https://img.shields.io/badge/build-passing-green?style=flat) ![license](https://img.shields.io/badge/license-MIT-blue)";

#[test]
fn test_badge_line_is_wrapped_and_survives_sanitize() {
    let html = render(BADGES).unwrap();
    assert!(html.contains(r#"class="badge-container""#));
    assert!(html.contains("white-space: nowrap"));
    assert!(html.contains("https://img.shields.io/badge/build-passing-green?style=flat"));
    assert!(!html.contains("<span"));
}

#[test]
fn test_badge_inside_list_item() {
    let html = render(&format!("- {BADGES}")).unwrap();
    assert!(html.contains("<li"));
    assert!(html.contains("badge-container"));
}

#[test]
fn test_alert_is_tagged() {
    let html = render("> [!NOTE]\n> Read this").unwrap();
    assert!(html.contains("github-alert-note"));
    assert!(html.contains(r#"data-type="note""#));
}

#[test]
fn test_plain_blockquote_is_not_an_alert() {
    let html = render("> Just a quote").unwrap();
    assert!(!html.contains("github-alert"));
}

#[test]
fn test_centered_div() {
    let html = render("<div align=\"center\">\n\n# Project\n\n</div>").unwrap();
    assert!(html.contains(r#"<div style="text-align: center; margin: 1em 0">"#));
    assert!(html.contains("<h1>Project</h1>"));
}

#[test]
fn test_code_block_language_and_style() {
    let html = render("```rust\nfn main() {}\n```").unwrap();
    assert!(html.contains(r#"data-language="rust""#));
    assert!(html.contains("background-color: #161b22"));
    assert!(html.contains(r#"class="language-rust""#));
}

#[test]
fn test_task_list_checkboxes() {
    let html = render("- [x] done\n- [ ] todo").unwrap();
    assert!(html.contains(r#"type="checkbox""#));
    assert!(html.contains("checked"));
}

#[test]
fn test_tables_render() {
    let html = render("| A | B |\n| --- | --- |\n| 1 | 2 |").unwrap();
    assert!(html.contains("<table>"));
    assert!(html.contains("<th>A</th>"));
    assert!(html.contains("<td>2</td>"));
}

#[test]
fn test_autolinks() {
    let html = render("see https://example.com").unwrap();
    assert!(html.contains(r#"<a href="https://example.com""#));
}

#[test]
fn test_collapsible_survives() {
    let html = render("<details open><summary>More</summary>\n\nHidden **text**\n\n</details>").unwrap();
    assert!(html.contains("<details open"));
    assert!(html.contains("<summary>More</summary>"));
    assert!(html.contains("<strong>text</strong>"));
}

#[test]
fn test_injection_is_removed() {
    let md = "<a href=\"javascript:alert(1)\">x</a>\n\n<img src=x onerror=alert(1)>\n\n<style>p{}</style>";
    let html = render(md).unwrap();
    assert!(!html.contains("javascript:"));
    assert!(!html.contains("onerror"));
    assert!(!html.contains("<style"));
}

#[test]
fn test_render_markdown_never_fails() {
    assert_eq!(render_markdown(""), "");
    assert!(render_markdown("plain").contains("<p>plain</p>"));
}

#[test]
fn test_custom_badge_markers() {
    let renderer = Renderer::new(RenderOptions {
        badge_markers: vec!["badgen.net".to_string()],
        ..Default::default()
    });
    let html = renderer
        .render("![a](https://badgen.net/a) ![b](https://badgen.net/b)")
        .unwrap();
    assert!(html.contains("badge-container"));
    let html = renderer.render(BADGES).unwrap();
    assert!(!html.contains("badge-container"));
}

#[test]
fn test_deeply_nested_quotes_render() {
    let html = render_markdown(&format!("{} deep", ">".repeat(5_000)));
    assert!(html.contains("deep"));
    assert!(html.starts_with("<blockquote>"));
}
