//! Allow-list sanitization: structure preservation and idempotence.

use proptest::prelude::*;
use readme_babel::{sanitize, SanitizePolicy};

#[test]
fn test_alert_blockquote_structure_preserved() {
    let html = r#"<blockquote class="github-alert github-alert-note" data-type="note"><p>[!NOTE]<br>Read</p></blockquote>"#;
    assert_eq!(sanitize(html, &SanitizePolicy::rendered()), html);
}

#[test]
fn test_details_open_preserved() {
    let html = r#"<details open=""><summary>More</summary><p>x</p></details>"#;
    assert_eq!(sanitize(html, &SanitizePolicy::rendered()), html);
}

#[test]
fn test_table_alignment_preserved() {
    let html = r#"<table><thead><tr><th align="center">A</th></tr></thead><tbody><tr><td align="center">1</td></tr></tbody></table>"#;
    assert_eq!(sanitize(html, &SanitizePolicy::rendered()), html);
}

#[test]
fn test_table_sections_are_kept() {
    for policy in [SanitizePolicy::paste(), SanitizePolicy::rendered()] {
        let footer = "<table><tfoot><tr><td>x</td></tr></tfoot></table>";
        assert_eq!(sanitize(footer, &policy), footer);

        let captioned = "<table><caption>Totals</caption><colgroup><col></colgroup><tbody><tr><td>1</td></tr></tbody></table>";
        assert_eq!(sanitize(captioned, &policy), captioned);
    }
}

#[test]
fn test_caption_text_stays_inside_table() {
    let once = sanitize(
        "<table><caption>x</caption></table>",
        &SanitizePolicy::paste(),
    );
    assert_eq!(once, "<table><caption>x</caption></table>");
    assert_eq!(sanitize(&once, &SanitizePolicy::paste()), once);
}

#[test]
fn test_unknown_tags_unwrapped() {
    let out = sanitize("<p><marquee>hi</marquee></p>", &SanitizePolicy::paste());
    assert_eq!(out, "<p>hi</p>");
}

#[test]
fn test_iframe_and_object_removed() {
    let out = sanitize(
        r#"<iframe src="https://e.x"></iframe><object data="x"></object><p>ok</p>"#,
        &SanitizePolicy::rendered(),
    );
    assert!(!out.contains("iframe"));
    assert!(!out.contains("object"));
    assert!(out.contains("<p>ok</p>"));
}

#[test]
fn test_mixed_case_javascript_uri() {
    let out = sanitize(
        r#"<a href="JaVaScRiPt:alert(1)">x</a>"#,
        &SanitizePolicy::paste(),
    );
    assert!(!out.to_lowercase().contains("javascript"));
}

const FRAGMENTS: &[&str] = &[
    "text",
    " ",
    "&amp;",
    "<p>",
    "</p>",
    "<b>",
    "</b>",
    "<em>x</em>",
    "<script>alert(1)</script>",
    "<style>p{}</style>",
    r#"<a href="javascript:alert(1)">js</a>"#,
    r#"<a href="https://example.com" onclick="x()">link</a>"#,
    r#"<img src="a.png" onerror="x()" alt="a">"#,
    r#"<div style="color: red; background: url(x)">styled</div>"#,
    "<details open><summary>s</summary>body</details>",
    r#"<pre data-language="rust"><code class="language-rust">fn x() {}</code></pre>"#,
    r#"<input type="checkbox" checked disabled>"#,
    "<!-- comment -->",
    "<table><tfoot><tr><td>foot</td></tr></tfoot></table>",
    "<table><caption>cap</caption><thead><tr><th>h</th></tr></thead><tbody><tr><td>1</td></tr></tbody></table>",
    "<table><colgroup><col></colgroup><tr><td>x</td></tr></table>",
    r#"<table><tr><th align="center" style="text-align: center">a</th></tr></table>"#,
    "<ul><li>one<ul><li><input type=\"checkbox\" checked> two</li></ul></li></ul>",
];

fn html_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..10).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_sanitize_is_idempotent(html in html_strategy()) {
        for policy in [SanitizePolicy::paste(), SanitizePolicy::rendered()] {
            let once = sanitize(&html, &policy);
            prop_assert_eq!(sanitize(&once, &policy), once.clone());
        }
    }

    #[test]
    fn prop_sanitize_never_emits_script(html in html_strategy()) {
        let out = sanitize(&html, &SanitizePolicy::rendered()).to_lowercase();
        prop_assert!(!out.contains("<script"));
        prop_assert!(!out.contains("onclick"));
        prop_assert!(!out.contains("onerror"));
        prop_assert!(!out.contains("javascript:"));
        prop_assert!(!out.contains("url("));
    }
}
