use readme_babel::{route_paste, Clipboard, Pipeline, PipelineOptions, PasteOptions};

#[test]
fn test_plain_text_rendered_as_markdown() {
    let html = route_paste(&Clipboard::text("## Install\n\n```sh\ncargo install x\n```"));
    assert!(html.contains("<h2>Install</h2>"));
    assert!(html.contains(r#"data-language="sh""#));
}

#[test]
fn test_text_preferred_when_both_present() {
    let clipboard = Clipboard::text("- [ ] todo").with_html("<ul><li>todo</li></ul>");
    let html = route_paste(&clipboard);
    assert!(html.contains(r#"type="checkbox""#));
}

#[test]
fn test_html_fallback_uses_paste_policy() {
    let clipboard = Clipboard::html(
        r#"<p style="color: red" data-x="1">Hi <a href="https://e.x" onclick="x()">there</a></p>"#,
    );
    let html = route_paste(&clipboard);
    assert_eq!(html, r#"<p data-x="1">Hi <a href="https://e.x">there</a></p>"#);
}

#[test]
fn test_whitespace_text_falls_back_to_html() {
    let clipboard = Clipboard::text("  \n").with_html("<p><b>bold</b></p>");
    assert_eq!(route_paste(&clipboard), "<p><b>bold</b></p>");
}

#[test]
fn test_empty_clipboard_inserts_nothing() {
    assert_eq!(route_paste(&Clipboard::default()), "");
}

#[test]
fn test_pipeline_prefers_html_when_configured() {
    let pipeline = Pipeline::new(PipelineOptions {
        paste: PasteOptions {
            prefer_plain_text: false,
        },
        ..Default::default()
    });
    let clipboard = Clipboard::text("**x**").with_html("<p><em>y</em></p>");
    assert_eq!(pipeline.route_paste(&clipboard), "<p><em>y</em></p>");
}

#[test]
fn test_clipboard_from_json() {
    let clipboard: Clipboard =
        serde_json::from_str(r##"{"text": "# Hi", "html": null}"##).unwrap();
    assert!(route_paste(&clipboard).contains("<h1>Hi</h1>"));
}
