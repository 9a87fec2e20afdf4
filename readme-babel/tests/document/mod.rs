use readme_babel::{Document, Pipeline};

const README: &str = "# Tool

<div align=\"center\">

![build](https://img.shields.io/badge/build-passing-green) ![license](https://img.shields.io/badge/license-MIT-blue)

</div>

> [!TIP]
> Install with cargo

- [x] parse
- [ ] publish

```toml
[dependencies]
tool = \"1\"
```";

#[test]
fn test_document_edit_cycle() {
    let pipeline = Pipeline::default();
    let mut doc = Document::from_markdown(README, &pipeline);
    assert!(doc.rich().contains("badge-container"));
    assert!(doc.rich().contains("github-alert-tip"));

    let rich = doc.rich().to_string();
    doc.apply_edit(&rich, &pipeline);
    let settled = doc.markdown().to_string();
    assert!(settled.contains("> [!TIP]\n> Install with cargo"));
    assert!(settled.contains("- [x] parse\n- [ ] publish"));
    assert!(settled.contains("```toml\n[dependencies]\ntool = \"1\"\n```"));
    assert!(settled.contains("<div align=\"center\">"));
    assert!(!doc.apply_edit(&rich, &pipeline));
}

#[test]
fn test_edit_drops_injected_markup() {
    let pipeline = Pipeline::default();
    let mut doc = Document::from_markdown("hello", &pipeline);
    doc.apply_edit(r#"<p>hello <img src="x" onerror="bad()"></p>"#, &pipeline);
    assert!(!doc.rich().contains("onerror"));
    assert_eq!(doc.markdown(), "hello ![](x)");
}
