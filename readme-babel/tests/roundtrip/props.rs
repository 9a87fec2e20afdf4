use proptest::prelude::*;
use readme_babel::Pipeline;

const BLOCKS: &[&str] = &[
    "# Title",
    "## Usage",
    "Plain paragraph text.",
    "Some **bold** and *italic* and ~~gone~~.",
    "A [link](https://example.com) inline.",
    "![alt](image.png)",
    "- [x] done\n- [ ] todo",
    "- one\n- two",
    "1. first\n2. second",
    "> a quote",
    "> [!NOTE]\n> Heads up",
    "```rust\nfn main() {}\n```",
    "| A | B |\n| --- | --- |\n| 1 | 2 |",
    "---",
    "![a](https://img.shields.io/badge/a-b-blue) ![c](https://img.shields.io/badge/c-d-red)",
    "Costs 5 * 3 [sic]",
    "- parent\n  - [x] child\n  - [ ] other",
    "- [ ] parent\n  - plain child",
    "1. first\n   - nested\n2. second",
    "| Name | Value |\n| :--- | ---: |\n| a | 1 |\n| b | 2 |",
    "```html\n<div align=\"center\">\n  <img src=\"logo.png\">\n</div>\n```",
    "Wrap it in `<p align=\"center\">` to center.",
];

fn readme_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(BLOCKS), 1..7).prop_map(|blocks| blocks.join("\n\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_is_stable(markdown in readme_strategy()) {
        let pipeline = Pipeline::default();
        let once = pipeline.normalize(&markdown);
        let twice = pipeline.normalize(&once);
        prop_assert_eq!(twice, once);
    }
}
