//! A structured report of what the pipeline sees in a README

use crate::blocks::{AlertKind, Badge};
use crate::classify::ContentKind;
use crate::dom;
use crate::pipeline::{ImportRoute, Pipeline};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub kind: ContentKind,
    pub import_route: ImportRoute,
    pub round_trip_stable: bool,
    pub badges: Vec<Badge>,
    pub alerts: Vec<AlertKind>,
    pub code_languages: Vec<String>,
    pub collapsibles: usize,
    pub tables: usize,
    pub rules: Vec<&'static str>,
}

impl Pipeline {
    /// Import `input` and report the README blocks found in the resulting HTML.
    pub fn inspect(&self, input: &str) -> Inspection {
        let kind = self.classify(input);
        let import_route = self.import_route(input);
        let html = self.import(input);
        let markdown = self.serialize(&html);

        let mut inspection = Inspection {
            kind,
            import_route,
            round_trip_stable: self.is_round_trip_stable(&markdown),
            badges: Vec::new(),
            alerts: Vec::new(),
            code_languages: Vec::new(),
            collapsibles: 0,
            tables: 0,
            rules: self.serializer().rules().names(),
        };

        dom::parse_fragment(&html).walk(&mut |el| match el.tag.as_str() {
            "img" => {
                if let Some(badge) = el.attr("src").and_then(|src| Badge::from_url(src).ok()) {
                    inspection.badges.push(badge);
                }
            }
            "blockquote" => {
                let kind = el
                    .attr("data-type")
                    .and_then(|t| t.parse::<AlertKind>().ok())
                    .or_else(|| AlertKind::detect(&el.text_content()));
                if let Some(kind) = kind {
                    inspection.alerts.push(kind);
                }
            }
            "pre" => {
                if let Some(language) = el.attr("data-language") {
                    inspection.code_languages.push(language.to_string());
                }
            }
            "details" => inspection.collapsibles += 1,
            "table" => inspection.tables += 1,
            _ => {}
        });

        inspection
    }
}
