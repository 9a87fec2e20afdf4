//! Mermaid diagrams

use crate::serializer::escape::fence_for;

/// Diagram source, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagram {
    pub code: String,
}

impl Diagram {
    pub const LANGUAGE: &'static str = "mermaid";

    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn to_markdown(&self) -> String {
        let code = self.code.trim_end();
        let fence = fence_for(code, '`');
        format!("{fence}{}\n{code}\n{fence}", Self::LANGUAGE)
    }
}
