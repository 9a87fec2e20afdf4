//! Shared configuration loader for the readme-babel toolchain.
//!
//! `defaults/readme.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ReadmeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use readme_babel::{
    CodeBlockStyle, ImportOptions, PasteOptions, Pipeline, PipelineOptions, RenderOptions,
    SerializeOptions,
};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/readme.default.toml");

const BULLET_MARKERS: &[char] = &['-', '*', '+'];
const FENCE_CHARS: &[char] = &['`', '~'];

/// Top-level configuration consumed by readme-babel applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeConfig {
    pub render: RenderConfig,
    pub serialize: SerializeConfig,
    pub paste: PasteConfig,
    pub import: ImportConfig,
}

impl ReadmeConfig {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            render: (&self.render).into(),
            serialize: (&self.serialize).into(),
            paste: (&self.paste).into(),
            import: (&self.import).into(),
        }
    }

    /// Build a pipeline from this configuration.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.pipeline_options())
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !BULLET_MARKERS.contains(&self.serialize.bullet_marker) {
            return Err(ConfigError::Message(format!(
                "serialize.bullet_marker must be one of -, * or +, got {:?}",
                self.serialize.bullet_marker
            )));
        }
        if !FENCE_CHARS.contains(&self.serialize.fence) {
            return Err(ConfigError::Message(format!(
                "serialize.fence must be ` or ~, got {:?}",
                self.serialize.fence
            )));
        }
        Ok(self)
    }
}

/// Markdown → HTML rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub hard_breaks: bool,
    pub external_links_new_tab: bool,
    pub badge_markers: Vec<String>,
    pub code_block: CodeBlockConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeBlockConfig {
    pub background: String,
    pub padding: String,
    pub border_radius: String,
}

impl From<&CodeBlockConfig> for CodeBlockStyle {
    fn from(config: &CodeBlockConfig) -> Self {
        CodeBlockStyle {
            background: config.background.clone(),
            padding: config.padding.clone(),
            border_radius: config.border_radius.clone(),
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            hard_breaks: config.hard_breaks,
            external_links_new_tab: config.external_links_new_tab,
            badge_markers: config.badge_markers.clone(),
            code_block: (&config.code_block).into(),
        }
    }
}

/// HTML → Markdown output style.
#[derive(Debug, Clone, Deserialize)]
pub struct SerializeConfig {
    pub bullet_marker: char,
    pub fence: char,
    pub escape_text: bool,
}

impl From<&SerializeConfig> for SerializeOptions {
    fn from(config: &SerializeConfig) -> Self {
        SerializeOptions {
            bullet_marker: config.bullet_marker,
            fence_char: config.fence,
            escape_text: config.escape_text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasteConfig {
    pub prefer_plain_text: bool,
}

impl From<&PasteConfig> for PasteOptions {
    fn from(config: &PasteConfig) -> Self {
        PasteOptions {
            prefer_plain_text: config.prefer_plain_text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub detect_markdown_in_html: bool,
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        ImportOptions {
            detect_markdown_in_html: config.detect_markdown_in_html,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate the resulting configuration.
    pub fn build(self) -> Result<ReadmeConfig, ConfigError> {
        self.builder
            .build()?
            .try_deserialize::<ReadmeConfig>()?
            .validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ReadmeConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.render.hard_breaks);
        assert_eq!(config.render.badge_markers.len(), 3);
        assert_eq!(config.serialize.bullet_marker, '-');
        assert!(config.paste.prefer_plain_text);
        assert!(config.import.detect_markdown_in_html);
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.pipeline_options(), PipelineOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("serialize.bullet_marker", "*")
            .expect("override to apply")
            .set_override("render.external_links_new_tab", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = config.pipeline_options();
        assert_eq!(options.serialize.bullet_marker, '*');
        assert!(!options.render.external_links_new_tab);
    }

    #[test]
    fn rejects_unknown_bullet_marker() {
        let err = Loader::new()
            .set_override("serialize.bullet_marker", "x")
            .expect("override to apply")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("bullet_marker"));
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[render.code_block]\nbackground = \"#ffffff\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.render.code_block.background, "#ffffff");
        assert_eq!(config.render.code_block.padding, "16px");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/readme.toml")
            .build()
            .expect("config to build");
        assert!(config.render.hard_breaks);
    }

    #[test]
    fn pipeline_uses_config() {
        let config = Loader::new()
            .set_override("serialize.bullet_marker", "+")
            .expect("override to apply")
            .build()
            .expect("config to build");
        let pipeline = config.pipeline();
        assert_eq!(pipeline.serialize("<ul><li>a</li></ul>"), "+ a");
    }
}
