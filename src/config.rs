//! Dialog configuration - validation and defaulting
//!
//! A dialog is described either by a raw JSON record (the shape a caller
//! would load from a file or receive over an API) or by the typed
//! [`DialogOptions`] builder. Both paths end in a [`DialogConfig`], which is
//! fully defaulted and immutable.

use crate::error::{invalid, DialogResult};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Dialog variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Affirmative and cancel actions
    Confirm,
    /// A single acknowledgement action
    Alert,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Confirm => "confirm",
            Mode::Alert => "alert",
        }
    }

    /// Text of the confirm control when none is configured
    pub fn default_confirm_text(&self) -> &'static str {
        match self {
            Mode::Confirm => "ok",
            Mode::Alert => "close",
        }
    }

    fn parse(value: &str) -> Option<Mode> {
        match value {
            "confirm" => Some(Mode::Confirm),
            "alert" => Some(Mode::Alert),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const DEFAULT_CANCEL_TEXT: &str = "cancel";

/// Optional fields shared by the raw record and the typed builder.
///
/// `title` distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`), which clears the title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Overrides {
    #[serde(default, deserialize_with = "present")]
    title: Option<Option<String>>,
    #[serde(default)]
    confirm_text: Option<String>,
    #[serde(default)]
    cancel_text: Option<String>,
    #[serde(default)]
    esc_closes: Option<bool>,
    #[serde(default)]
    enter_confirms: Option<bool>,
    #[serde(default)]
    animated: Option<bool>,
    #[serde(flatten)]
    short: ShortNames,
}

/// Short option names. When a record carries both spellings the short
/// one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShortNames {
    #[serde(default)]
    ok_text: Option<String>,
    #[serde(default)]
    esc: Option<bool>,
    #[serde(default)]
    enter: Option<bool>,
    #[serde(default)]
    transition: Option<bool>,
}

/// Wrap any value that is present, `null` included
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Typed builder for a dialog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOptions {
    mode: Mode,
    content: String,
    overrides: Overrides,
}

impl DialogOptions {
    pub fn new(mode: Mode, content: impl Into<String>) -> Self {
        Self {
            mode,
            content: content.into(),
            overrides: Overrides::default(),
        }
    }

    pub fn alert(content: impl Into<String>) -> Self {
        Self::new(Mode::Alert, content)
    }

    pub fn confirm(content: impl Into<String>) -> Self {
        Self::new(Mode::Confirm, content)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.overrides.title = Some(Some(title.into()));
        self
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.overrides.confirm_text = Some(text.into());
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.overrides.cancel_text = Some(text.into());
        self
    }

    pub fn esc_closes(mut self, enabled: bool) -> Self {
        self.overrides.esc_closes = Some(enabled);
        self
    }

    pub fn enter_confirms(mut self, enabled: bool) -> Self {
        self.overrides.enter_confirms = Some(enabled);
        self
    }

    pub fn animated(mut self, enabled: bool) -> Self {
        self.overrides.animated = Some(enabled);
        self
    }
}

/// A validated, fully defaulted dialog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    mode: Mode,
    content: String,
    title: String,
    confirm_text: String,
    cancel_text: String,
    esc_closes: bool,
    enter_confirms: bool,
    animated: bool,
}

impl DialogConfig {
    /// Validate a raw configuration record.
    ///
    /// Fails when the value is not a JSON object, when `mode` is not
    /// `"confirm"` or `"alert"`, when `content` is not a non-empty string,
    /// or when an optional field has the wrong type.
    pub fn from_value(value: &Value) -> DialogResult<Self> {
        let record = value
            .as_object()
            .ok_or_else(|| invalid("options must be an object"))?;

        let mode = record
            .get("mode")
            .and_then(Value::as_str)
            .and_then(Mode::parse)
            .ok_or_else(|| invalid("mode must be 'confirm' or 'alert'"))?;

        let content = match record.get("content") {
            Some(Value::String(content)) if !content.is_empty() => content.clone(),
            _ => return Err(invalid("content must be a non-empty string")),
        };

        let overrides = Overrides::deserialize(value)
            .map_err(|e| invalid(format!("malformed option: {}", e)))?;

        Ok(Self::with_defaults(mode, content, overrides))
    }

    /// Validate options built with [`DialogOptions`]
    pub fn from_options(options: DialogOptions) -> DialogResult<Self> {
        if options.content.is_empty() {
            return Err(invalid("content must be a non-empty string"));
        }
        Ok(Self::with_defaults(
            options.mode,
            options.content,
            options.overrides,
        ))
    }

    fn with_defaults(mode: Mode, content: String, overrides: Overrides) -> Self {
        let Overrides {
            title,
            confirm_text,
            cancel_text,
            esc_closes,
            enter_confirms,
            animated,
            short,
        } = overrides;

        Self {
            mode,
            content,
            title: match title {
                None => mode.label().to_string(),
                Some(title) => title.unwrap_or_default(),
            },
            confirm_text: short
                .ok_text
                .or(confirm_text)
                .unwrap_or_else(|| mode.default_confirm_text().to_string()),
            cancel_text: cancel_text.unwrap_or_else(|| DEFAULT_CANCEL_TEXT.to_string()),
            esc_closes: short.esc.or(esc_closes).unwrap_or(false),
            enter_confirms: short.enter.or(enter_confirms).unwrap_or(false),
            animated: short.transition.or(animated).unwrap_or(false),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Title text; an empty title means no title region is built
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn confirm_text(&self) -> &str {
        &self.confirm_text
    }

    /// Cancel control text. Only used in confirm mode.
    pub fn cancel_text(&self) -> &str {
        &self.cancel_text
    }

    pub fn esc_closes(&self) -> bool {
        self.esc_closes
    }

    pub fn enter_confirms(&self) -> bool {
        self.enter_confirms
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Whether the dialog needs a document-level keyboard listener
    pub fn wants_keyboard(&self) -> bool {
        self.esc_closes || self.enter_confirms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DialogError;
    use serde_json::json;

    fn assert_invalid(value: Value) {
        match DialogConfig::from_value(&value) {
            Err(DialogError::InvalidConfiguration(_)) => {}
            other => panic!("expected InvalidConfiguration for {}, got {:?}", value, other),
        }
    }

    #[test]
    fn test_alert_defaults() {
        let config = DialogConfig::from_value(&json!({ "mode": "alert", "content": "x" })).unwrap();
        assert_eq!(config.mode(), Mode::Alert);
        assert_eq!(config.title(), "alert");
        assert_eq!(config.confirm_text(), "close");
        assert_eq!(config.cancel_text(), "cancel");
        assert!(!config.esc_closes());
        assert!(!config.enter_confirms());
        assert!(!config.animated());
    }

    #[test]
    fn test_confirm_defaults() {
        let config = DialogConfig::from_options(DialogOptions::confirm("x")).unwrap();
        assert_eq!(config.title(), "confirm");
        assert_eq!(config.confirm_text(), "ok");
        assert_eq!(config.cancel_text(), "cancel");
        assert!(!config.wants_keyboard());
    }

    #[test]
    fn test_rejects_non_records() {
        assert_invalid(json!(null));
        assert_invalid(json!("confirm"));
        assert_invalid(json!(["confirm", "x"]));
        assert_invalid(json!(42));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert_invalid(json!({ "mode": "prompt", "content": "x" }));
        assert_invalid(json!({ "mode": "Confirm", "content": "x" }));
        assert_invalid(json!({ "content": "x" }));
    }

    #[test]
    fn test_rejects_bad_content() {
        assert_invalid(json!({ "mode": "alert" }));
        assert_invalid(json!({ "mode": "alert", "content": "" }));
        assert_invalid(json!({ "mode": "alert", "content": 7 }));
        assert!(DialogConfig::from_options(DialogOptions::alert("")).is_err());
    }

    #[test]
    fn test_rejects_mistyped_optional_field() {
        assert_invalid(json!({ "mode": "alert", "content": "x", "escCloses": "yes" }));
        assert_invalid(json!({ "mode": "alert", "content": "x", "title": 3 }));
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = DialogConfig::from_value(&json!({
            "mode": "confirm",
            "content": "Delete file?",
            "title": "Careful",
            "confirmText": "delete",
            "cancelText": "keep",
            "escCloses": true,
            "animated": true,
        }))
        .unwrap();

        assert_eq!(config.title(), "Careful");
        assert_eq!(config.confirm_text(), "delete");
        assert_eq!(config.cancel_text(), "keep");
        assert!(config.esc_closes());
        assert!(!config.enter_confirms());
        assert!(config.animated());
        assert!(config.wants_keyboard());
    }

    #[test]
    fn test_short_field_names_are_aliases() {
        let config = DialogConfig::from_value(&json!({
            "mode": "alert",
            "content": "x",
            "okText": "got it",
            "esc": true,
            "enter": true,
            "transition": true,
        }))
        .unwrap();

        assert_eq!(config.confirm_text(), "got it");
        assert!(config.esc_closes());
        assert!(config.enter_confirms());
        assert!(config.animated());
    }

    #[test]
    fn test_short_and_long_names_together() {
        let config = DialogConfig::from_value(&json!({
            "mode": "alert",
            "content": "x",
            "okText": "short",
            "confirmText": "long",
            "esc": false,
            "escCloses": true,
            "enterConfirms": true,
            "transition": true,
            "animated": false,
        }))
        .unwrap();

        assert_eq!(config.confirm_text(), "short");
        assert!(!config.esc_closes());
        assert!(config.enter_confirms());
        assert!(config.animated());
    }

    #[test]
    fn test_null_title_clears_title() {
        let config =
            DialogConfig::from_value(&json!({ "mode": "confirm", "content": "x", "title": null }))
                .unwrap();
        assert_eq!(config.title(), "");

        let config = DialogConfig::from_value(&json!({ "mode": "confirm", "content": "x" })).unwrap();
        assert_eq!(config.title(), "confirm");
    }

    #[test]
    fn test_empty_title_is_kept() {
        let config = DialogConfig::from_options(DialogOptions::alert("x").title("")).unwrap();
        assert_eq!(config.title(), "");
    }
}
