//! The validated property system.
//!
//! Widgets are declared as JSON property documents. The property layer
//! owns the closed key set, the per-key payload coercion, and the split
//! between dynamic keys (writable at runtime, each mapped to the
//! re-layout step it triggers) and construction-only keys (the
//! interaction mode flags, which a live widget never re-reads).
//!
//! Coercion is lenient: malformed payloads degrade to a usable value
//! and never panic, since documents arrive from hand-edited sessions and
//! remote clients alike.

use serde_json::Map;
use thiserror::Error;

use crate::layout::{MenuLayout, SizeSpec};
use crate::value::{js_truthy, parse_float_prefix, Value, ValueSpec, WeightSpec};

/// A property document failed to parse.
#[derive(Debug, Error)]
pub enum PropError {
    /// The document is not valid JSON.
    #[error("invalid property document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but is not a JSON object.
    #[error("property document must be a JSON object")]
    NotAnObject,
}

/// The closed set of menu property keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropKey {
    /// Widget sizing basis: one edge or a `[width, height]` pair.
    Size,
    /// Layout kind name.
    Layout,
    /// Grid column count; empty means half the entry count.
    Columns,
    /// Toggle interaction mode flag.
    Toggle,
    /// Double-tap-to-open flag.
    DoubleTap,
    /// The selectable values: list, mapping, or lone scalar.
    Values,
    /// Per-entry weights.
    Weights,
}

impl PropKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Size,
        Self::Layout,
        Self::Columns,
        Self::Toggle,
        Self::DoubleTap,
        Self::Values,
        Self::Weights,
    ];

    /// The document-level key name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Layout => "layout",
            Self::Columns => "columns",
            Self::Toggle => "toggle",
            Self::DoubleTap => "doubleTap",
            Self::Values => "values",
            Self::Weights => "weights",
        }
    }

    /// Look a key up by its document name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// True for keys a live widget re-reads on write.
    ///
    /// The mode flags are construction-only: a write is stored but only
    /// affects widgets built afterwards.
    pub const fn is_dynamic(self) -> bool {
        !matches!(self, Self::Toggle | Self::DoubleTap)
    }
}

/// A menu's coerced property values.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuProps {
    /// Sizing basis.
    pub size: SizeSpec,
    /// Layout kind.
    pub layout: MenuLayout,
    /// Explicit grid column count; `None` means half the entry count.
    pub columns: Option<u32>,
    /// Toggle interaction mode.
    pub toggle: bool,
    /// Require a double tap to open.
    pub double_tap: bool,
    /// Selectable values.
    pub values: ValueSpec,
    /// Entry weights.
    pub weights: WeightSpec,
}

impl Default for MenuProps {
    fn default() -> Self {
        Self {
            size: SizeSpec::default(),
            layout: MenuLayout::Circular,
            columns: None,
            toggle: false,
            double_tap: false,
            values: ValueSpec::List(vec![Value::from(1), Value::from(2), Value::from(3)]),
            weights: WeightSpec::none(),
        }
    }
}

impl MenuProps {
    /// Build props from a property document's key/value map.
    ///
    /// Missing keys keep their defaults; unknown keys are ignored.
    pub fn from_json(document: &Map<String, Value>) -> Self {
        let mut props = Self::default();
        for (name, raw) in document {
            if let Some(key) = PropKey::from_name(name) {
                props.set(key, raw);
            }
        }
        props
    }

    /// Build props from a property document's JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, PropError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(document) => Ok(Self::from_json(&document)),
            _ => Err(PropError::NotAnObject),
        }
    }

    /// Coerce and store one property payload.
    ///
    /// Storage only; the widget layer decides which re-layout step the
    /// write triggers.
    pub fn set(&mut self, key: PropKey, raw: &Value) {
        match key {
            PropKey::Size => self.size = SizeSpec::coerce(raw),
            PropKey::Layout => self.layout = MenuLayout::parse(raw),
            PropKey::Columns => self.columns = coerce_columns(raw),
            PropKey::Toggle => self.toggle = js_truthy(raw),
            PropKey::DoubleTap => self.double_tap = js_truthy(raw),
            PropKey::Values => self.values = ValueSpec::coerce(raw),
            PropKey::Weights => self.weights = WeightSpec::coerce(raw),
        }
    }

    /// Read one property back in document form.
    pub fn get(&self, key: PropKey) -> Value {
        match key {
            PropKey::Size => self.size.to_value(),
            PropKey::Layout => Value::String(self.layout.name().to_string()),
            PropKey::Columns => self
                .columns
                .map_or_else(|| Value::String(String::new()), Value::from),
            PropKey::Toggle => Value::Bool(self.toggle),
            PropKey::DoubleTap => Value::Bool(self.double_tap),
            PropKey::Values => match &self.values {
                ValueSpec::List(items) => Value::Array(items.clone()),
                ValueSpec::Map(pairs) => {
                    let mut map = Map::new();
                    for (k, v) in pairs {
                        map.insert(k.clone(), v.clone());
                    }
                    Value::Object(map)
                }
            },
            PropKey::Weights => self.weights.as_slice().map_or_else(
                || Value::String(String::new()),
                |list| Value::Array(list.iter().map(|w| Value::from(*w)).collect()),
            ),
        }
    }
}

/// Columns accepts numbers and numeric strings; empty means automatic.
fn coerce_columns(raw: &Value) -> Option<u32> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.is_empty() => parse_float_prefix(s),
        _ => return None,
    };
    if parsed.is_finite() && parsed >= 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(parsed.trunc() as u32)
    } else {
        None
    }
}
