//! Board-defined custom fields and their typed values.
//!
//! The host stores custom field values loosely in the task metadata bag.
//! Locally each value is carried as a [`CustomField`] so the control kind is
//! explicit: checkboxes hold booleans, numeric inputs hold numbers and date
//! inputs hold normalized `yyyy-mm-dd` strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::{TaskMetadata, dates::editable_date_from_value};

/// Metadata keys owned by the task itself. Custom fields may not use them.
pub const RESERVED_METADATA_KEYS: [&str; 7] = [
    "created",
    "updated",
    "started",
    "due",
    "completed",
    "assigned",
    "tags",
];

/// Value kind declared by a custom field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldKind {
    /// Free text.
    String,
    /// Numeric input.
    Number,
    /// Checkbox.
    Boolean,
    /// Date input.
    Date,
}

impl CustomFieldKind {
    /// Returns the host representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

/// A custom field declared on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldDefinition {
    /// Field name, also the metadata key holding its value.
    pub name: String,
    /// Declared value kind.
    #[serde(rename = "type")]
    pub kind: CustomFieldKind,
    /// Nominal default declared on the board. Never used to fill unset values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Other definition keys, passed back to the host untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomFieldDefinition {
    /// Creates a definition without a default.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: CustomFieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            extra: Map::new(),
        }
    }

    /// Returns `true` when the name collides with a built-in metadata key.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        is_reserved_key(&self.name)
    }
}

fn is_reserved_key(name: &str) -> bool {
    RESERVED_METADATA_KEYS.contains(&name)
}

/// A typed custom field value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CustomFieldValue {
    /// The task has no value for the field.
    #[default]
    Unset,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Checkbox value.
    Boolean(bool),
    /// Normalized `yyyy-mm-dd` date, empty when the control was cleared.
    Date(String),
}

impl CustomFieldValue {
    /// Coerces a raw control or metadata value to `kind`.
    ///
    /// `null` is always [`CustomFieldValue::Unset`]. Values that cannot be
    /// read as the requested kind also become `Unset`.
    #[must_use]
    pub fn coerce(kind: CustomFieldKind, raw: &Value) -> Self {
        if raw.is_null() {
            return Self::Unset;
        }

        match kind {
            CustomFieldKind::String => match raw {
                Value::String(text) => Self::Text(text.clone()),
                Value::Number(number) => Self::Text(number.to_string()),
                Value::Bool(flag) => Self::Text(flag.to_string()),
                _ => Self::Unset,
            },
            CustomFieldKind::Number => coerce_number(raw).map_or(Self::Unset, Self::Number),
            CustomFieldKind::Boolean => coerce_boolean(raw).map_or(Self::Unset, Self::Boolean),
            CustomFieldKind::Date => Self::Date(editable_date_from_value(raw)),
        }
    }

    /// Returns `true` when no value is set.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Converts the value to its host JSON representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Unset => Value::Null,
            Self::Text(text) | Self::Date(text) => Value::String(text.clone()),
            Self::Number(number) => Number::from_f64(*number).map_or(Value::Null, Value::Number),
            Self::Boolean(flag) => Value::Bool(*flag),
        }
    }
}

fn coerce_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn coerce_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim() {
            "true" | "on" | "1" => Some(true),
            "false" | "off" | "0" | "" => Some(false),
            _ => None,
        },
        Value::Number(number) => number.as_i64().map(|n| n != 0),
        _ => None,
    }
}

/// A custom field value bound to its definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    /// Field name.
    pub name: String,
    /// Declared kind.
    pub kind: CustomFieldKind,
    /// Current value.
    pub value: CustomFieldValue,
}

impl CustomField {
    /// Creates an unset field for `definition`.
    #[must_use]
    pub fn unset(definition: &CustomFieldDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            kind: definition.kind,
            value: CustomFieldValue::Unset,
        }
    }

    /// Replaces the value with `raw` coerced to the field kind.
    pub fn set_raw(&mut self, raw: &Value) {
        self.value = CustomFieldValue::coerce(self.kind, raw);
    }
}

/// Builds the working custom field list for a task.
///
/// A field present in `metadata` takes its value from there, coerced to the
/// declared kind. Missing fields, and every field when no task is loaded,
/// start as [`CustomFieldValue::Unset`] rather than the board default.
#[must_use]
pub fn initial_custom_fields(
    definitions: &[CustomFieldDefinition],
    metadata: Option<&TaskMetadata>,
) -> Vec<CustomField> {
    definitions
        .iter()
        .map(|definition| {
            let mut field = CustomField::unset(definition);
            if let Some(raw) = metadata.and_then(|bag| bag.value_of(&definition.name)) {
                field.set_raw(&raw);
            }
            field
        })
        .collect()
}

/// Writes custom field values into an outbound metadata map.
///
/// Unset fields are written as `null` so the host can tell them apart from
/// fields it does not know about. Fields named after a built-in metadata key
/// are skipped.
pub fn write_custom_fields(fields: &[CustomField], target: &mut Map<String, Value>) {
    for field in fields.iter().filter(|field| !is_reserved_key(&field.name)) {
        target.insert(field.name.clone(), field.value.to_json());
    }
}
