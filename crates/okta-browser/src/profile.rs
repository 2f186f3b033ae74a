use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

/// Profile attribute that identifies a user.
pub const LOGIN_FIELD: &str = "login";

/// The identifying field of a profile, decided once when the record is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Login {
    Known(String),
    /// A profile exists but carries no usable login.
    Unknown,
    /// The record had no profile at all.
    Unavailable,
}

impl Login {
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Self::Known(login) => Some(login),
            Self::Unknown | Self::Unavailable => None,
        }
    }

    /// Text shown in place of the login in a listing.
    pub fn list_label(&self) -> &str {
        match self {
            Self::Known(login) => login,
            Self::Unknown => "unknown",
            Self::Unavailable => "profile not available",
        }
    }
}

/// A single profile attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Unavailable,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Strings are taken as-is, scalars are rendered, and nested values are
    /// kept as compact JSON. `null` becomes [`FieldValue::Unavailable`].
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Unavailable,
            Value::String(s) => Self::Text(s.clone()),
            Value::Bool(b) => Self::Text(b.to_string()),
            Value::Number(n) => Self::Text(n.to_string()),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// The full field set of one directory entry, ordered by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub login: Login,
    pub fields: BTreeMap<String, FieldValue>,
}

impl ProfileRecord {
    /// A record for a user whose profile object was missing.
    pub fn unavailable() -> Self {
        Self {
            login: Login::Unavailable,
            fields: BTreeMap::new(),
        }
    }

    /// Build a record from `(name, value)` pairs. The login is taken from the
    /// `login` field when it holds text.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        let fields: BTreeMap<String, FieldValue> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let login = match fields.get(LOGIN_FIELD) {
            Some(FieldValue::Text(login)) => Login::Known(login.clone()),
            _ => Login::Unknown,
        };
        Self { login, fields }
    }

    /// Parse a JSON profile object. `None` yields an unavailable record.
    pub fn from_json(profile: Option<&Map<String, Value>>) -> Self {
        let Some(profile) = profile else {
            return Self::unavailable();
        };
        // Only a JSON string counts as a login; a rendered number does not.
        let login = match profile.get(LOGIN_FIELD).and_then(Value::as_str) {
            Some(login) => Login::Known(login.to_owned()),
            None => Login::Unknown,
        };
        let fields = profile
            .iter()
            .map(|(name, value)| (name.clone(), FieldValue::from_json(value)))
            .collect();
        Self { login, fields }
    }

    pub fn is_available(&self) -> bool {
        self.login != Login::Unavailable
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}
