//! Nested creation payloads and their bracketed wire form.
//!
//! The API expects Rails-style form parameters rather than JSON bodies:
//! a nested mapping becomes `key[sub]`, a sequence becomes repeated `key[]`
//! entries, and scalars or uploads are leaves. Flattening is depth-first and
//! keeps the caller's ordering.
//!
//! ```rust
//! use soundcloud_api::rest::{flatten, Field};
//!
//! let params = flatten(
//!     "track",
//!     [
//!         ("title", Field::from("Demo")),
//!         ("tag_list", Field::list(["ambient", "drone"])),
//!         ("shared_to", Field::map([("emails", Field::list([Field::map([("address", "a@x.com")])]))])),
//!     ],
//! );
//!
//! let pairs: Vec<_> = params.text_pairs().collect();
//! assert_eq!(
//!     pairs,
//!     vec![
//!         ("track[title]", "Demo"),
//!         ("track[tag_list][]", "ambient"),
//!         ("track[tag_list][]", "drone"),
//!         ("track[shared_to][emails][][address]", "a@x.com"),
//!     ]
//! );
//! ```

use serde_json::Value;

use crate::clients::{ParamValue, Params, Upload};

/// A value in a creation payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    /// A scalar, already stringified.
    Text(String),
    /// A file upload.
    Upload(Upload),
    /// A nested mapping, flattened as `key[sub]`.
    Map(Vec<(String, Field)>),
    /// A sequence, flattened as repeated `key[]`.
    List(Vec<Field>),
}

impl Field {
    /// Builds a nested mapping.
    #[must_use]
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a sequence.
    #[must_use]
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Converts a JSON value; `null` has no wire form and yields `None`.
    ///
    /// Numbers and booleans are stringified, objects and arrays nest.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Number(n) => Some(Self::Text(n.to_string())),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(items.iter().filter_map(Self::from_json).collect())),
            Value::Object(map) => Some(Self::Map(
                map.iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|f| (k.clone(), f)))
                    .collect(),
            )),
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for Field {
    fn from(value: u64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Field {
    fn from(value: i64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Upload> for Field {
    fn from(value: Upload) -> Self {
        Self::Upload(value)
    }
}

/// Flattens `fields` under `prefix`, producing `prefix[key]...` parameters.
#[must_use]
pub fn flatten<I, K, V>(prefix: &str, fields: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<Field>,
{
    let mut params = Params::new();
    for (key, value) in fields {
        unfold(&mut params, format!("{prefix}[{}]", key.as_ref()), value.into());
    }
    params
}

fn unfold(params: &mut Params, key: String, field: Field) {
    match field {
        Field::Text(text) => params.push(key, ParamValue::Text(text)),
        Field::Upload(upload) => params.push(key, ParamValue::Upload(upload)),
        Field::Map(entries) => {
            for (sub_key, sub_value) in entries {
                unfold(params, format!("{key}[{sub_key}]"), sub_value);
            }
        }
        Field::List(items) => {
            let list_key = format!("{key}[]");
            for item in items {
                unfold(params, list_key.clone(), item);
            }
        }
    }
}
