//! Ordered request parameters.
//!
//! [`Params`] is an ordered multimap used both for query strings and for
//! request bodies. Repeating a key is how list values travel on the wire
//! (`ids[]=1&ids[]=2`), so insertion order and duplicates are preserved.

use std::path::PathBuf;

/// A file to send as part of a multipart request body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Upload {
    /// A file on disk, streamed when the request is sent.
    File(PathBuf),
    /// An in-memory payload with the file name to report to the server.
    Bytes {
        /// The file name sent in the part's `Content-Disposition`.
        file_name: String,
        /// The file contents.
        bytes: Vec<u8>,
    },
}

impl Upload {
    /// Creates an upload streamed from a file on disk.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Creates an upload from bytes already in memory.
    #[must_use]
    pub fn bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A single parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A plain text value.
    Text(String),
    /// A file upload; forces multipart encoding of the body.
    Upload(Upload),
}

impl ParamValue {
    /// Returns the text value, or `None` for uploads.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Upload(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Upload> for ParamValue {
    fn from(value: Upload) -> Self {
        Self::Upload(value)
    }
}

/// An ordered list of `key=value` parameters that may repeat keys.
///
/// # Example
///
/// ```rust
/// use soundcloud_api::clients::Params;
///
/// let mut params = Params::new();
/// params.push("q", "ambient");
/// params.push_list("ids[]", [1_u64, 2, 3]);
/// params.set("q", "drone");
///
/// assert_eq!(params.text("q"), Some("drone"));
/// assert_eq!(params.len(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a parameter, keeping any existing values for the same key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.push((key.into(), value.into()));
    }

    /// Appends one parameter per item, all under the same key.
    pub fn push_list<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let key = key.into();
        for value in values {
            self.0.push((key.clone(), value.into()));
        }
    }

    /// Replaces every value of `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        self.remove(&key);
        self.0.push((key, value.into()));
    }

    /// Removes every value of `key`, returning whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|(k, _)| k != key);
        before != self.0.len()
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Returns the first value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the first value of `key` if it is text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    /// Returns `true` if `key` has at least one value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Returns `true` if any value is an upload.
    #[must_use]
    pub fn has_uploads(&self) -> bool {
        self.0
            .iter()
            .any(|(_, v)| matches!(v, ParamValue::Upload(_)))
    }

    /// Returns the number of `key=value` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over text entries, skipping uploads.
    pub fn text_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_text().map(|text| (k.as_str(), text)))
    }

    /// Appends every entry of `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
