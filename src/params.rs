//! Query parameter model and percent-encoding.
//!
//! Parameters are kept as an insertion-ordered list of name/value pairs so the
//! encoded query string carries them in exactly the order the caller supplied
//! them. Values are typed via [`ParamValue`] rather than pre-stringified, with
//! a defined text form per variant.

use crate::{Error, Result};
use url::form_urlencoded;

/// A single query parameter value.
///
/// Each variant has a defined query-string text form:
///
/// | Variant | Text form |
/// |---|---|
/// | `Str` | the string itself |
/// | `Int` | decimal integer |
/// | `Float` | decimal, finite values only |
/// | `Bool` | `true` / `false` |
/// | `Absent` | the empty string (never the text `"null"`) |
///
/// # Examples
///
/// ```
/// use reqsmith::ParamValue;
///
/// assert_eq!(ParamValue::from(2).to_query_value().unwrap(), "2");
/// assert_eq!(ParamValue::from(true).to_query_value().unwrap(), "true");
/// assert_eq!(ParamValue::Absent.to_query_value().unwrap(), "");
/// assert_eq!(ParamValue::from(None::<&str>), ParamValue::Absent);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// An arbitrary string value.
    Str(String),
    /// A signed integer value.
    Int(i64),
    /// A floating-point value. Only finite values have a query representation.
    Float(f64),
    /// A boolean value, rendered as `true` or `false`.
    Bool(bool),
    /// A deliberately absent value, rendered as the empty string.
    Absent,
}

impl ParamValue {
    /// Returns the un-encoded text form of this value.
    ///
    /// # Errors
    ///
    /// Fails for values with no query-string representation (non-finite
    /// floats). Such a value can never be transmitted, so the failure is
    /// fatal to the surrounding build rather than silently degraded.
    pub fn to_query_value(&self) -> std::result::Result<String, &'static str> {
        match self {
            ParamValue::Str(s) => Ok(s.clone()),
            ParamValue::Int(i) => Ok(i.to_string()),
            ParamValue::Float(f) => {
                if f.is_finite() {
                    Ok(f.to_string())
                } else {
                    Err("non-finite float has no query-string form")
                }
            }
            ParamValue::Bool(b) => Ok(b.to_string()),
            ParamValue::Absent => Ok(String::new()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Int(i64::from(i))
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<u32> for ParamValue {
    fn from(i: u32) -> Self {
        ParamValue::Int(i64::from(i))
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl<T> From<Option<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ParamValue::Absent,
        }
    }
}

/// An insertion-ordered collection of query parameters.
///
/// Order matters: the encoded query string preserves the order in which
/// parameters were added, since key order may affect semantics or caching on
/// the receiving service.
///
/// # Examples
///
/// ```
/// use reqsmith::QueryParams;
///
/// let params = QueryParams::new()
///     .param("q", "a&b")
///     .param("page", 2)
///     .param("resolved", None::<bool>);
///
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, returning `self` for chaining.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a parameter in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encodes every value, preserving names and order.
    ///
    /// Names pass through verbatim; values are percent-encoded from their
    /// UTF-8 bytes using conventional query-string rules (space becomes `+`,
    /// reserved characters are escaped). [`ParamValue::Absent`] encodes to
    /// the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if a value has no query-string form.
    pub(crate) fn encode(&self) -> Result<Vec<(String, String)>> {
        let mut encoded = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let text = value.to_query_value().map_err(|reason| Error::Encoding {
                name: name.clone(),
                reason: reason.to_string(),
            })?;
            encoded.push((name.clone(), percent_encode(&text)));
        }
        Ok(encoded)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Percent-encodes a single value using form-urlencoding conventions.
fn percent_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
