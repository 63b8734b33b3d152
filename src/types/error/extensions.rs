use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Error;

/// Value of a single named extension attached to an [`Error`].
///
/// Error-valued extensions are rendered as nested reports rather than as
/// inline values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Extension {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Error(Error),
    Errors(Vec<Error>),
}

impl Extension {
    /// Returns the text payload, if this is a text extension.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn as_error(&self) -> Option<&Error> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` for `Error` and `Errors` values.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Errors(_))
    }

    /// The errors carried by this value; empty for scalar values.
    pub fn nested_errors(&self) -> &[Error] {
        match self {
            Self::Error(error) => std::slice::from_ref(error),
            Self::Errors(errors) => errors,
            _ => &[],
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Error(error) => write!(f, "{}: {}", error.title(), error.message()),
            Self::Errors(errors) => write!(f, "[{} errors]", errors.len()),
        }
    }
}

impl From<&str> for Extension {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Extension {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Cow<'_, str>> for Extension {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Text(value.into_owned())
    }
}

macro_rules! integer_extension {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Extension {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_extension!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Extension {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<u64> for Extension {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<f32> for Extension {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Extension {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Extension {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Error> for Extension {
    fn from(value: Error) -> Self {
        Self::Error(value)
    }
}

impl From<Vec<Error>> for Extension {
    fn from(value: Vec<Error>) -> Self {
        Self::Errors(value)
    }
}

/// Insertion-ordered mapping of extension names to values.
///
/// Error records rarely carry more than a couple of extensions, so entries are
/// kept inline and looked up linearly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    entries: SmallVec<[(Cow<'static, str>, Extension); 2]>,
}

impl Extensions {
    #[inline]
    pub fn new() -> Self {
        Self { entries: SmallVec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Extension> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a value, keeping the original position of an existing key.
    ///
    /// Returns the replaced value, if any.
    pub fn insert(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Extension>,
    ) -> Option<Extension> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            },
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Extension> {
        let index = self.entries.iter().position(|(name, _)| name == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &Extension) -> bool,
    {
        self.entries.retain(|(name, value)| keep(name, value));
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Extension)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_ref(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }
}

impl<K, V> Extend<(K, V)> for Extensions
where
    K: Into<Cow<'static, str>>,
    V: Into<Extension>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Extensions
where
    K: Into<Cow<'static, str>>,
    V: Into<Extension>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut extensions = Self::new();
        extensions.extend(iter);
        extensions
    }
}
