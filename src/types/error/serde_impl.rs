//! Wire format for [`Error`]: `title`, `message`, `errorCode`, `identifier`,
//! `extensions` and a recursively encoded `innerError`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Error, Extension, Extensions};

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Error", 6)?;
        state.serialize_field("title", self.title())?;
        state.serialize_field("message", self.message())?;

        match self.error_code() {
            Some(code) => state.serialize_field("errorCode", &code)?,
            None => state.skip_field("errorCode")?,
        }
        match self.identifier() {
            Some(identifier) => state.serialize_field("identifier", identifier)?,
            None => state.skip_field("identifier")?,
        }
        if self.extensions().is_empty() {
            state.skip_field("extensions")?;
        } else {
            state.serialize_field("extensions", self.extensions())?;
        }
        match self.inner_error() {
            Some(inner) => state.serialize_field("innerError", inner)?,
            None => state.skip_field("innerError")?,
        }

        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorWire {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_code: Option<i32>,
    #[serde(default)]
    identifier: Option<String>,
    #[serde(default)]
    extensions: Extensions,
    #[serde(default)]
    inner_error: Option<Error>,
}

impl<'de> Deserialize<'de> for Error {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ErrorWire::deserialize(deserializer)?;

        let mut builder = Error::builder()
            .maybe_code(wire.error_code)
            .maybe_identifier(wire.identifier)
            .set_inner(wire.inner_error);
        if let Some(title) = wire.title {
            builder = builder.title(title);
        }
        if let Some(message) = wire.message {
            builder = builder.message(message);
        }
        builder.repr.extensions = wire.extensions;

        Ok(builder.build())
    }
}

impl Serialize for Extensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Extensions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ExtensionsVisitor)
    }
}

/// Collects map entries in document order.
struct ExtensionsVisitor;

impl<'de> Visitor<'de> for ExtensionsVisitor {
    type Value = Extensions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of extension names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut extensions = Extensions::new();
        while let Some((key, value)) = access.next_entry::<String, Extension>()? {
            extensions.insert(key, value);
        }
        Ok(extensions)
    }
}
