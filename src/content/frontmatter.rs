//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            // Null items (`[a, ~]`) are dropped
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Option<String>>()? {
                vec.extend(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// String field where a YAML null (`~`, `null`, or no value) means empty
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Front-matter of a post
///
/// Unknown keys (including `slug`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(deserialize_with = "string_or_null")]
    pub date: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub categories: Vec<String>,
    /// Kept untyped; see [`FrontMatter::is_published`]
    pub published: Option<Value>,
    #[serde(alias = "thumnail", deserialize_with = "string_or_null")]
    pub thumbnail: String,
}

impl FrontMatter {
    /// Parse the YAML front-matter block at the start of a document
    ///
    /// Returns `Ok(None)` when the document has no `---` delimited block (or
    /// the block is empty), and an error when the block is not a mapping
    /// matching the schema. On success the remaining markdown body is
    /// returned alongside.
    pub fn parse(content: &str) -> Result<Option<(Self, &str)>, serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some((opening, rest)) = content.split_once('\n') else {
            return Ok(None);
        };
        if opening.trim_end() != "---" {
            return Ok(None);
        }

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let yaml_content = &rest[..offset];
                let remaining = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);

                if yaml_content.trim().is_empty() {
                    return Ok(None);
                }

                let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
                return Ok(Some((fm, remaining)));
            }
            offset += line.len();
        }

        // No closing ---
        Ok(None)
    }

    /// Truthiness of the `published` value
    ///
    /// Booleans are themselves, numbers are true unless zero or NaN, strings
    /// are true unless empty, sequences and mappings are always true, and a
    /// missing or null value is false.
    pub fn is_published(&self) -> bool {
        self.published.as_ref().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}
