use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One accepted CSV data line, keyed by header name in header order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Builds a record by pairing headers with values positionally
    pub fn from_pairs(headers: &[String], values: Vec<String>) -> Self {
        Self {
            fields: headers.iter().cloned().zip(values).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountType {
    Verified,
    Regular,
    /// A label supplied by a pre-normalized source and kept verbatim
    Other(String),
}

impl AccountType {
    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Verified => "verified",
            AccountType::Regular => "regular",
            AccountType::Other(label) => label,
        }
    }
}

impl From<&str> for AccountType {
    fn from(label: &str) -> Self {
        match label {
            "verified" => AccountType::Verified,
            "regular" => AccountType::Regular,
            other => AccountType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AccountType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AccountType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(AccountType::from(label.as_str()))
    }
}

/// A normalized post, identical in shape whether it came from CSV or JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub person_id: String,
    pub username: String,
    pub account_type: AccountType,
    pub text: String,
    pub timestamp: String,
    pub likes: u64,
    pub reposts: u64,
}

impl Post {
    /// Date part of the timestamp: everything before the first `T`
    pub fn date(&self) -> &str {
        crate::utils::date_portion(&self.timestamp)
    }
}

/// A post as it appears in a pre-normalized JSON array.
///
/// Every field is optional so that partially shaped entries can still be
/// normalized; counters accept numbers, numeric strings or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonPost {
    #[serde(default, deserialize_with = "lenient_string")]
    pub post_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub person_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub account_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub likes: serde_json::Value,
    #[serde(default)]
    pub reposts: serde_json::Value,
}

// Accepts strings, numbers and null; ids are often exported as integers.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Raw data as fetched, tagged by format
#[derive(Debug, Clone)]
pub enum DataSource {
    PreNormalized(Vec<JsonPost>),
    RawCsv(String),
}

/// Inclusive date range covered by the loaded posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBounds {
    pub min: String,
    pub max: String,
}

/// Which day the viewer asked for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateSelection {
    All,
    #[default]
    Earliest,
    On(String),
}

/// What the renderer is asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineView<'a> {
    Failed(String),
    EmptyDataset,
    NoResults {
        date: String,
        bounds: DateBounds,
    },
    Posts {
        selected: Option<String>,
        bounds: DateBounds,
        posts: Vec<&'a Post>,
    },
}
