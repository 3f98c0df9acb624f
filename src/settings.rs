//! The configuration values a database handle is scoped with.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where read operations should be routed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadPreference {
    /// Reads go to the primary member only.
    #[default]
    Primary,

    /// Reads go to the primary when available, otherwise a secondary.
    PrimaryPreferred,

    /// Reads go to a secondary member only.
    Secondary,

    /// Reads go to a secondary when available, otherwise the primary.
    SecondaryPreferred,

    /// Reads go to the member with the lowest latency.
    Nearest,
}

impl ReadPreference {
    /// Returns true if reads must be served by the primary.
    pub fn is_primary(&self) -> bool {
        matches!(self, ReadPreference::Primary)
    }
}

/// The isolation level applied to read operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadConcernLevel {
    /// Return the node's most recent data, committed or not.
    Local,

    /// Return only data acknowledged by a majority of members.
    Majority,

    /// Return data that reflects all successful majority writes.
    Linearizable,

    /// Return available data, with no consistency guarantee.
    Available,
}

/// The read concern a database handle applies to its operations.
///
/// An absent level means the server decides.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadConcern {
    /// The requested isolation level, if any.
    pub level: Option<ReadConcernLevel>,
}

impl ReadConcern {
    /// A read concern with the given level.
    pub fn with_level(level: ReadConcernLevel) -> Self {
        ReadConcern { level: Some(level) }
    }

    /// The majority read concern.
    pub fn majority() -> Self {
        ReadConcern::with_level(ReadConcernLevel::Majority)
    }

    /// The local read concern.
    pub fn local() -> Self {
        ReadConcern::with_level(ReadConcernLevel::Local)
    }
}

/// How many members must acknowledge a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgment {
    /// Acknowledged by the given number of members.
    Nodes(u32),

    /// Acknowledged by a majority of members.
    Majority,

    /// Acknowledged per a server-defined write concern tag.
    Custom(String),
}

/// The write concern a database handle applies to its operations.
///
/// All-absent fields mean the server's default write concern applies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteConcern {
    /// The acknowledgment requirement, if any.
    pub w: Option<Acknowledgment>,

    /// Whether the write must be journaled before acknowledgment.
    pub journal: Option<bool>,

    /// How long the server may wait for the requested acknowledgment.
    pub w_timeout: Option<Duration>,
}

impl WriteConcern {
    /// A write concern acknowledged by a majority of members.
    pub fn majority() -> Self {
        WriteConcern {
            w: Some(Acknowledgment::Majority),
            ..Default::default()
        }
    }

    /// A write concern acknowledged by the given number of members.
    pub fn nodes(n: u32) -> Self {
        WriteConcern {
            w: Some(Acknowledgment::Nodes(n)),
            ..Default::default()
        }
    }
}

/// Language-aware string comparison settings.
///
/// Only `locale` is required; absent fields are left for the server to
/// default and are never written to the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collation {
    /// The ICU locale, e.g. `"en"` or `"fr_CA"`.
    pub locale: String,

    /// Whether to distinguish case at the base-letter comparison level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_level: Option<bool>,

    /// Sort order of case differences: `"upper"`, `"lower"`, or `"off"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_first: Option<String>,

    /// Comparison strength, 1 (base characters) through 5 (identical).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<u32>,

    /// Whether to compare numeric substrings by numeric value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_ordering: Option<bool>,

    /// Whether whitespace and punctuation count as base characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<String>,

    /// Which characters `alternate: "shifted"` affects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_variable: Option<String>,

    /// Whether secondary differences sort from the end of the string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backwards: Option<bool>,
}

impl Collation {
    /// Creates a collation for the given locale, with every other field
    /// left for the server to default.
    pub fn new(locale: &str) -> Self {
        Collation {
            locale: locale.to_string(),
            case_level: None,
            case_first: None,
            strength: None,
            numeric_ordering: None,
            alternate: None,
            max_variable: None,
            backwards: None,
        }
    }

    /// Sets the comparison strength.
    pub fn strength(mut self, strength: u32) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Sets numeric ordering.
    pub fn numeric_ordering(mut self, numeric_ordering: bool) -> Self {
        self.numeric_ordering = Some(numeric_ordering);
        self
    }
}
