//! Severity and rule-entry wire forms shared across both config formats.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Enforcement level of a rule.
///
/// The numeric wire form is `0 | 1 | 2`; the string aliases
/// `"off" | "warn" | "error"` deserialize to the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The rule is disabled.
    Off,
    /// Violations are reported without failing the lint run.
    Warn,
    /// Violations fail the lint run.
    Error,
}

impl Severity {
    /// Returns the numeric wire value.
    #[must_use]
    pub fn as_number(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Warn => 1,
            Self::Error => 2,
        }
    }

    /// Returns `true` unless the severity is [`Severity::Off`].
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_number())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeverityVisitor;

        impl Visitor<'_> for SeverityVisitor {
            type Value = Severity;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("0, 1, 2, \"off\", \"warn\", or \"error\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                match value {
                    0 => Ok(Severity::Off),
                    1 => Ok(Severity::Warn),
                    2 => Ok(Severity::Error),
                    other => Err(E::custom(format!("unknown severity number: {other}"))),
                }
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map_err(|_| E::custom(format!("unknown severity number: {value}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                match value {
                    "off" => Ok(Severity::Off),
                    "warn" => Ok(Severity::Warn),
                    "error" => Ok(Severity::Error),
                    other => Err(E::custom(format!("unknown severity: {other}"))),
                }
            }
        }

        deserializer.deserialize_any(SeverityVisitor)
    }
}

/// Configuration of a single rule: severity plus rule-specific options.
///
/// Wire forms accepted:
///
/// ```json
/// "rule-a": 2
/// "rule-b": "warn"
/// "rule-c": [2, "always", { "allow": ["x"] }]
/// ```
///
/// The serialized form is always the array spelling with a numeric
/// severity, which is the shape the detailed classification reports.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    severity: Severity,
    options: Vec<serde_json::Value>,
}

impl RuleConfig {
    /// Creates a rule configuration from a severity and its options.
    #[must_use]
    pub fn new(severity: Severity, options: Vec<serde_json::Value>) -> Self {
        Self { severity, options }
    }

    /// Creates a bare-severity configuration with no options.
    #[must_use]
    pub fn severity_only(severity: Severity) -> Self {
        Self::new(severity, Vec::new())
    }

    /// Returns the configured severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the rule-specific option values.
    #[must_use]
    pub fn options(&self) -> &[serde_json::Value] {
        &self.options
    }

    /// Returns `true` when the severity is non-zero.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.severity.is_enabled()
    }
}

impl Serialize for RuleConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1 + self.options.len()))?;
        seq.serialize_element(&self.severity)?;
        for option in &self.options {
            seq.serialize_element(option)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RuleConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleConfigVisitor;

        impl<'de> Visitor<'de> for RuleConfigVisitor {
            type Value = RuleConfig;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a severity or an array [severity, ...options]")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                let severity = Severity::deserialize(de::value::U64Deserializer::new(value))?;
                Ok(RuleConfig::severity_only(severity))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                let severity = Severity::deserialize(de::value::I64Deserializer::new(value))?;
                Ok(RuleConfig::severity_only(severity))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                let severity = Severity::deserialize(de::value::StrDeserializer::new(value))?;
                Ok(RuleConfig::severity_only(severity))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let severity: Severity = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &"array with severity"))?;
                let mut options = Vec::new();
                while let Some(option) = seq.next_element::<serde_json::Value>()? {
                    options.push(option);
                }
                Ok(RuleConfig::new(severity, options))
            }
        }

        deserializer.deserialize_any(RuleConfigVisitor)
    }
}
