//! Capability values and sets

use super::feature::FeatureKey;
use crate::utils::error::{GateError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const UNLIMITED: &str = "unlimited";
const BOOKING_ONLY: &str = "booking_only";
const FULL: &str = "full";

/// Level of AI assistant access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiTier {
    /// Assistant limited to booking flows
    BookingOnly,
    /// Full assistant
    Full,
}

impl AiTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiTier::BookingOnly => BOOKING_ONLY,
            AiTier::Full => FULL,
        }
    }
}

impl fmt::Display for AiTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single capability value.
///
/// Written in configuration as `true`/`false`, a non-negative integer,
/// `"unlimited"`, `"booking_only"` or `"full"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Plain on/off switch
    Flag(bool),
    /// Numeric quota per usage period
    Quota(u32),
    /// No cap
    Unlimited,
    /// Explicit AI access tier
    Ai(AiTier),
}

impl Capability {
    /// Whether the capability grants anything at all
    pub fn is_enabled(&self) -> bool {
        match self {
            Capability::Flag(enabled) => *enabled,
            Capability::Quota(n) => *n > 0,
            Capability::Unlimited => true,
            Capability::Ai(_) => true,
        }
    }

    /// Numeric cap, `None` when the capability is uncapped.
    ///
    /// Only meaningful for enabled capabilities.
    pub fn quota(&self) -> Option<u64> {
        match self {
            Capability::Quota(n) => Some(u64::from(*n)),
            Capability::Flag(false) => Some(0),
            Capability::Flag(true) | Capability::Unlimited | Capability::Ai(_) => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Flag(b) => write!(f, "{}", b),
            Capability::Quota(n) => write!(f, "{}", n),
            Capability::Unlimited => f.write_str(UNLIMITED),
            Capability::Ai(tier) => f.write_str(tier.as_str()),
        }
    }
}

impl FromStr for Capability {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "true" => Ok(Capability::Flag(true)),
            "false" => Ok(Capability::Flag(false)),
            UNLIMITED => Ok(Capability::Unlimited),
            BOOKING_ONLY => Ok(Capability::Ai(AiTier::BookingOnly)),
            FULL => Ok(Capability::Ai(AiTier::Full)),
            other => other
                .parse::<u32>()
                .map(Capability::Quota)
                .map_err(|_| GateError::invalid_capability(other)),
        }
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Capability::Flag(b) => serializer.serialize_bool(*b),
            Capability::Quota(n) => serializer.serialize_u32(*n),
            Capability::Unlimited => serializer.serialize_str(UNLIMITED),
            Capability::Ai(tier) => serializer.serialize_str(tier.as_str()),
        }
    }
}

struct CapabilityVisitor;

impl<'de> Visitor<'de> for CapabilityVisitor {
    type Value = Capability;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, a non-negative integer, \"unlimited\", \"booking_only\" or \"full\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Capability, E> {
        Ok(Capability::Flag(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Capability, E> {
        u32::try_from(v)
            .map(Capability::Quota)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Capability, E> {
        u32::try_from(v)
            .map(Capability::Quota)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Capability, E> {
        match v {
            UNLIMITED => Ok(Capability::Unlimited),
            BOOKING_ONLY => Ok(Capability::Ai(AiTier::BookingOnly)),
            FULL => Ok(Capability::Ai(AiTier::Full)),
            _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CapabilityVisitor)
    }
}

/// Capabilities granted to one `(plan, segment, role)` combination.
///
/// A feature absent from the set is denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    entries: HashMap<FeatureKey, Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, feature: FeatureKey, capability: Capability) -> Self {
        self.entries.insert(feature, capability);
        self
    }

    /// Builder-style switch for a set of features
    pub fn enable(mut self, features: &[FeatureKey]) -> Self {
        for feature in features {
            self.entries.insert(*feature, Capability::Flag(true));
        }
        self
    }

    pub fn get(&self, feature: FeatureKey) -> Option<Capability> {
        self.entries.get(&feature).copied()
    }

    /// Truthiness of the feature; absent is `false`
    pub fn is_enabled(&self, feature: FeatureKey) -> bool {
        self.get(feature).is_some_and(|c| c.is_enabled())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureKey, Capability)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(FeatureKey, Capability)> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = (FeatureKey, Capability)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
