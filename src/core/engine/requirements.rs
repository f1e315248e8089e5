//! Declarative feature requirements

use crate::core::identity::Role;
use crate::core::plan::PlanTier;
use crate::core::usage::UsagePeriod;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Conditions a feature gate enforces, in check order: roles, plan, usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRequirement {
    /// Feature name; also the usage counter key
    pub feature: String,
    /// Any one of these roles passes; empty means no role requirement
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_plan: Option<PlanTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u64>,
    /// Unrecognized period names fall back to the default period
    #[serde(
        default,
        deserialize_with = "lenient_period",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage_period: Option<UsagePeriod>,
}

fn lenient_period<'de, D>(deserializer: D) -> Result<Option<UsagePeriod>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.map(|n| UsagePeriod::parse_or_default(&n)))
}

impl FeatureRequirement {
    pub fn new<S: Into<String>>(feature: S) -> Self {
        Self {
            feature: feature.into(),
            required_roles: Vec::new(),
            required_plan: None,
            usage_limit: None,
            usage_period: None,
        }
    }

    pub fn with_roles(mut self, roles: &[Role]) -> Self {
        self.required_roles = roles.to_vec();
        self
    }

    pub fn with_plan(mut self, plan: PlanTier) -> Self {
        self.required_plan = Some(plan);
        self
    }

    /// Cap invocations per period; `None` uses the tracker's default period
    pub fn with_usage_limit(mut self, limit: u64, period: Option<UsagePeriod>) -> Self {
        self.usage_limit = Some(limit);
        self.usage_period = period;
        self
    }

    /// Like [`with_usage_limit`](Self::with_usage_limit) with a period name
    /// as it arrives from a caller; unknown names use the default period
    pub fn with_usage_limit_named(self, limit: u64, period: &str) -> Self {
        self.with_usage_limit(limit, Some(UsagePeriod::parse_or_default(period)))
    }
}

/// Lookup table of feature requirements keyed by feature name
#[derive(Debug, Clone, Default)]
pub struct RequirementTable {
    entries: HashMap<String, FeatureRequirement>,
}

impl RequirementTable {
    /// Requirements for the platform's gated screens and actions
    pub fn builtin_requirements() -> Vec<FeatureRequirement> {
        vec![
            FeatureRequirement::new("slotBroadcast").with_plan(PlanTier::Advanced),
            FeatureRequirement::new("bulkCsvExport")
                .with_plan(PlanTier::Advanced)
                .with_usage_limit(20, Some(UsagePeriod::Day)),
            FeatureRequirement::new("aiServiceTemplates")
                .with_plan(PlanTier::Advanced)
                .with_usage_limit(10, Some(UsagePeriod::Month)),
            FeatureRequirement::new("voiceAssistant").with_plan(PlanTier::Professional),
            FeatureRequirement::new("teamSettings")
                .with_roles(&[Role::TeamAdmin, Role::OrgAdmin])
                .with_plan(PlanTier::Advanced),
            FeatureRequirement::new("orgSettings")
                .with_roles(&[Role::OrgAdmin])
                .with_plan(PlanTier::Professional),
            FeatureRequirement::new("customDomainSetup")
                .with_roles(&[Role::OrgAdmin])
                .with_plan(PlanTier::Enterprise),
        ]
    }

    /// Table of [`builtin_requirements`](Self::builtin_requirements)
    pub fn builtin() -> Self {
        Self::from(Self::builtin_requirements())
    }

    pub fn get(&self, feature: &str) -> Option<&FeatureRequirement> {
        self.entries.get(feature)
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.entries.contains_key(feature)
    }

    /// Add or replace a requirement
    pub fn insert(&mut self, requirement: FeatureRequirement) {
        self.entries.insert(requirement.feature.clone(), requirement);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<FeatureRequirement>> for RequirementTable {
    fn from(requirements: Vec<FeatureRequirement>) -> Self {
        let mut table = Self::default();
        for requirement in requirements {
            table.insert(requirement);
        }
        table
    }
}
