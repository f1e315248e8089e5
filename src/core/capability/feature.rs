//! Feature keys

use crate::utils::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability names known to the platform.
///
/// Any name outside this set is rejected at parse time, so lookups never see
/// an undeclared key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKey {
    Dashboard,
    Bookings,
    Calendar,
    Services,
    Clients,
    Analytics,
    AdvancedAnalytics,
    /// Tri-state AI assistant access, see [`AiTier`](super::AiTier)
    AiAccess,
    AiSettings,
    AiVoiceAssistant,
    /// Quota of AI-generated service templates
    SmartServiceTemplates,
    SlotBroadcast,
    TeamManagement,
    OrgManagement,
    CustomBranding,
    CustomDomain,
    ApiAccess,
    PrioritySupport,
    CsvExport,
    Integrations,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 20] = [
        FeatureKey::Dashboard,
        FeatureKey::Bookings,
        FeatureKey::Calendar,
        FeatureKey::Services,
        FeatureKey::Clients,
        FeatureKey::Analytics,
        FeatureKey::AdvancedAnalytics,
        FeatureKey::AiAccess,
        FeatureKey::AiSettings,
        FeatureKey::AiVoiceAssistant,
        FeatureKey::SmartServiceTemplates,
        FeatureKey::SlotBroadcast,
        FeatureKey::TeamManagement,
        FeatureKey::OrgManagement,
        FeatureKey::CustomBranding,
        FeatureKey::CustomDomain,
        FeatureKey::ApiAccess,
        FeatureKey::PrioritySupport,
        FeatureKey::CsvExport,
        FeatureKey::Integrations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::Dashboard => "dashboard",
            FeatureKey::Bookings => "bookings",
            FeatureKey::Calendar => "calendar",
            FeatureKey::Services => "services",
            FeatureKey::Clients => "clients",
            FeatureKey::Analytics => "analytics",
            FeatureKey::AdvancedAnalytics => "advancedAnalytics",
            FeatureKey::AiAccess => "aiAccess",
            FeatureKey::AiSettings => "aiSettings",
            FeatureKey::AiVoiceAssistant => "aiVoiceAssistant",
            FeatureKey::SmartServiceTemplates => "smartServiceTemplates",
            FeatureKey::SlotBroadcast => "slotBroadcast",
            FeatureKey::TeamManagement => "teamManagement",
            FeatureKey::OrgManagement => "orgManagement",
            FeatureKey::CustomBranding => "customBranding",
            FeatureKey::CustomDomain => "customDomain",
            FeatureKey::ApiAccess => "apiAccess",
            FeatureKey::PrioritySupport => "prioritySupport",
            FeatureKey::CsvExport => "csvExport",
            FeatureKey::Integrations => "integrations",
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKey {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        FeatureKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| GateError::unknown_feature(s))
    }
}
