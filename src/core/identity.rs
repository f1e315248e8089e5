//! The acting principal: roles, plan and segment

use super::plan::PlanTier;
use crate::utils::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role label held by an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular account user
    EndUser,
    /// Administrator of a team
    TeamAdmin,
    /// Administrator of an organization
    OrgAdmin,
    /// Platform operator; satisfies every check
    PlatformAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::EndUser,
        Role::TeamAdmin,
        Role::OrgAdmin,
        Role::PlatformAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::EndUser => "end_user",
            Role::TeamAdmin => "team_admin",
            Role::OrgAdmin => "org_admin",
            Role::PlatformAdmin => "platform_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| GateError::unknown_role(s))
    }
}

/// Account type, the secondary axis of the capability matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Solo professional account
    Individual,
    /// Member seat inside a team account
    TeamMember,
    /// Team account managed by its admin
    TeamAdmin,
    /// Organization account managed by its admin
    OrgAdmin,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::Individual,
        Segment::TeamMember,
        Segment::TeamAdmin,
        Segment::OrgAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Individual => "individual",
            Segment::TeamMember => "team_member",
            Segment::TeamAdmin => "team_admin",
            Segment::OrgAdmin => "org_admin",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Segment {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        Segment::ALL
            .into_iter()
            .find(|seg| seg.as_str() == s.trim())
            .ok_or_else(|| GateError::unknown_segment(s))
    }
}

/// Identity record supplied by the identity provider.
///
/// The first role in `roles` is the role of record used for matrix lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier, keys usage counters
    pub user_id: String,
    /// Roles held, primary first
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Current plan
    pub plan: PlanTier,
    /// Account segment
    pub segment: Segment,
}

impl Identity {
    pub fn new<S: Into<String>>(user_id: S, roles: Vec<Role>, plan: PlanTier, segment: Segment) -> Self {
        Self {
            user_id: user_id.into(),
            roles,
            plan,
            segment,
        }
    }

    /// Role used for capability lookups
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Holds `platform_admin`
    pub fn is_platform_admin(&self) -> bool {
        self.has_role(Role::PlatformAdmin)
    }

    /// Holds at least one of `required`
    pub fn has_any_role(&self, required: &[Role]) -> bool {
        required.iter().any(|r| self.has_role(*r))
    }
}
