//! Capability matrix storage and lookup

use super::defaults;
use super::types::CapabilitySet;
use crate::core::identity::{Role, Segment};
use crate::core::plan::PlanTier;
use crate::utils::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

type RoleTable = HashMap<Role, CapabilitySet>;
type SegmentTable = HashMap<Segment, RoleTable>;

/// Immutable `plan → segment → role → capabilities` table.
///
/// There is no mutation API. A changed table is a new matrix, swapped in
/// whole by [`AccessEngine::reload_matrix`](crate::AccessEngine::reload_matrix).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityMatrix {
    /// Version label of the table
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    plans: HashMap<PlanTier, SegmentTable>,
}

fn default_version() -> String {
    "unversioned".to_string()
}

impl CapabilityMatrix {
    pub fn builder<S: Into<String>>(version: S) -> CapabilityMatrixBuilder {
        CapabilityMatrixBuilder {
            matrix: CapabilityMatrix {
                version: version.into(),
                plans: HashMap::new(),
            },
        }
    }

    /// Shared handle to the table shipped with the crate
    pub fn builtin() -> Arc<CapabilityMatrix> {
        defaults::builtin_matrix()
    }

    /// Parse a matrix from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let matrix: CapabilityMatrix = serde_yaml::from_str(content)
            .map_err(|e| GateError::config(format!("Failed to parse capability matrix: {}", e)))?;
        debug!(
            "Parsed capability matrix {} with {} entries",
            matrix.version,
            matrix.entry_count()
        );
        Ok(matrix)
    }

    /// Load a matrix from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading capability matrix from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            GateError::config(format!("Failed to read capability matrix file: {}", e))
        })?;

        Self::from_yaml_str(&content)
    }

    /// Capabilities for a combination; `None` for anything undeclared
    pub fn lookup(&self, plan: PlanTier, segment: Segment, role: Role) -> Option<&CapabilitySet> {
        self.plans.get(&plan)?.get(&segment)?.get(&role)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of `(plan, segment, role)` combinations declared
    pub fn entry_count(&self) -> usize {
        self.plans
            .values()
            .flat_map(|segments| segments.values())
            .map(|roles| roles.len())
            .sum()
    }

    /// Plans with at least one declared combination
    pub fn plans(&self) -> impl Iterator<Item = PlanTier> + '_ {
        self.plans.keys().copied()
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            GateError::config(format!("Failed to serialize capability matrix: {}", e))
        })
    }
}

/// Builds a [`CapabilityMatrix`] in code
#[derive(Debug)]
pub struct CapabilityMatrixBuilder {
    matrix: CapabilityMatrix,
}

impl CapabilityMatrixBuilder {
    /// Declare the capability set for a combination, replacing any earlier one
    pub fn grant(
        mut self,
        plan: PlanTier,
        segment: Segment,
        role: Role,
        capabilities: CapabilitySet,
    ) -> Self {
        self.matrix
            .plans
            .entry(plan)
            .or_default()
            .entry(segment)
            .or_default()
            .insert(role, capabilities);
        self
    }

    pub fn build(self) -> CapabilityMatrix {
        self.matrix
    }
}
