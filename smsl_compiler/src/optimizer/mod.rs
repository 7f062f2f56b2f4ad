//! Quadruple optimizer
//!
//! Runs consecutive-action collapsing, then common-subexpression
//! elimination, then (with [`OptimizerPolicy::DeduplicateAndMerge`])
//! transition merging.

pub mod passes;

use crate::config::runtime::OptimizerPreferences;
use crate::intermediate::Quadruple;
use crate::logging::codes;
use crate::log_success;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizerPolicy {
    /// Repeated-action collapsing and common-subexpression elimination
    #[default]
    #[serde(alias = "dedup")]
    Deduplicate,
    /// Deduplication followed by transition merging
    #[serde(alias = "merge")]
    DeduplicateAndMerge,
}

impl OptimizerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizerPolicy::Deduplicate => "deduplicate",
            OptimizerPolicy::DeduplicateAndMerge => "deduplicate-and-merge",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dedup" | "deduplicate" => Some(OptimizerPolicy::Deduplicate),
            "merge" | "deduplicate-and-merge" => Some(OptimizerPolicy::DeduplicateAndMerge),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptimizationStats {
    pub repeated_actions_removed: usize,
    pub duplicates_removed: usize,
    pub transitions_renamed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OptimizationOutput {
    pub quadruples: Vec<Quadruple>,
    pub stats: OptimizationStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Optimizer {
    policy: OptimizerPolicy,
}

impl Optimizer {
    pub fn new(policy: OptimizerPolicy) -> Self {
        Self { policy }
    }

    pub fn with_preferences(preferences: &OptimizerPreferences) -> Self {
        Self::new(preferences.policy)
    }

    pub fn policy(&self) -> OptimizerPolicy {
        self.policy
    }

    pub fn optimize(&self, quadruples: &[Quadruple]) -> OptimizationOutput {
        let mut optimized = quadruples.to_vec();
        let mut stats = OptimizationStats {
            repeated_actions_removed: passes::collapse_repeated_actions(&mut optimized),
            duplicates_removed: passes::eliminate_common_subexpressions(&mut optimized),
            transitions_renamed: 0,
        };

        if self.policy == OptimizerPolicy::DeduplicateAndMerge {
            stats.transitions_renamed = passes::merge_transitions(&mut optimized);
        }

        log_success!(
            codes::success::OPTIMIZATION_COMPLETE,
            "Optimization complete",
            "policy" => self.policy.as_str(),
            "before" => quadruples.len(),
            "after" => optimized.len(),
            "renamed" => stats.transitions_renamed
        );

        OptimizationOutput {
            quadruples: optimized,
            stats,
        }
    }
}
