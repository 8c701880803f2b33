//! The approval-step sequencer: an ordered list of workflow steps, each
//! naming an approver, role, and approval mode. Sequential steps carry
//! consecutive ordinals; parallel steps all share the `"--"` marker.

use crate::error::ValidationError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalMode {
    Sequential,
    Parallel,
}

/// A step's position marker: a positive ordinal for sequential steps, or
/// the `"--"` sentinel shared by all parallel steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMark {
    Ordinal(u32),
    Unordered,
}

const UNORDERED_SENTINEL: &str = "--";

impl Serialize for StepMark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StepMark::Ordinal(n) => serializer.serialize_u32(*n),
            StepMark::Unordered => serializer.serialize_str(UNORDERED_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for StepMark {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_u64()
                .map(|v| StepMark::Ordinal(v as u32))
                .ok_or_else(|| D::Error::custom("step ordinal must be a positive integer")),
            serde_json::Value::String(s) if s == UNORDERED_SENTINEL => Ok(StepMark::Unordered),
            other => Err(D::Error::custom(format!(
                "step must be an integer or \"--\", got {other}"
            ))),
        }
    }
}

/// One entry in a document's routing definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStep {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default, rename = "deptId")]
    pub dept_id: Option<String>,
    #[serde(default, rename = "roleId")]
    pub role_id: Option<String>,
    #[serde(rename = "approvalType")]
    pub mode: ApprovalMode,
    #[serde(default)]
    pub note: String,
    pub step: StepMark,
}

/// The ordered step list with the renumbering rules applied after every
/// structural change. Out-of-range indices are silent no-ops, the same
/// permissive contract as the schema tree operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApprovalFlow {
    steps: Vec<ApprovalStep>,
}

impl ApprovalFlow {
    pub fn new() -> Self {
        ApprovalFlow::default()
    }

    pub fn steps(&self) -> &[ApprovalStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Appends a new step, sequential by default, with an ordinal one
    /// greater than the count of existing sequential steps.
    pub fn add_step(&mut self) -> &mut ApprovalStep {
        let sequential_count = self
            .steps
            .iter()
            .filter(|s| s.mode != ApprovalMode::Parallel)
            .count() as u32;
        self.steps.push(ApprovalStep {
            user_id: None,
            dept_id: None,
            role_id: None,
            mode: ApprovalMode::Sequential,
            note: String::new(),
            step: StepMark::Ordinal(sequential_count + 1),
        });
        // just pushed, so the list is non-empty
        self.steps.last_mut().unwrap()
    }

    /// Switches a step's approval mode and renumbers the whole list.
    pub fn set_mode(&mut self, index: usize, mode: ApprovalMode) -> bool {
        let Some(step) = self.steps.get_mut(index) else {
            return false;
        };
        step.mode = mode;
        if mode == ApprovalMode::Parallel {
            step.step = StepMark::Unordered;
        }
        self.renumber();
        true
    }

    /// Walks the list in order, assigning consecutive ordinals starting at 1
    /// to sequential steps and the `"--"` marker to parallel ones.
    pub fn renumber(&mut self) {
        let mut next_ordinal = 1;
        for step in &mut self.steps {
            if step.mode == ApprovalMode::Parallel {
                step.step = StepMark::Unordered;
            } else {
                step.step = StepMark::Ordinal(next_ordinal);
                next_ordinal += 1;
            }
        }
    }

    /// Moves one step, then renumbers.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.steps.len() || to >= self.steps.len() {
            return false;
        }
        let step = self.steps.remove(from);
        self.steps.insert(to, step);
        self.renumber();
        true
    }

    /// Removes one step, then renumbers.
    pub fn remove_step(&mut self, index: usize) -> bool {
        if index >= self.steps.len() {
            return false;
        }
        self.steps.remove(index);
        self.renumber();
        true
    }

    /// The gate before a document can advance past approval configuration:
    /// the list must be non-empty and every step needs a selected user and
    /// role. Failures name the offending rows (1-based) for display.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.steps.is_empty() {
            return Err(ValidationError::EmptyFlow);
        }
        let incomplete: Vec<usize> = self
            .steps
            .iter()
            .enumerate()
            .filter(|(_, s)| s.user_id.is_none() || s.role_id.is_none())
            .map(|(i, _)| i + 1)
            .collect();
        if incomplete.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::IncompleteSteps(incomplete))
        }
    }
}
