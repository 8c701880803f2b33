//! Tests for the approval-step sequencer.
mod common;
use common::*;
use katachi::prelude::*;

#[test]
fn test_add_step_defaults() {
    let mut flow = ApprovalFlow::new();
    flow.add_step();
    flow.add_step();
    assert_eq!(flow.steps()[0].mode, ApprovalMode::Sequential);
    assert_eq!(flow.steps()[0].step, StepMark::Ordinal(1));
    assert_eq!(flow.steps()[1].step, StepMark::Ordinal(2));
}

#[test]
fn test_add_step_skips_parallel_in_count() {
    let mut flow = ApprovalFlow::new();
    flow.add_step();
    flow.set_mode(0, ApprovalMode::Parallel);
    // One existing step, but zero sequential ones: the new ordinal is 1.
    flow.add_step();
    assert_eq!(flow.steps()[1].step, StepMark::Ordinal(1));
}

#[test]
fn test_renumber_mixed_modes() {
    let flow = create_complete_flow(&[
        ApprovalMode::Sequential,
        ApprovalMode::Parallel,
        ApprovalMode::Sequential,
    ]);
    let marks: Vec<_> = flow.steps().iter().map(|s| s.step).collect();
    assert_eq!(
        marks,
        [
            StepMark::Ordinal(1),
            StepMark::Unordered,
            StepMark::Ordinal(2)
        ]
    );
}

#[test]
fn test_remove_then_renumber() {
    let mut flow = create_complete_flow(&[
        ApprovalMode::Sequential,
        ApprovalMode::Parallel,
        ApprovalMode::Sequential,
    ]);
    assert!(flow.remove_step(0));
    let marks: Vec<_> = flow.steps().iter().map(|s| s.step).collect();
    assert_eq!(marks, [StepMark::Unordered, StepMark::Ordinal(1)]);

    assert!(!flow.remove_step(9));
    assert_eq!(flow.len(), 2);
}

#[test]
fn test_reorder_then_renumber() {
    let mut flow = create_complete_flow(&[
        ApprovalMode::Sequential,
        ApprovalMode::Sequential,
        ApprovalMode::Parallel,
    ]);
    assert!(flow.reorder(2, 0));
    let marks: Vec<_> = flow.steps().iter().map(|s| s.step).collect();
    assert_eq!(
        marks,
        [
            StepMark::Unordered,
            StepMark::Ordinal(1),
            StepMark::Ordinal(2)
        ]
    );
    assert!(!flow.reorder(0, 9));
}

#[test]
fn test_switch_back_to_sequential_renumbers() {
    let mut flow = create_complete_flow(&[ApprovalMode::Sequential, ApprovalMode::Parallel]);
    flow.set_mode(1, ApprovalMode::Sequential);
    let marks: Vec<_> = flow.steps().iter().map(|s| s.step).collect();
    assert_eq!(marks, [StepMark::Ordinal(1), StepMark::Ordinal(2)]);
}

#[test]
fn test_validate_empty_flow() {
    let flow = ApprovalFlow::new();
    assert_eq!(flow.validate(), Err(ValidationError::EmptyFlow));
}

#[test]
fn test_validate_incomplete_steps_named_by_row() {
    let mut flow = ApprovalFlow::new();
    let step = flow.add_step();
    step.user_id = Some("u1".to_string());
    step.role_id = Some("r1".to_string());
    flow.add_step(); // row 2: nothing selected
    let step = flow.add_step(); // row 3: role missing
    step.user_id = Some("u3".to_string());

    let err = flow.validate().unwrap_err();
    assert_eq!(err, ValidationError::IncompleteSteps(vec![2, 3]));
    assert!(err.to_string().contains("user or role"));
}

#[test]
fn test_validate_complete_flow_passes() {
    let flow = create_complete_flow(&[ApprovalMode::Sequential, ApprovalMode::Parallel]);
    assert!(flow.validate().is_ok());
}

#[test]
fn test_step_serialization_shape() {
    let flow = create_complete_flow(&[ApprovalMode::Sequential, ApprovalMode::Parallel]);
    let json = serde_json::to_value(&flow).unwrap();
    assert_eq!(json[0]["approvalType"], "sequential");
    assert_eq!(json[0]["step"], 1);
    assert_eq!(json[1]["approvalType"], "parallel");
    assert_eq!(json[1]["step"], "--");
    assert_eq!(json[0]["userId"], "user-0");

    let reloaded: ApprovalFlow = serde_json::from_value(json).unwrap();
    assert_eq!(reloaded, flow);
}
