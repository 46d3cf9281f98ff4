use codespan_reporting::diagnostic::{LabelStyle, Severity};

use flowscript::decl::{OutputNode, ProcessNode, WorkflowNode};
use flowscript::{OutputBlockNode, ScriptNode, ValidationError};

#[test]
fn well_formed_script_finalizes() {
    let mut script = ScriptNode::new(0);
    script.set_shebang("#!/usr/bin/env nextflow");
    let entry = script.add_workflow(WorkflowNode::unnamed(10..40));
    script.set_entry(entry);
    script.set_outputs(OutputBlockNode::new(vec![OutputNode::new("x", 50..51)], 42..60));

    let script = script.finalize().expect("finalize failed");
    assert_eq!(script.entry().and_then(|w| w.name.as_deref()), None);
    assert_eq!(script.declarations().len(), 2);

    // Round-trip back to a builder.
    let mut node = script.into_inner();
    node.add_process(ProcessNode::new("LATE", 0..0));
    assert!(node.finalize().is_ok());
}

#[test]
fn empty_script_finalizes() {
    assert!(ScriptNode::new(0).validate().is_empty());
}

#[test]
fn repeated_entry_keeps_last_and_is_reported() {
    let mut script = ScriptNode::new(0);
    let first = script.add_workflow(WorkflowNode::unnamed(0..10));
    let second = script.add_workflow(WorkflowNode::unnamed(20..30));
    script.set_entry(first);
    script.set_entry(second);

    assert_eq!(script.entry_id(), Some(second));
    // The first unnamed workflow is now an ordinary workflow in the view.
    let spans: Vec<_> = script.declarations().iter().map(|d| d.span().clone()).collect();
    assert_eq!(spans, [20..30, 0..10]);

    let errors = script.finalize().unwrap_err();
    assert_eq!(
        errors,
        [ValidationError::DuplicateEntry {
            first: Some(0..10),
            second: Some(20..30),
        }]
    );
}

#[test]
fn repeated_outputs_keep_last_and_are_reported() {
    let mut script = ScriptNode::new(0);
    script.set_outputs(OutputBlockNode::new(vec![OutputNode::new("a", 1..2)], 0..5));
    script.set_outputs(OutputBlockNode::new(vec![OutputNode::new("b", 11..12)], 10..15));

    let names: Vec<_> = script
        .outputs()
        .map(|o| o.declarations().iter().map(|d| d.name.clone()).collect())
        .unwrap_or_else(Vec::new);
    assert_eq!(names, ["b"]);
    assert_eq!(
        script.validate(),
        [ValidationError::DuplicateOutputs {
            first: 0..5,
            second: 10..15,
        }]
    );
}

#[test]
fn repeated_shebang_is_reported() {
    let mut script = ScriptNode::new(0);
    script.set_shebang("#!/bin/a");
    script.set_shebang("#!/bin/b");
    assert_eq!(script.shebang(), Some("#!/bin/b"));

    let errors = script.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "shebang defined more than once: `#!/bin/a` replaced by `#!/bin/b`"
    );
}

#[test]
fn entry_from_another_script_is_not_a_member() {
    let mut other = ScriptNode::new(0);
    other.add_workflow(WorkflowNode::unnamed(0..0));
    other.add_workflow(WorkflowNode::unnamed(0..0));
    let foreign = other.add_workflow(WorkflowNode::unnamed(0..0));

    let mut script = ScriptNode::new(0);
    script.add_workflow(WorkflowNode::named("ONLY", 0..0));
    script.set_entry(foreign);

    // Unresolvable entries are left out of the view; every workflow still appears once.
    assert!(script.entry().is_none());
    let headers: Vec<_> = script.declarations().iter().map(|d| d.to_string()).collect();
    assert_eq!(headers, ["workflow ONLY"]);

    assert_eq!(
        script.validate(),
        [ValidationError::ForeignEntry { index: 2 }]
    );
}

#[test]
fn in_range_entry_from_another_script_is_rejected() {
    let mut other = ScriptNode::new(0);
    let foreign = other.add_workflow(WorkflowNode::unnamed(0..0));

    let mut script = ScriptNode::new(0);
    script.add_workflow(WorkflowNode::unnamed(5..6));
    script.add_workflow(WorkflowNode::named("B", 7..8));
    script.set_entry(foreign);

    assert!(!script.owns(foreign));
    assert!(script.workflow(foreign).is_none());
    assert!(script.entry().is_none());
    let headers: Vec<_> = script.declarations().iter().map(|d| d.to_string()).collect();
    assert_eq!(headers, ["workflow", "workflow B"]);

    let errors = script.finalize().unwrap_err();
    assert_eq!(errors, [ValidationError::ForeignEntry { index: 0 }]);
    assert_eq!(
        errors[0].to_string(),
        "entry workflow #0 was issued by another script"
    );
}

#[test]
fn cloned_script_accepts_ids_from_the_original() {
    let mut script = ScriptNode::new(0);
    let entry = script.add_workflow(WorkflowNode::unnamed(0..4));
    let mut copy = script.clone();
    copy.set_entry(entry);

    assert!(copy.owns(entry));
    assert_eq!(copy.entry().map(|w| w.span.clone()), Some(0..4));
    assert!(copy.finalize().is_ok());
}

#[test]
fn named_entry_is_reported() {
    let mut script = ScriptNode::new(0);
    let main = script.add_workflow(WorkflowNode::named("MAIN", 3..17));
    script.set_entry(main);

    let errors = script.finalize().unwrap_err();
    assert_eq!(
        errors,
        [ValidationError::EntryIsNamed {
            name: "MAIN".into(),
            span: 3..17,
        }]
    );
    assert_eq!(errors[0].span(), Some(&(3..17)));
}

#[test]
fn errors_are_reported_in_order_found() {
    let mut script = ScriptNode::new(0);
    script.set_shebang("a");
    let named = script.add_workflow(WorkflowNode::named("W", 0..1));
    script.set_outputs(OutputBlockNode::new(Vec::new(), 2..3));
    script.set_shebang("b");
    script.set_outputs(OutputBlockNode::new(Vec::new(), 4..5));
    script.set_entry(named);

    let errors = script.validate();
    assert!(matches!(errors[0], ValidationError::DuplicateShebang { .. }));
    assert!(matches!(errors[1], ValidationError::DuplicateOutputs { .. }));
    assert!(matches!(errors[2], ValidationError::EntryIsNamed { .. }));
    assert_eq!(errors.len(), 3);
}

#[test]
fn duplicate_outputs_diagnostic_points_at_both_blocks() {
    let error = ValidationError::DuplicateOutputs {
        first: 0..5,
        second: 10..15,
    };
    let diagnostic = error.to_diagnostic(3);

    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.message, "output block defined more than once");
    assert_eq!(diagnostic.labels.len(), 2);
    assert_eq!(diagnostic.labels[0].style, LabelStyle::Primary);
    assert_eq!(diagnostic.labels[0].range, 10..15);
    assert_eq!(diagnostic.labels[1].style, LabelStyle::Secondary);
    assert_eq!(diagnostic.labels[1].message, "first defined here");
    assert!(diagnostic.labels.iter().all(|l| l.file_id == 3));
    assert!(!diagnostic.notes.is_empty());
}

#[test]
fn unlocated_errors_have_no_labels() {
    let error = ValidationError::EntryNotInWorkflows { index: 4, len: 2 };
    let diagnostic = error.to_diagnostic(0);
    assert!(diagnostic.labels.is_empty());
    assert_eq!(
        diagnostic.message,
        "entry workflow #4 is not one of the script's 2 workflow(s)"
    );
}
