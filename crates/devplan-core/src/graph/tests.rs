use super::*;
use crate::parse;

const PLAN: &str = "\
# Demo - Development Plan

## Progress Tracking
- [x] 0.1.1: Init
- [ ] 0.1.2: Configure
- [ ] 1.1.1: Build

## Phase 0: Foundation (2 days)

**Goal**: Bootstrap

### Task 0.1: Setup

**Subtask 0.1.1: Init**

**Success Criteria**:
- [ ] Repo exists

**Subtask 0.1.2: Configure**

**Prerequisites**:
- [ ] 0.1.1

## Phase 1: Core

### Task 1.1: Build

**Subtask 1.1.1: Build**

**Prerequisites**:
- [ ] 0.1.2
- [ ] 0.1.1
- [ ] 7.7.7
";

fn plan() -> PlanDocument {
    parse(PLAN).unwrap().plan
}

fn node<'a>(nodes: &'a [WorkflowNode], id: &str) -> &'a WorkflowNode {
    nodes.iter().find(|node| node.id == id).unwrap()
}

#[test]
fn test_one_node_per_entity() {
    let nodes = build_nodes(&plan(), &GraphOptions::default());
    let ids: Vec<_> = nodes.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "phase-0",
            "task-0.1",
            "subtask-0.1.1",
            "subtask-0.1.2",
            "phase-1",
            "task-1.1",
            "subtask-1.1.1",
        ]
    );
    assert_eq!(node(&nodes, "task-0.1").parent.as_deref(), Some("phase-0"));
    assert_eq!(
        node(&nodes, "subtask-0.1.2").parent.as_deref(),
        Some("task-0.1")
    );
    assert_eq!(node(&nodes, "phase-0").data.duration.as_deref(), Some("2 days"));
    assert_eq!(
        node(&nodes, "phase-0").data.description.as_deref(),
        Some("Bootstrap")
    );
}

#[test]
fn test_statuses_roll_up() {
    let nodes = build_nodes(&plan(), &GraphOptions::default());
    assert_eq!(node(&nodes, "phase-0").data.status, Status::InProgress);
    assert_eq!(node(&nodes, "task-0.1").data.status, Status::InProgress);
    assert_eq!(node(&nodes, "subtask-0.1.1").data.status, Status::Completed);
    assert_eq!(node(&nodes, "subtask-0.1.2").data.status, Status::Pending);
    assert_eq!(node(&nodes, "phase-1").data.status, Status::Pending);
}

#[test]
fn test_dependency_edges() {
    let edges = build_edges(&plan(), &GraphOptions::default());
    let dependencies: Vec<_> = edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Dependency)
        .collect();

    // 7.7.7 does not exist, so 1.1.1 only gets two incoming edges.
    assert_eq!(dependencies.len(), 3);
    let first = dependencies[0];
    assert_eq!(first.id, "dep-0.1.1-0.1.2");
    assert_eq!(first.source, "subtask-0.1.1");
    assert_eq!(first.target, "subtask-0.1.2");
    assert!(!first.animated);
    assert_eq!(first.style.stroke, MET_DEPENDENCY_STROKE);

    let open = dependencies
        .iter()
        .find(|edge| edge.id == "dep-0.1.2-1.1.1")
        .unwrap();
    assert!(open.animated);
}

#[test]
fn test_sequence_edges() {
    let edges = build_edges(&plan(), &GraphOptions::default());
    let sequence: Vec<_> = edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Sequence)
        .collect();
    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence[0].id, "seq-phase-0-phase-1");
    assert_eq!(sequence[0].style.stroke_dasharray.as_deref(), Some("5,5"));
}

#[test]
fn test_excluding_completed_subtasks() {
    let plan = plan();
    let options = GraphOptions::default().with_include_completed(false);
    let all = build_nodes(&plan, &GraphOptions::default());
    let filtered = build_nodes(&plan, &options);

    assert_eq!(filtered.len(), all.len() - 1);
    assert!(filtered.iter().all(|node| node.id != "subtask-0.1.1"));
    // Ancestors keep the status computed from every descendant.
    assert_eq!(node(&filtered, "task-0.1").data.status, Status::InProgress);

    let edges = build_edges(&plan, &options);
    assert!(edges
        .iter()
        .all(|edge| edge.source != "subtask-0.1.1" && edge.target != "subtask-0.1.1"));
    assert_eq!(
        edges
            .iter()
            .filter(|edge| edge.kind == EdgeKind::Dependency)
            .count(),
        1
    );
}

#[test]
fn test_success_criteria_opt_in() {
    let plan = plan();
    let nodes = build_nodes(&plan, &GraphOptions::default());
    assert!(node(&nodes, "subtask-0.1.1").data.success_criteria.is_none());

    let nodes = build_nodes(&plan, &GraphOptions::default().with_success_criteria(true));
    assert_eq!(
        node(&nodes, "subtask-0.1.1").data.success_criteria,
        Some(vec!["Repo exists".to_string()])
    );
}

#[test]
fn test_json_field_names() {
    let plan = plan();
    let nodes = build_nodes(&plan, &GraphOptions::default());
    let json = serde_json::to_value(node(&nodes, "subtask-0.1.2")).unwrap();
    assert_eq!(json["type"], "subtask");
    assert_eq!(json["parentNode"], "task-0.1");
    assert_eq!(json["data"]["planId"], "0.1.2");
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["position"]["x"], 0);

    let edges = build_edges(&plan, &GraphOptions::default());
    let json = serde_json::to_value(&edges[0]).unwrap();
    assert_eq!(json["type"], "dependency");
    assert!(json.get("animated").is_none());
}
