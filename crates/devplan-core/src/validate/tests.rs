use super::*;
use crate::parse;

fn subtask_block(id: &str, prerequisites: &str) -> String {
    format!(
        "**Subtask {id}: Step {id} (Single Session)**\n\n\
         **Prerequisites**:\n{prerequisites}\n\n\
         **Deliverables**:\n- [ ] One\n- [ ] Two\n- [ ] Three\n\n\
         **Success Criteria**:\n- [ ] Works\n\n"
    )
}

fn clean_plan() -> PlanDocument {
    let text = format!(
        "# Clean - Development Plan\n\n## Phase 0: Foundation\n\n### Task 0.1: Setup\n\n{}{}{}",
        subtask_block("0.1.1", "- None"),
        subtask_block("0.1.2", "- [ ] 0.1.1"),
        subtask_block("0.1.3", "- [ ] 0.1.1\n- [ ] 0.1.2"),
    );
    parse(&text).unwrap().plan
}

fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
    issues.iter().map(|issue| issue.kind).collect()
}

#[test]
fn test_clean_plan_has_no_issues() {
    let issues = validate(&clean_plan(), true);
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_shape_warnings() {
    let plan = parse(
        "## Phase 0: Setup\n### Task 0.1: T\n**Subtask 0.1.1: Do it**\n**Deliverables**:\n- [ ] Only one\n",
    )
    .unwrap()
    .plan;
    let issues = validate(&plan, false);
    assert_eq!(
        kinds(&issues),
        vec![
            IssueKind::FoundationPhase,
            IssueKind::SessionTitle,
            IssueKind::DeliverableCount,
            IssueKind::MissingSuccessCriteria,
        ]
    );
    assert!(issues.iter().all(|issue| issue.severity == Severity::Warning));
    assert_eq!(
        issues[2].message,
        "Subtask 0.1.1 has 1 deliverables (recommended: 3-7)"
    );
}

#[test]
fn test_empty_containers_are_errors() {
    let plan = parse("## Phase 0: Foundation\n### Task 0.1: Empty\n## Phase 1: Nothing\n")
        .unwrap()
        .plan;
    let issues = validate(&plan, false);
    assert_eq!(kinds(&issues), vec![IssueKind::EmptyTask, IssueKind::EmptyPhase]);
    assert!(issues.iter().all(Issue::is_error));
}

#[test]
fn test_missing_prerequisite() {
    let mut plan = clean_plan();
    plan.phases[0].tasks[0].subtasks[1]
        .prerequisites
        .insert(SubtaskId::new(4, 4, 4));

    let issues = validate(&plan, false);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::MissingPrerequisite);
    assert_eq!(issues[0].subtask_id, Some(SubtaskId::new(0, 1, 2)));
    assert_eq!(
        issues[0].message,
        "Subtask 0.1.2: prerequisite '4.4.4' does not exist in the plan"
    );
}

#[test]
fn test_one_synthetic_back_edge_gives_one_cycle() {
    let mut plan = clean_plan();
    plan.phases[0].tasks[0].subtasks[0]
        .prerequisites
        .insert(SubtaskId::new(0, 1, 3));

    let issues = validate(&plan, false);
    let cycles: Vec<_> = issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::DependencyCycle)
        .collect();
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].is_error());
    assert!(cycles[0]
        .message
        .starts_with("Circular dependency detected involving subtask"));
}

#[test]
fn test_strict_promotes_warnings() {
    let plan = parse("## Phase 0: Setup\n### Task 0.1: T\n**Subtask 0.1.1: Do it**\n")
        .unwrap()
        .plan;
    let lenient = ValidationReport::new(&plan, false);
    assert!(lenient.is_valid());
    assert_eq!(lenient.error_count(), 0);
    assert_eq!(lenient.warning_count(), 4);

    let strict = ValidationReport::new(&plan, true);
    assert!(!strict.is_valid());
    assert_eq!(strict.error_count(), 4);
    assert_eq!(strict.warning_count(), 0);
}

#[test]
fn test_dependency_graph_drops_unknown_prerequisites() {
    let mut plan = clean_plan();
    plan.phases[0].tasks[0].subtasks[0]
        .prerequisites
        .insert(SubtaskId::new(9, 9, 9));
    let graph = dependency_graph(&plan);
    assert_eq!(graph.len(), 3);
    assert!(graph[&SubtaskId::new(0, 1, 1)].is_empty());
    assert_eq!(graph[&SubtaskId::new(0, 1, 3)].len(), 2);
}
