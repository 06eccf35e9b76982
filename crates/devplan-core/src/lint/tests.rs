use super::*;

fn plan_with(body: &str) -> String {
    format!("## Phase 0: Foundation\n### Task 0.1: Setup\n**Subtask 0.1.1: Work (Single Session)**\n{body}")
}

fn kinds(report: &LintReport) -> Vec<FindingKind> {
    report.errors.iter().map(|finding| finding.kind).collect()
}

#[test]
fn test_todo_placeholder_is_incomplete_code() {
    let text = plan_with("\n```python\ndef main():\n    # TODO: implement\n    pass\n```\n");
    let report = lint(&text);

    assert!(!report.is_executable);
    assert_eq!(kinds(&report), vec![FindingKind::IncompleteCode]);
    let finding = &report.errors[0];
    assert_eq!(finding.subtask_id, SubtaskId::new(0, 1, 1));
    assert!(finding.message.contains("line 5"), "{}", finding.message);
    assert!(!finding.fix.is_empty());
    assert_eq!(report.stats.issues_found, 1);
}

#[test]
fn test_ellipsis_placeholders() {
    for body in [
        "```rust\nfn run() {\n    ...\n}\n```\n",
        "```js\n// ... rest of the handlers\n```\n",
        "```python\ndef f():\n    raise NotImplementedError\n```\n",
    ] {
        let report = lint(&plan_with(body));
        assert_eq!(kinds(&report), vec![FindingKind::IncompleteCode], "{body}");
    }

    // Output blocks may elide.
    let report = lint(&plan_with("```text\n...\n```\n"));
    assert!(report.is_executable);
}

#[test]
fn test_complete_subtask_is_executable() {
    let text = plan_with(
        "\nCreate `src/app.py` with:\n\n```python\nimport os\n\n\ndef home():\n    return os.getcwd()\n```\n",
    );
    let report = lint(&text);
    assert!(report.is_executable, "{:?}", report.errors);
    assert_eq!(report.stats.subtasks_checked, 1);
    assert_eq!(report.stats.code_blocks_checked, 1);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_add_to_instruction() {
    let report = lint(&plan_with("\nAdd the following route to the existing `app.py` file.\n"));
    assert_eq!(kinds(&report), vec![FindingKind::AddToInstruction]);

    let report = lint(&plan_with("\nAppend this block at the end of the file.\n"));
    assert_eq!(kinds(&report), vec![FindingKind::AddToInstruction]);
}

#[test]
fn test_ambiguous_modification() {
    let report = lint(&plan_with(
        "\nUpdate the `parse_config` function to accept a path.\n",
    ));
    assert_eq!(kinds(&report), vec![FindingKind::AmbiguousModification]);
    assert!(report.errors[0].message.contains("`parse_config`"));

    let report = lint(&plan_with(
        "\nUpdate the `parse_config` function to accept a path.\n\n```python\ndef parse_config(path):\n    return path\n```\n",
    ));
    assert!(report.is_executable, "{:?}", report.errors);
}

#[test]
fn test_missing_imports() {
    let report = lint(&plan_with(
        "```python\ndef load(p):\n    return json.loads(Path(p).read_text())\n```\n",
    ));
    assert_eq!(kinds(&report), vec![FindingKind::MissingImports]);
    let message = &report.errors[0].message;
    assert!(message.contains("`json`") && message.contains("`Path`"), "{message}");
    assert!(report.errors[0].fix.contains("from pathlib import Path"));

    let report = lint(&plan_with(
        "```rust\nuse std::collections::HashMap;\n\nfn index() -> HashMap<String, u32> {\n    HashMap::new()\n}\n```\n",
    ));
    assert!(report.is_executable, "{:?}", report.errors);

    let report = lint(&plan_with(
        "```rust\nfn shared() -> Arc<Mutex<u32>> {\n    Arc::new(Mutex::new(0))\n}\n```\n",
    ));
    assert_eq!(kinds(&report), vec![FindingKind::MissingImports]);
}

#[test]
fn test_pytest_fixture_reference() {
    let report = lint(&plan_with(
        "```python\ndef test_home(client, tmp_path):\n    assert client.get('/').status_code == 200\n```\n",
    ));
    assert_eq!(kinds(&report), vec![FindingKind::CrossSubtaskReference]);
    assert!(report.errors[0].message.contains("`client`"));
    assert!(!report.errors[0].message.contains("tmp_path"));

    let report = lint(&plan_with(
        "```python\nimport pytest\n\n\n@pytest.fixture\ndef client():\n    return object()\n\n\n@pytest.mark.parametrize(\"value\", [1, 2])\ndef test_home(client, value):\n    assert client is not None\n```\n",
    ));
    assert!(report.is_executable, "{:?}", report.errors);
}

#[test]
fn test_prose_pointer_to_other_subtask() {
    let report = lint(&plan_with("\nReuse the helper from subtask 0.0.9 here.\n"));
    assert_eq!(kinds(&report), vec![FindingKind::CrossSubtaskReference]);
    assert!(report.errors[0].fix.contains("subtask 0.0.9"));

    let report = lint(&plan_with("\nAs in subtask 0.1.1, keep it simple.\n"));
    assert!(report.is_executable);
}

#[test]
fn test_warnings() {
    let report = lint("No plan here.");
    assert!(report.is_executable);
    assert_eq!(report.warnings, vec!["No subtasks found; nothing to lint"]);

    let report = lint(&plan_with("```python\nprint('hi')\n"));
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("line 4 is never closed"));
}

#[test]
fn test_custom_registry() {
    let text = plan_with("```python\n# TODO\n```\n");
    let empty = Linter::new();
    assert!(empty.rule_kinds().is_empty());
    assert!(empty.lint(&text).is_executable);

    let mut only_placeholders = Linter::new();
    only_placeholders.register(Box::new(rules::IncompleteCode));
    assert_eq!(only_placeholders.rule_kinds(), vec![FindingKind::IncompleteCode]);
    assert!(!only_placeholders.lint(&text).is_executable);
}

#[test]
fn test_report_json_shape() {
    let report = lint(&plan_with("```python\n# TODO\n```\n"));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["isExecutable"], false);
    assert_eq!(json["errors"][0]["kind"], "incomplete_code");
    assert_eq!(json["errors"][0]["subtaskId"], "0.1.1");
    assert_eq!(json["stats"]["subtasksChecked"], 1);
    assert_eq!(json["stats"]["codeBlocksChecked"], 1);
}

#[test]
fn test_unreadable_outline_has_no_findings() {
    let report = lint("## Phase 99999999999: Big\n");
    assert!(report.errors.is_empty());
    assert!(report.is_executable);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("Could not outline plan:"));
}

#[test]
fn test_modification_needs_a_named_function() {
    let report = lint(&plan_with("\nUpdate the function to return a Result.\n"));
    assert!(report.is_executable, "{:?}", report.errors);

    let report = lint(&plan_with("\nChange the existing method so it logs errors.\n"));
    assert!(report.is_executable, "{:?}", report.errors);

    let report = lint(&plan_with("\nModify the function loadConfig to skip comments.\n"));
    assert_eq!(kinds(&report), vec![FindingKind::AmbiguousModification]);
    assert!(report.errors[0].message.contains("`loadConfig`"));

    let report = lint(&plan_with("\nRefactor the render() function.\n"));
    assert_eq!(kinds(&report), vec![FindingKind::AmbiguousModification]);
    assert!(report.errors[0].message.contains("`render`"));
}

#[test]
fn test_typing_fix_names_the_generic() {
    let report = lint(&plan_with(
        "```python\ndef names(rows) -> List[str]:\n    return [row.name for row in rows]\n```\n",
    ));
    assert_eq!(kinds(&report), vec![FindingKind::MissingImports]);
    assert!(report.errors[0].fix.contains("from typing import List"));
    assert!(!report.errors[0].fix.contains("..."));
}
