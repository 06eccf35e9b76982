//! Built-in lint rules.

use std::{
    collections::{BTreeSet, HashSet},
    sync::LazyLock,
};

use regex::Regex;

use super::{FindingKind, LintFinding, LintRule, SubtaskContext};
use crate::extract::CodeBlock;

/// Every built-in rule, in reporting order.
pub fn builtin() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(IncompleteCode),
        Box::new(AddToInstruction),
        Box::new(AmbiguousModification),
        Box::new(MissingImports),
        Box::new(CrossSubtaskReference),
    ]
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("lint pattern")
}

fn has_word(line: &str, word: &str) -> bool {
    line.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|token| token == word)
}

static PLACEHOLDERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?:TODO|FIXME|TBD)\b",
        r"^\s*(?:(?:#|//|--|/\*)\s*)?(?:\.\.\.|…)\s*(?:\*/)?\s*$",
        r"(?:#|//|/\*)\s*(?:\.\.\.|…)",
        r"(?i)\byour (?:code|implementation|logic) (?:goes )?here\b",
        r"(?i)\bimplement (?:this|me|here)\b",
        r"(?i)\b(?:rest|remainder) of (?:the )?(?:code|file|implementation|function)\b",
        r"(?i)\bexisting code\b",
        r"\b(?:todo|unimplemented)!\(",
        r"\braise NotImplementedError\b",
    ]
    .into_iter()
    .map(regex)
    .collect()
});

/// Placeholder tokens inside a code block.
pub struct IncompleteCode;

impl LintRule for IncompleteCode {
    fn kind(&self) -> FindingKind {
        FindingKind::IncompleteCode
    }

    fn check(&self, subtask: &SubtaskContext<'_>) -> Vec<LintFinding> {
        subtask
            .code_blocks
            .iter()
            .filter(|block| !block.is_output())
            .filter_map(|block| {
                let placeholder = block
                    .content
                    .lines()
                    .find(|line| PLACEHOLDERS.iter().any(|pattern| pattern.is_match(line)))?;
                Some(subtask.finding(
                    self.kind(),
                    format!(
                        "Code block at line {} contains a placeholder: `{}`",
                        subtask.line_of(block),
                        placeholder.trim()
                    ),
                    "Replace the placeholder with the complete code so the block can be used as written",
                ))
            })
            .collect()
    }
}

static ADD_TO: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:add|append|insert)\b[^.\n]{0,60}?\b(?:to|into|in)\s+(?:the\s+)?(?:existing|current)\b",
        r"(?i)\b(?:add|append|insert)\b[^.\n]{0,60}?\b(?:to|into)\s+(?:the\s+)?`[^`\n]+\.[A-Za-z0-9]+`",
        r"(?i)\b(?:at|to) the (?:end|bottom|top) of\s+(?:the\s+)?(?:existing\s+)?(?:file|module|class|`[^`\n]+`)",
        r"(?i)\bafter the existing\b",
    ]
    .into_iter()
    .map(regex)
    .collect()
});

/// Prose that asks to splice code into a file instead of showing it whole.
pub struct AddToInstruction;

impl LintRule for AddToInstruction {
    fn kind(&self) -> FindingKind {
        FindingKind::AddToInstruction
    }

    fn check(&self, subtask: &SubtaskContext<'_>) -> Vec<LintFinding> {
        let instruction = ADD_TO
            .iter()
            .find_map(|pattern| pattern.find(&subtask.prose));
        match instruction {
            Some(found) => vec![subtask.finding(
                self.kind(),
                format!(
                    "Instruction edits an existing file in place: \"{}\"",
                    found.as_str().trim()
                ),
                "Show the complete final content of the file in a code block instead of describing what to add",
            )],
            None => Vec::new(),
        }
    }
}

/// Group 1 is a back-ticked name, group 2 a bare name and group 3 the `()`
/// after a bare name.
static MODIFY_TARGET: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:modify|update|change|edit|refactor|extend|adjust)\s+(?:the\s+)?(?:existing\s+)?(?:method|function)\s+(?:`([A-Za-z_][A-Za-z0-9_.]*)(?:\(\))?`|([A-Za-z_][A-Za-z0-9_.]*)(\(\))?)",
        r"(?i)\b(?:modify|update|change|edit|refactor|extend|adjust)\s+(?:the\s+)?(?:existing\s+)?(?:`([A-Za-z_][A-Za-z0-9_.]*)(?:\(\))?`|([A-Za-z_][A-Za-z0-9_.]*)(\(\))?)\s+(?:method|function)\b",
    ]
    .into_iter()
    .map(regex)
    .collect()
});

/// Whether a bare word reads as code rather than English: `snake_case`,
/// `module.path` or `camelCase`.
fn is_identifier_shaped(word: &str) -> bool {
    word.contains(['_', '.']) || word.chars().skip(1).any(char::is_uppercase)
}

/// Function name a modification instruction points at, if it names one.
fn modified_name<'p>(caps: &regex::Captures<'p>) -> Option<&'p str> {
    let name = match (caps.get(1), caps.get(2)) {
        (Some(quoted), _) => quoted.as_str(),
        (None, Some(bare)) if caps.get(3).is_some() || is_identifier_shaped(bare.as_str()) => {
            bare.as_str()
        }
        _ => return None,
    };
    let name = name.trim_end_matches('.');
    let name = name.rsplit('.').next().unwrap_or(name);
    (!name.is_empty()).then_some(name)
}

fn defines(block: &CodeBlock<'_>, name: &str) -> bool {
    let escaped = regex::escape(name);
    Regex::new(&format!(
        r"\b(?:def|fn|function|func|class|struct)\s+{escaped}\b|\b{escaped}\s*\([^)\n]*\)\s*\{{"
    ))
    .is_ok_and(|definition| definition.is_match(block.content))
}

/// Prose that modifies a named function without showing its new definition.
pub struct AmbiguousModification;

impl LintRule for AmbiguousModification {
    fn kind(&self) -> FindingKind {
        FindingKind::AmbiguousModification
    }

    fn check(&self, subtask: &SubtaskContext<'_>) -> Vec<LintFinding> {
        let mut names = BTreeSet::new();
        for pattern in &*MODIFY_TARGET {
            for caps in pattern.captures_iter(&subtask.prose) {
                if let Some(name) = modified_name(&caps) {
                    names.insert(name.to_string());
                }
            }
        }

        names
            .into_iter()
            .filter(|name| !subtask.code_blocks.iter().any(|block| defines(block, name)))
            .map(|name| {
                subtask.finding(
                    self.kind(),
                    format!("Instruction modifies `{name}` but no code block defines it"),
                    format!("Include the complete new definition of `{name}` in a code block"),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Python,
    Rust,
    JavaScript,
}

impl Language {
    fn of(block: &CodeBlock<'_>) -> Option<Self> {
        match block.language.as_deref()? {
            "python" | "py" | "python3" => Some(Language::Python),
            "rust" | "rs" => Some(Language::Rust),
            "javascript" | "js" | "typescript" | "ts" | "node" | "jsx" | "tsx" => {
                Some(Language::JavaScript)
            }
            _ => None,
        }
    }

    /// Whether `line` is an import statement.
    fn is_import(&self, line: &str) -> bool {
        let line = line.trim_start();
        match self {
            Language::Python => line.starts_with("import ") || line.starts_with("from "),
            Language::Rust => line.starts_with("use ") || line.starts_with("pub use "),
            Language::JavaScript => line.starts_with("import ") || line.contains("require("),
        }
    }
}

/// A well-known symbol and how to import it.
struct KnownSymbol {
    language: Language,
    symbol: &'static str,
    usage: Regex,
    import: String,
}

fn module_usage(module: &str) -> Regex {
    regex(&format!(r"(?m)(?:^|[^.\w]){module}\."))
}

fn type_usage(name: &str) -> Regex {
    regex(&format!(r"\b{name}\b"))
}

static KNOWN_SYMBOLS: LazyLock<Vec<KnownSymbol>> = LazyLock::new(|| {
    let mut symbols = Vec::new();
    let mut add = |language: Language, symbol: &'static str, usage: Regex, import: &str| {
        symbols.push(KnownSymbol {
            language,
            symbol,
            usage,
            import: import.to_string(),
        })
    };

    for (module, import) in [
        ("os", "import os"),
        ("sys", "import sys"),
        ("json", "import json"),
        ("re", "import re"),
        ("subprocess", "import subprocess"),
        ("shutil", "import shutil"),
        ("logging", "import logging"),
        ("time", "import time"),
        ("datetime", "import datetime"),
        ("random", "import random"),
        ("math", "import math"),
        ("asyncio", "import asyncio"),
        ("argparse", "import argparse"),
        ("tempfile", "import tempfile"),
        ("uuid", "import uuid"),
        ("hashlib", "import hashlib"),
        ("csv", "import csv"),
        ("itertools", "import itertools"),
        ("functools", "import functools"),
        ("collections", "import collections"),
        ("pytest", "import pytest"),
    ] {
        add(Language::Python, module, module_usage(module), import);
    }
    add(
        Language::Python,
        "Path",
        regex(r"\bPath\("),
        "from pathlib import Path",
    );
    add(
        Language::Python,
        "dataclass",
        regex(r"(?m)^\s*@dataclass\b"),
        "from dataclasses import dataclass",
    );
    for generic in ["List", "Dict", "Optional", "Tuple", "Union", "Callable", "Set"] {
        add(
            Language::Python,
            generic,
            regex(&format!(r"\b{generic}\[")),
            &format!("from typing import {generic}"),
        );
    }
    add(
        Language::Python,
        "Any",
        regex(r"(?:->|:|\[|,)\s*Any\b"),
        "from typing import Any",
    );

    for (name, import) in [
        ("HashMap", "use std::collections::HashMap;"),
        ("HashSet", "use std::collections::HashSet;"),
        ("BTreeMap", "use std::collections::BTreeMap;"),
        ("BTreeSet", "use std::collections::BTreeSet;"),
        ("VecDeque", "use std::collections::VecDeque;"),
        ("Arc", "use std::sync::Arc;"),
        ("Mutex", "use std::sync::Mutex;"),
        ("RwLock", "use std::sync::RwLock;"),
        ("Rc", "use std::rc::Rc;"),
        ("RefCell", "use std::cell::RefCell;"),
        ("PathBuf", "use std::path::PathBuf;"),
        ("Path", "use std::path::Path;"),
    ] {
        add(Language::Rust, name, type_usage(name), import);
    }
    add(
        Language::Rust,
        "fs",
        regex(r"(?m)(?:^|[^:\w])fs::"),
        "use std::fs;",
    );

    add(
        Language::JavaScript,
        "fs",
        module_usage("fs"),
        "import fs from 'node:fs';",
    );
    add(
        Language::JavaScript,
        "path",
        module_usage("path"),
        "import path from 'node:path';",
    );

    symbols
});

fn imports(language: Language, content: &str, symbol: &str) -> bool {
    content
        .lines()
        .any(|line| language.is_import(line) && has_word(line, symbol))
        || (language == Language::Rust && content.contains(&format!("::{symbol}")))
}

/// Well-known modules and types used without an import in the same block.
pub struct MissingImports;

impl LintRule for MissingImports {
    fn kind(&self) -> FindingKind {
        FindingKind::MissingImports
    }

    fn check(&self, subtask: &SubtaskContext<'_>) -> Vec<LintFinding> {
        let mut findings = Vec::new();
        for block in &subtask.code_blocks {
            let Some(language) = Language::of(block) else {
                continue;
            };

            let mut seen = HashSet::new();
            let missing: Vec<&KnownSymbol> = KNOWN_SYMBOLS
                .iter()
                .filter(|known| known.language == language)
                .filter(|known| known.usage.is_match(block.content))
                .filter(|known| !imports(language, block.content, known.symbol))
                .filter(|known| seen.insert(known.symbol))
                .collect();
            if missing.is_empty() {
                continue;
            }

            let symbols: Vec<String> = missing
                .iter()
                .map(|known| format!("`{}`", known.symbol))
                .collect();
            let mut statements: Vec<&str> = missing
                .iter()
                .map(|known| known.import.as_str())
                .collect();
            statements.dedup();
            findings.push(subtask.finding(
                self.kind(),
                format!(
                    "Code block at line {} uses {} without importing it",
                    subtask.line_of(block),
                    symbols.join(", ")
                ),
                format!(
                    "Add the imports at the top of the code block: {}",
                    statements.join("; ")
                ),
            ));
        }
        findings
    }
}

/// Fixtures pytest provides without a conftest.
const PYTEST_BUILTIN_FIXTURES: &[&str] = &[
    "self",
    "cls",
    "cache",
    "capfd",
    "capfdbinary",
    "caplog",
    "capsys",
    "capsysbinary",
    "doctest_namespace",
    "monkeypatch",
    "pytestconfig",
    "pytester",
    "record_property",
    "record_testsuite_property",
    "record_xml_attribute",
    "recwarn",
    "request",
    "testdir",
    "tmp_path",
    "tmp_path_factory",
    "tmpdir",
    "tmpdir_factory",
];

static TEST_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)^\s*(?:async\s+)?def\s+(test_\w*)\s*\(([^)]*)\)"));

static PARAMETRIZE: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"parametrize\(\s*["']([^"']+)["']"#));

static FUNCTION_DEF: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)^\s*(?:async\s+)?def\s+(\w+)\s*\("));

static SUBTASK_POINTER: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:from|in|see|reuse|as in|same as)\s+(?:the\s+)?subtask\s+(\d+\.\d+\.\d+)",
        r"(?i)\b(?:code|function|class|fixture|implementation|helper)s?\s+(?:from|in|defined in|created in|written in)\s+(\d+\.\d+\.\d+)",
        r"(?i)\b(?:from|in) the previous subtask\b()",
    ]
    .into_iter()
    .map(regex)
    .collect()
});

fn undefined_fixtures(block: &CodeBlock<'_>) -> Vec<(String, Vec<String>)> {
    let defined: HashSet<&str> = FUNCTION_DEF
        .captures_iter(block.content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    let parametrized: HashSet<&str> = PARAMETRIZE
        .captures_iter(block.content)
        .filter_map(|caps| caps.get(1))
        .flat_map(|m| m.as_str().split(','))
        .map(str::trim)
        .collect();

    TEST_FUNCTION
        .captures_iter(block.content)
        .filter_map(|caps| {
            let test = caps.get(1)?.as_str();
            let params = caps.get(2)?.as_str();
            let missing: Vec<String> = params
                .split(',')
                .filter_map(|param| {
                    let name = param.split([':', '=']).next()?.trim();
                    let name = name.trim_start_matches('*');
                    (!name.is_empty()
                        && !PYTEST_BUILTIN_FIXTURES.contains(&name)
                        && !parametrized.contains(name)
                        && !defined.contains(name))
                    .then(|| name.to_string())
                })
                .collect();
            (!missing.is_empty()).then(|| (test.to_string(), missing))
        })
        .collect()
}

/// Code that depends on fixtures or code from somewhere else.
pub struct CrossSubtaskReference;

impl LintRule for CrossSubtaskReference {
    fn kind(&self) -> FindingKind {
        FindingKind::CrossSubtaskReference
    }

    fn check(&self, subtask: &SubtaskContext<'_>) -> Vec<LintFinding> {
        let mut findings = Vec::new();

        for block in &subtask.code_blocks {
            if Language::of(block) != Some(Language::Python) {
                continue;
            }
            for (test, fixtures) in undefined_fixtures(block) {
                let names = fixtures
                    .iter()
                    .map(|name| format!("`{name}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                findings.push(subtask.finding(
                    self.kind(),
                    format!(
                        "Test `{test}` at line {} uses fixtures not defined in its code block: {names}",
                        subtask.line_of(block)
                    ),
                    format!("Define {names} in the same code block, or include the conftest.py that provides them"),
                ));
            }
        }

        let own_id = subtask.id.to_string();
        let pointer = SUBTASK_POINTER.iter().find_map(|pattern| {
            pattern.captures_iter(&subtask.prose).find_map(|caps| {
                let phrase = caps.get(0)?.as_str();
                let target = caps.get(1).map_or("", |m| m.as_str());
                (target != own_id).then(|| (phrase.to_string(), target.to_string()))
            })
        });
        if let Some((phrase, target)) = pointer {
            let source = if target.is_empty() {
                "the previous subtask".to_string()
            } else {
                format!("subtask {target}")
            };
            findings.push(subtask.finding(
                self.kind(),
                format!("Instruction points at code from another subtask: \"{}\"", phrase.trim()),
                format!("Copy the code this subtask needs from {source} into this subtask"),
            ));
        }

        findings
    }
}
