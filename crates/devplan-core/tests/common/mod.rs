#![allow(dead_code)]

use devplan_core::{parse, PlanDocument};

/// Two subtasks in one task; the first is done and gates the second.
pub const SMALL_PLAN: &str = "\
# Atlas - Development Plan

**Project Name**: Atlas
**Goal**: Build a tiny CLI

## Progress Tracking

### Phase 0: Foundation
- [x] 0.1.1: Initialize repository (Single Session)
- [ ] 0.1.2: Add CI (Single Session)

**Current**: Phase 0
**Next**: 0.1.2

---

## Phase 0: Foundation

**Goal**: Project skeleton

### Task 0.1: Repository Setup

**Git Strategy**:
- **Branch**: `feature/0-1-setup` (from `main`)

**Subtask 0.1.1: Initialize repository (Single Session)**

**Prerequisites**:
- None

**Deliverables**:
- [ ] Create `Cargo.toml`
- [ ] Add `.gitignore`
- [ ] Write README

**Success Criteria**:
- [ ] `cargo build` succeeds

**Completion Notes**:
- **Implementation**: (describe what was done)

---

**Subtask 0.1.2: Add CI (Single Session)**

**Prerequisites**:
- [x] 0.1.1: Initialize repository

**Deliverables**:
- [ ] Add workflow
- [ ] Run tests
- [ ] Run clippy

**Success Criteria**:
- [ ] CI is green

**Completion Notes**:
- **Implementation**: (describe what was done)

---
";

/// A second phase whose only subtask leaves a TODO in its code.
pub const TODO_PHASE: &str = "
## Phase 1: Core

### Task 1.1: Commands

**Subtask 1.1.1: Parse arguments (Single Session)**

**Prerequisites**:
- [ ] 0.1.2

**Deliverables**:
- [ ] Create `src/cli.rs`
- [ ] Define the argument struct
- [ ] Wire it into main

**Success Criteria**:
- [ ] `--help` prints usage

```rust
pub fn run() {
    // TODO: implement
}
```

---
";

pub fn plan_with_todo() -> String {
    format!("{SMALL_PLAN}{TODO_PHASE}")
}

pub fn parse_plan(text: &str) -> PlanDocument {
    parse(text).expect("fixture parses").plan
}
