//! Shared proptest generators for tick-core property tests.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::BTreeSet;
use tick_core::model::{Category, Priority, Subtask, SubtaskId, Task, TaskDraft, TaskId};
use tick_core::view::{Criteria, SortKey, StatusFilter};

pub fn ts(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .expect("generator timestamps stay in range")
}

pub fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Personal),
        Just(Category::Work),
        Just(Category::Shopping),
        Just(Category::Health),
        Just(Category::Study),
    ]
}

pub fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::High),
        Just(Priority::Medium),
        Just(Priority::Low),
    ]
}

pub fn arb_text() -> impl Strategy<Value = String> {
    "[a-z]{1,10}( [a-z]{1,8})?"
}

fn arb_subtasks() -> impl Strategy<Value = Vec<Subtask>> {
    prop::collection::vec((arb_text(), any::<bool>()), 0..4).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (text, completed))| Subtask {
                id: SubtaskId::from_millis(i64::try_from(i).expect("small") + 1),
                text,
                completed,
            })
            .collect()
    })
}

/// A task with the given id; created_at tracks the id so `created` sorts are
/// meaningful.
pub fn arb_task(id: i64) -> impl Strategy<Value = Task> {
    (
        arb_text(),
        any::<bool>(),
        arb_category(),
        arb_priority(),
        prop::option::of(0..1_000_000i64),
        arb_subtasks(),
    )
        .prop_map(
            move |(text, completed, category, priority, due, subtasks)| {
                let mut task = Task {
                    id: TaskId::from_millis(id),
                    text,
                    completed,
                    category,
                    priority,
                    due: due.map(ts),
                    reminder: None,
                    created_at: ts(id),
                    tags: BTreeSet::new(),
                    notes: String::new(),
                    subtasks,
                    progress: 0,
                };
                task.recompute_progress();
                task
            },
        )
}

/// Collections of up to 8 tasks with unique, increasing ids.
pub fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    (0usize..8).prop_flat_map(|len| {
        (0..len)
            .map(|i| arb_task(1_000 + i64::try_from(i).expect("small index")))
            .collect::<Vec<_>>()
    })
}

pub fn arb_status() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::All),
        Just(StatusFilter::Active),
        Just(StatusFilter::Completed),
    ]
}

pub fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Created),
        Just(SortKey::Due),
        Just(SortKey::Priority),
        Just(SortKey::Category),
    ]
}

pub fn arb_criteria() -> impl Strategy<Value = Criteria> {
    (
        prop_oneof![Just(String::new()), arb_text()],
        prop::option::of(arb_category()),
        prop::option::of(arb_priority()),
        arb_status(),
        arb_sort(),
    )
        .prop_map(|(search, category, priority, status, sort)| Criteria {
            search,
            category,
            priority,
            status,
            sort,
        })
}

/// A random mutating intent, resolved against the collection at apply time.
#[derive(Debug, Clone)]
pub enum OpSpec {
    Add(String),
    Update(usize, String),
    Delete(usize),
    Toggle(usize),
    AddSubtask(usize, String),
    ToggleSubtask(usize, usize),
    Clear,
}

pub fn arb_op() -> impl Strategy<Value = OpSpec> {
    prop_oneof![
        arb_text().prop_map(OpSpec::Add),
        (0..8usize, arb_text()).prop_map(|(i, t)| OpSpec::Update(i, t)),
        (0..8usize).prop_map(OpSpec::Delete),
        (0..8usize).prop_map(OpSpec::Toggle),
        (0..8usize, arb_text()).prop_map(|(i, t)| OpSpec::AddSubtask(i, t)),
        (0..8usize, 0..4usize).prop_map(|(i, s)| OpSpec::ToggleSubtask(i, s)),
        Just(OpSpec::Clear),
    ]
}

pub fn arb_ops() -> impl Strategy<Value = Vec<OpSpec>> {
    prop::collection::vec(arb_op(), 1..12)
}

/// Resolve an [`OpSpec`] into an operation outcome against `tasks`.
///
/// Indices wrap around the current collection, so most generated intents hit
/// a real target while out-of-range ones exercise the no-op paths.
#[must_use]
pub fn run_op(tasks: &[Task], op: &OpSpec, now_millis: i64) -> tick_core::ops::Outcome {
    use tick_core::ops;

    let task_id = |i: usize| -> Option<TaskId> {
        if tasks.is_empty() {
            None
        } else {
            Some(tasks[i % tasks.len()].id)
        }
    };

    match op {
        OpSpec::Add(text) => ops::add_task(tasks, TaskDraft::new(text.clone()), ts(now_millis)),
        OpSpec::Update(i, text) => task_id(*i).map_or(tick_core::ops::Outcome::Noop, |id| {
            let patch = tick_core::model::TaskPatch {
                text: Some(text.clone()),
                ..tick_core::model::TaskPatch::default()
            };
            ops::update_task(tasks, id, &patch)
        }),
        OpSpec::Delete(i) => task_id(*i)
            .map_or(tick_core::ops::Outcome::Noop, |id| ops::delete_task(tasks, id)),
        OpSpec::Toggle(i) => task_id(*i)
            .map_or(tick_core::ops::Outcome::Noop, |id| ops::toggle_complete(tasks, id)),
        OpSpec::AddSubtask(i, text) => task_id(*i).map_or(tick_core::ops::Outcome::Noop, |id| {
            ops::add_subtask(tasks, id, text, ts(now_millis))
        }),
        OpSpec::ToggleSubtask(i, s) => {
            let Some(id) = task_id(*i) else {
                return tick_core::ops::Outcome::Noop;
            };
            let parent = tasks
                .iter()
                .find(|t| t.id == id)
                .expect("task_id resolves to a member");
            if parent.subtasks.is_empty() {
                return tick_core::ops::Outcome::Noop;
            }
            let sub = parent.subtasks[s % parent.subtasks.len()].id;
            ops::toggle_subtask(tasks, id, sub)
        }
        OpSpec::Clear => ops::clear_all(tasks),
    }
}
