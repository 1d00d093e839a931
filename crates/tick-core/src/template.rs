//! Built-in quick templates: one command expands to a batch of tasks.

use crate::model::{Category, Priority, Task, TaskDraft, TaskId};
use crate::ops::{ActionLabel, Applied, Outcome};
use chrono::{DateTime, Utc};

/// A named batch of task drafts.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    entries: &'static [(&'static str, Category, Priority)],
}

const DAILY_ROUTINE: Template = Template {
    name: "daily-routine",
    description: "Start your day right",
    entries: &[
        ("Morning workout", Category::Health, Priority::High),
        ("Plan the day", Category::Personal, Priority::High),
        ("Inbox to zero", Category::Work, Priority::Medium),
        ("Evening review", Category::Personal, Priority::Low),
    ],
};

const SHOPPING: Template = Template {
    name: "shopping",
    description: "Grocery and shopping list",
    entries: &[
        ("Write shopping list", Category::Shopping, Priority::Medium),
        ("Check pantry staples", Category::Shopping, Priority::Low),
        ("Grocery run", Category::Shopping, Priority::Medium),
    ],
};

const MEETING: Template = Template {
    name: "meeting",
    description: "Meeting preparation tasks",
    entries: &[
        ("Draft the agenda", Category::Work, Priority::High),
        ("Share pre-read", Category::Work, Priority::Medium),
        ("Book the room", Category::Work, Priority::Low),
        ("Send follow-up notes", Category::Work, Priority::Medium),
    ],
};

const STUDY_SESSION: Template = Template {
    name: "study",
    description: "Study and learning tasks",
    entries: &[
        ("Pick the topic", Category::Study, Priority::Medium),
        ("Deep-work block", Category::Study, Priority::High),
        ("Write summary notes", Category::Study, Priority::Medium),
    ],
};

const BUILTIN: [Template; 4] = [DAILY_ROUTINE, SHOPPING, MEETING, STUDY_SESSION];

/// The built-in templates.
#[must_use]
pub const fn builtin() -> &'static [Template] {
    &BUILTIN
}

/// Look up a template by name (case-insensitive).
#[must_use]
pub fn find(name: &str) -> Option<&'static Template> {
    let needle = name.trim().to_ascii_lowercase();
    BUILTIN.iter().find(|t| t.name == needle)
}

impl Template {
    /// The drafts this template expands to.
    #[must_use]
    pub fn drafts(&self) -> Vec<TaskDraft> {
        self.entries
            .iter()
            .map(|(text, category, priority)| TaskDraft {
                text: (*text).to_string(),
                category: *category,
                priority: *priority,
                ..TaskDraft::default()
            })
            .collect()
    }
}

/// Append the template's tasks as one history commit.
#[must_use]
pub fn apply_template(tasks: &[Task], template: &Template, now: DateTime<Utc>) -> Outcome {
    let mut next = tasks.to_vec();
    for draft in template.drafts() {
        let id = TaskId::fresh(now.timestamp_millis(), next.iter().map(|t| t.id));
        next.push(Task {
            id,
            text: draft.text,
            completed: false,
            category: draft.category,
            priority: draft.priority,
            due: draft.due,
            reminder: None,
            created_at: now,
            tags: draft.tags,
            notes: draft.notes,
            subtasks: Vec::new(),
            progress: 0,
        });
    }
    Outcome::Changed(Applied {
        tasks: next,
        label: ActionLabel::Template,
        effects: Vec::new(),
    })
}
