//! Collection-level reporting: totals, completion rate, category breakdown.

use crate::model::{Category, Priority, Task};
use serde::Serialize;

/// Per-category slice of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub count: usize,
    pub completed: usize,
}

/// Report payload derived from the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed tasks, rounded half-up; 0 for an empty
    /// collection.
    pub completion_rate: u8,
    /// Incomplete high-priority tasks, the "needs attention" number.
    pub high_priority_pending: usize,
    /// One entry per category, in declaration order, including empty ones.
    pub by_category: Vec<CategoryStats>,
}

/// Derive the report from `tasks`. Pure; the collection is untouched.
#[must_use]
pub fn stats(tasks: &[Task]) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let completion_rate = if total == 0 {
        0
    } else {
        u8::try_from((200 * completed + total) / (2 * total)).unwrap_or(100)
    };

    let by_category = Category::ALL
        .into_iter()
        .map(|category| {
            let in_category = tasks.iter().filter(|t| t.category == category);
            let (count, done) = in_category.fold((0, 0), |(count, done), t| {
                (count + 1, done + usize::from(t.completed))
            });
            CategoryStats {
                category,
                count,
                completed: done,
            }
        })
        .collect();

    Stats {
        total,
        completed,
        pending: total - completed,
        completion_rate,
        high_priority_pending: tasks
            .iter()
            .filter(|t| t.priority == Priority::High && !t.completed)
            .count(),
        by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::stats;
    use crate::model::{Category, Priority, Task, TaskId};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn task(id: i64, category: Category, priority: Priority, completed: bool) -> Task {
        Task {
            id: TaskId::from_millis(id),
            text: format!("task-{id}"),
            completed,
            category,
            priority,
            due: None,
            reminder: None,
            created_at: Utc.timestamp_millis_opt(id).single().expect("valid ts"),
            tags: BTreeSet::new(),
            notes: String::new(),
            subtasks: Vec::new(),
            progress: 0,
        }
    }

    #[test]
    fn empty_collection_reports_zeroes() {
        let report = stats(&[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.completion_rate, 0);
        assert_eq!(report.by_category.len(), 5);
        assert!(report.by_category.iter().all(|c| c.count == 0));
    }

    #[test]
    fn counts_and_completion_rate() {
        let tasks = vec![
            task(1, Category::Work, Priority::High, false),
            task(2, Category::Work, Priority::Medium, true),
            task(3, Category::Personal, Priority::Low, false),
        ];
        let report = stats(&tasks);
        assert_eq!(report.total, 3);
        assert_eq!(report.completed, 1);
        assert_eq!(report.pending, 2);
        assert_eq!(report.completion_rate, 33);
        assert_eq!(report.high_priority_pending, 1);
    }

    #[test]
    fn category_breakdown_tracks_per_category_completion() {
        let tasks = vec![
            task(1, Category::Health, Priority::Medium, true),
            task(2, Category::Health, Priority::Medium, false),
            task(3, Category::Study, Priority::Medium, false),
        ];
        let report = stats(&tasks);
        let health = report
            .by_category
            .iter()
            .find(|c| c.category == Category::Health)
            .expect("health entry");
        assert_eq!(health.count, 2);
        assert_eq!(health.completed, 1);
        let study = report
            .by_category
            .iter()
            .find(|c| c.category == Category::Study)
            .expect("study entry");
        assert_eq!(study.count, 1);
        assert_eq!(study.completed, 0);
    }

    #[test]
    fn completed_high_priority_does_not_count_as_pending() {
        let tasks = vec![task(1, Category::Work, Priority::High, true)];
        assert_eq!(stats(&tasks).high_priority_pending, 0);
    }
}
