//! To-do items

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracker_core::{Record, ViewScoped};

use crate::time::parse_timestamp;
use crate::validation::{require_text, Validate, ValidationIssue};

pub type TodoItem = Record<Todo>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// The to-do list view this item belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
}

impl Todo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            due_date: None,
            priority: Priority::default(),
            view_id: None,
        }
    }

    pub fn in_view(mut self, view_id: impl Into<String>) -> Self {
        self.view_id = Some(view_id.into());
        self
    }

    pub fn due(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Open and due strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.completed {
            return false;
        }
        self.due_date
            .as_deref()
            .and_then(parse_timestamp)
            .map(|due| due.date() < today)
            .unwrap_or(false)
    }
}

impl ViewScoped for Todo {
    fn view_id(&self) -> Option<&str> {
        self.view_id.as_deref()
    }
}

/// Items belonging to `view_id`, highest priority first, open before done.
pub fn items_in_view<'a>(items: &'a [TodoItem], view_id: &str) -> Vec<&'a TodoItem> {
    let mut selected: Vec<&TodoItem> = items
        .iter()
        .filter(|t| t.fields.view_id.as_deref() == Some(view_id))
        .collect();
    selected.sort_by(|a, b| {
        a.fields
            .completed
            .cmp(&b.fields.completed)
            .then(b.fields.priority.cmp(&a.fields.priority))
    });
    selected
}

impl Validate for Todo {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        require_text(&mut issues, "title", &self.title, "Title");
        if let Some(due) = &self.due_date {
            if parse_timestamp(due).is_none() {
                issues.push(ValidationIssue::error("dueDate", "Due date is not a date"));
            }
        }
        if self.view_id.is_none() {
            issues.push(ValidationIssue::warning("viewId", "Item is not attached to a view"));
        }
        issues
    }
}
