//! Lightweight task list.
//!
//! Persisted as a JSON blob in the key-value store; the list is small
//! enough that whole-list reads and writes are fine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category tag for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskTag {
    Study,
    Work,
    Gym,
    #[serde(rename = "Deep Work")]
    DeepWork,
    Personal,
}

impl TaskTag {
    pub const ALL: [TaskTag; 5] = [
        TaskTag::Study,
        TaskTag::Work,
        TaskTag::Gym,
        TaskTag::DeepWork,
        TaskTag::Personal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskTag::Study => "Study",
            TaskTag::Work => "Work",
            TaskTag::Gym => "Gym",
            TaskTag::DeepWork => "Deep Work",
            TaskTag::Personal => "Personal",
        }
    }
}

impl std::fmt::Display for TaskTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TaskTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        TaskTag::ALL
            .into_iter()
            .find(|tag| tag.label().to_lowercase() == needle)
            .ok_or_else(|| {
                format!("unknown tag '{s}' (Study, Work, Gym, Deep Work, Personal)")
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub tag: TaskTag,
}

/// Ordered task list with the CRUD operations the shell exposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Add a task. Whitespace-only text is rejected.
    pub fn add(&mut self, text: &str, tag: TaskTag) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.tasks.push(Task {
            id: Uuid::new_v4(),
            text: text.to_string(),
            completed: false,
            tag,
        });
        self.tasks.last()
    }

    /// Flip a task's completed flag. Returns false if the id is unknown.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Replace a task's text and tag. Returns false if the id is unknown
    /// or the new text is empty.
    pub fn edit(&mut self, id: Uuid, text: &str, tag: TaskTag) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = text.to_string();
                task.tag = tag;
                true
            }
            None => false,
        }
    }

    /// Remove a task. Returns false if the id is unknown.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() < before
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task at a 1-based position, as shown by `task list`.
    pub fn by_position(&self, position: usize) -> Option<&Task> {
        position.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_rejects_empty_text() {
        let mut list = TaskList::default();
        assert!(list.add("   ", TaskTag::Work).is_none());
        let task = list.add("  write report  ", TaskTag::Work).unwrap();
        assert_eq!(task.text, "write report");
        assert!(!task.completed);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn toggle_flips_completion() {
        let mut list = TaskList::default();
        let id = list.add("stretch", TaskTag::Gym).unwrap().id;
        assert!(list.toggle(id));
        assert_eq!(list.completed_count(), 1);
        assert!(list.toggle(id));
        assert_eq!(list.completed_count(), 0);
        assert!(!list.toggle(Uuid::new_v4()));
    }

    #[test]
    fn edit_and_remove_by_id() {
        let mut list = TaskList::default();
        let id = list.add("draft", TaskTag::Work).unwrap().id;
        assert!(list.edit(id, "final draft", TaskTag::DeepWork));
        assert_eq!(list.tasks()[0].text, "final draft");
        assert_eq!(list.tasks()[0].tag, TaskTag::DeepWork);
        assert!(!list.edit(id, "  ", TaskTag::Work));

        assert!(list.remove(id));
        assert!(list.is_empty());
        assert!(!list.remove(id));
    }

    #[test]
    fn positions_are_one_based() {
        let mut list = TaskList::default();
        list.add("first", TaskTag::Personal);
        list.add("second", TaskTag::Personal);
        assert_eq!(list.by_position(1).unwrap().text, "first");
        assert_eq!(list.by_position(2).unwrap().text, "second");
        assert!(list.by_position(0).is_none());
        assert!(list.by_position(3).is_none());
    }

    #[test]
    fn tag_parsing_matches_labels() {
        assert_eq!("deep work".parse::<TaskTag>().unwrap(), TaskTag::DeepWork);
        assert_eq!("Work".parse::<TaskTag>().unwrap(), TaskTag::Work);
        assert!("errands".parse::<TaskTag>().is_err());
    }

    #[test]
    fn json_round_trip() {
        let mut list = TaskList::default();
        list.add("read", TaskTag::Study);
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.contains("\"Study\""));
        let back: TaskList = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.tasks()[0].text, "read");
    }
}
