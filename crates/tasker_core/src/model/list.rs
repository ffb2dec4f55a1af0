use crate::error::AppError;
use crate::model::Task;

/// Ordered task collection in insertion/load order.
///
/// `last_id` is the highest id this collection has ever handed out, so a
/// delete followed by a create never reissues the deleted id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    last_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(Task::id).max().unwrap_or(0);
        Self { tasks, last_id }
    }

    pub fn next_id(&self) -> u64 {
        self.last_id + 1
    }

    pub fn insert(&mut self, task: Task) -> Result<(), AppError> {
        if self.tasks.iter().any(|existing| existing.id() == task.id()) {
            return Err(AppError::invalid_input(format!(
                "task {} already exists",
                task.id()
            )));
        }
        self.last_id = self.last_id.max(task.id());
        self.tasks.push(task);
        Ok(())
    }

    pub fn find(&self, id: u64) -> Result<&Task, AppError> {
        self.tasks
            .iter()
            .find(|task| task.id() == id)
            .ok_or_else(|| AppError::not_found(id))
    }

    pub fn find_mut(&mut self, id: u64) -> Result<&mut Task, AppError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| AppError::not_found(id))
    }

    /// Returns the removed task and a new collection without it; `self`
    /// is left as it was.
    pub fn delete(&self, id: u64) -> Result<(Task, TaskList), AppError> {
        let removed = self.find(id)?.clone();
        let remaining = self
            .tasks
            .iter()
            .filter(|task| task.id() != id)
            .cloned()
            .collect();

        Ok((
            removed,
            TaskList {
                tasks: remaining,
                last_id: self.last_id,
            },
        ))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::TaskList;
    use crate::model::{Task, TaskDraft};

    fn add(tasks: &mut TaskList, description: &str) -> u64 {
        let task = Task::create(&TaskDraft::new(description), tasks).unwrap();
        let id = task.id();
        tasks.insert(task).unwrap();
        id
    }

    #[test]
    fn find_returns_created_task() {
        let mut tasks = TaskList::new();
        let id = add(&mut tasks, "  buy milk ");

        assert_eq!(tasks.find(id).unwrap().description(), "buy milk");
        assert_eq!(tasks.find(99).unwrap_err().code(), "not_found");
    }

    #[test]
    fn ids_keep_increasing_after_delete() {
        let mut tasks = TaskList::new();
        let first = add(&mut tasks, "one");
        let second = add(&mut tasks, "two");

        let (removed, mut remaining) = tasks.delete(second).unwrap();
        assert_eq!(removed.id(), second);

        let third = add(&mut remaining, "three");
        assert!(first < second && second < third);
        assert_ne!(third, second);
    }

    #[test]
    fn delete_preserves_order_and_leaves_source_untouched() {
        let mut tasks = TaskList::new();
        add(&mut tasks, "one");
        add(&mut tasks, "two");
        add(&mut tasks, "three");

        let (removed, remaining) = tasks.delete(2).unwrap();

        assert_eq!(removed.description(), "two");
        let ids: Vec<u64> = remaining.iter().map(Task::id).collect();
        assert_eq!(ids, [1, 3]);
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn delete_rejects_unknown_id() {
        let mut tasks = TaskList::new();
        add(&mut tasks, "one");

        let err = tasks.delete(999).unwrap_err();
        assert_eq!(err.code(), "not_found");
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn from_tasks_resumes_after_highest_id() {
        let mut tasks = TaskList::new();
        add(&mut tasks, "one");
        add(&mut tasks, "two");

        let reloaded = TaskList::from_tasks(tasks.into_tasks());
        assert_eq!(reloaded.next_id(), 3);
        assert_eq!(TaskList::new().next_id(), 1);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut tasks = TaskList::new();
        add(&mut tasks, "one");
        let duplicate = tasks.find(1).unwrap().clone();

        assert_eq!(tasks.insert(duplicate).unwrap_err().code(), "invalid_input");
    }
}
