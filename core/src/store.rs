// Task store: the ordered task list and every mutation on it
// Each change is written through to the slot before the call returns

use std::collections::HashSet;

use crate::models::{Attachment, Direction, Filter, Stats, Task};
use crate::storage::SlotStore;

pub struct TaskStore {
    slots: Box<dyn SlotStore>,
    key: String,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load the list from `key`. Missing or unreadable data starts an empty list.
    pub fn open(slots: impl SlotStore + 'static, key: &str) -> Self {
        let tasks = match slots.read(key) {
            Some(raw) => parseTasks(&raw),
            None => {
                tracing::info!("[TaskStore::open] Slot '{}' is empty, starting fresh", key);
                Vec::new()
            }
        };
        tracing::info!("[TaskStore::open] Loaded {} tasks from '{}'", tasks.len(), key);

        Self {
            slots: Box::new(slots),
            key: key.to_string(),
            tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn isEmpty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks matching `filter`, in list order
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t.done)).collect()
    }

    pub fn stats(&self) -> Stats {
        let done = self.tasks.iter().filter(|t| t.done).count();
        let total = self.tasks.len();
        Stats { active: total - done, done, total }
    }

    // ============================================
    // MUTATIONS
    // ============================================

    /// Prepend a new task. Blank text is ignored and returns `None`.
    pub fn add(&mut self, text: &str) -> Option<String> {
        let task = Task::new(text)?;
        let id = task.id.clone();
        tracing::info!("[TaskStore::add] {} '{}'", id, task.text);
        self.tasks.insert(0, task);
        self.persist();
        Some(id)
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.update(id, |t| t.done = !t.done)
    }

    /// Drop the task. Its attachment files stay on disk.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        tracing::info!("[TaskStore::remove] {}", id);
        self.persist();
        true
    }

    /// Remove every completed task; returns how many went
    pub fn clearCompleted(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        let removed = before - self.tasks.len();
        if removed > 0 {
            tracing::info!("[TaskStore::clearCompleted] Removed {} tasks", removed);
            self.persist();
        }
        removed
    }

    pub fn startEdit(&mut self, id: &str) -> bool {
        self.update(id, |t| t.editing = true)
    }

    pub fn cancelEdit(&mut self, id: &str) -> bool {
        self.update(id, |t| t.editing = false)
    }

    /// Blank text deletes the task instead of saving it empty
    pub fn saveEdit(&mut self, id: &str, newText: &str) -> bool {
        let value = newText.trim();
        if value.is_empty() {
            return self.remove(id);
        }
        self.update(id, |t| {
            t.text = value.to_string();
            t.editing = false;
        })
    }

    /// Swap with the neighbour in `direction`. No-op at either end.
    pub fn moveTask(&mut self, id: &str, direction: Direction) -> bool {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let target = match direction {
            Direction::Up if idx > 0 => idx - 1,
            Direction::Down if idx + 1 < self.tasks.len() => idx + 1,
            _ => return false,
        };
        self.tasks.swap(idx, target);
        self.persist();
        true
    }

    /// Append to the task's attachments. Paths already present anywhere are skipped.
    pub fn addAttachments(&mut self, id: &str, attachments: Vec<Attachment>) -> bool {
        let mut known: HashSet<String> = self.tasks.iter()
            .flat_map(|t| t.attachments.iter().map(|a| a.path.clone()))
            .collect();

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::warn!("[TaskStore::addAttachments] Unknown task {}", id);
            return false;
        };

        let mut added = 0;
        for attachment in attachments {
            if !known.insert(attachment.path.clone()) {
                tracing::warn!("[TaskStore::addAttachments] Skipping duplicate path {}", attachment.path);
                continue;
            }
            task.attachments.push(attachment);
            added += 1;
        }

        if added == 0 {
            return false;
        }
        tracing::info!("[TaskStore::addAttachments] {} +{}", id, added);
        self.persist();
        true
    }

    /// Drop the attachment with `path` from this task only
    pub fn removeAttachment(&mut self, id: &str, path: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if !task.hasAttachment(path) {
            return false;
        }
        task.attachments.retain(|a| a.path != path);
        tracing::info!("[TaskStore::removeAttachment] {} -{}", id, path);
        self.persist();
        true
    }

    fn update(&mut self, id: &str, change: impl FnOnce(&mut Task)) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                change(task);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Overwrite the slot with the current list. Failures are logged only.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.tasks) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("[TaskStore::persist] Serialization failed: {}", e);
                return;
            }
        };
        if let Err(e) = self.slots.write(&self.key, &json) {
            tracing::warn!("[TaskStore::persist] Write to '{}' failed: {}", self.key, e);
        }
    }
}

/// Decode a persisted list, dropping blank tasks, repeated ids and attachment paths
fn parseTasks(raw: &str) -> Vec<Task> {
    let parsed: Vec<Task> = match serde_json::from_str::<Option<Vec<Task>>>(raw) {
        Ok(tasks) => tasks.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("[parseTasks] Stored list is unreadable, starting fresh: {}", e);
            return Vec::new();
        }
    };

    let mut ids = HashSet::new();
    let mut paths = HashSet::new();
    let mut tasks = Vec::with_capacity(parsed.len());
    for mut task in parsed {
        if task.text.trim().is_empty() {
            tracing::warn!("[parseTasks] Dropping task {} with blank text", task.id);
            continue;
        }
        if !ids.insert(task.id.clone()) {
            tracing::warn!("[parseTasks] Dropping duplicate task id {}", task.id);
            continue;
        }
        task.attachments.retain(|a| paths.insert(a.path.clone()));
        tasks.push(task);
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlots;
    use std::sync::Arc;

    const KEY: &str = "todoapp_v1_tasks";

    fn emptyStore() -> (TaskStore, Arc<MemorySlots>) {
        let slots = Arc::new(MemorySlots::new());
        (TaskStore::open(slots.clone(), KEY), slots)
    }

    fn texts(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.text.as_str()).collect()
    }

    fn ids(store: &TaskStore) -> Vec<String> {
        store.tasks().iter().map(|t| t.id.clone()).collect()
    }

    fn persisted(slots: &MemorySlots) -> Vec<Task> {
        serde_json::from_str(&slots.read(KEY).unwrap()).unwrap()
    }

    fn attachment(token: &str, name: &str) -> Attachment {
        Attachment::new(
            token.to_string(),
            name.to_string(),
            1024,
            format!("/store/{}__{}", token, name),
        )
    }

    struct FailingSlots;

    impl SlotStore for FailingSlots {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("disk full".to_string())
        }
    }

    #[test]
    fn test_add_prepends() {
        let (mut store, _) = emptyStore();
        let first = store.add("buy milk").unwrap();
        store.add("walk dog").unwrap();

        assert_eq!(texts(&store), vec!["walk dog", "buy milk"]);
        assert_eq!(store.tasks()[1].id, first);
        assert!(!store.tasks()[0].done);
    }

    #[test]
    fn test_add_blank_is_noop() {
        let (mut store, slots) = emptyStore();
        assert!(store.add("").is_none());
        assert!(store.add("   ").is_none());
        assert!(store.isEmpty());
        assert!(slots.read(KEY).is_none());
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let (mut store, _) = emptyStore();
        let id = store.add("a").unwrap();

        assert!(store.toggle(&id));
        assert!(store.get(&id).unwrap().done);
        assert!(store.toggle(&id));
        assert!(!store.get(&id).unwrap().done);
        assert!(!store.toggle("missing"));
    }

    #[test]
    fn test_save_edit_blank_matches_remove() {
        let (mut a, _) = emptyStore();
        let (mut b, _) = emptyStore();
        for text in ["one", "two", "three"] {
            a.add(text);
            b.add(text);
        }
        let idA = a.tasks()[1].id.clone();
        let idB = b.tasks()[1].id.clone();

        assert!(a.saveEdit(&idA, "  "));
        assert!(b.remove(&idB));
        assert_eq!(texts(&a), texts(&b));
        assert_eq!(texts(&a), vec!["three", "one"]);
    }

    #[test]
    fn test_edit_cycle() {
        let (mut store, _) = emptyStore();
        let id = store.add("draft").unwrap();

        store.startEdit(&id);
        assert!(store.get(&id).unwrap().editing);
        store.cancelEdit(&id);
        assert!(!store.get(&id).unwrap().editing);

        store.startEdit(&id);
        assert!(store.saveEdit(&id, "  final  "));
        let task = store.get(&id).unwrap();
        assert_eq!(task.text, "final");
        assert!(!task.editing);
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        let (mut store, _) = emptyStore();
        for text in ["c", "b", "a"] {
            store.add(text);
        }
        let order = ids(&store);

        assert!(!store.moveTask(&order[0], Direction::Up));
        assert!(!store.moveTask(&order[2], Direction::Down));
        assert!(!store.moveTask("missing", Direction::Up));
        assert_eq!(ids(&store), order);
    }

    #[test]
    fn test_move_swaps_adjacent_only() {
        let (mut store, _) = emptyStore();
        for text in ["d", "c", "b", "a"] {
            store.add(text);
        }
        assert_eq!(texts(&store), vec!["a", "b", "c", "d"]);

        let c = store.tasks()[2].id.clone();
        assert!(store.moveTask(&c, Direction::Up));
        assert_eq!(texts(&store), vec!["a", "c", "b", "d"]);

        assert!(store.moveTask(&c, Direction::Down));
        assert!(store.moveTask(&c, Direction::Down));
        assert_eq!(texts(&store), vec!["a", "b", "d", "c"]);

        let mut sorted = ids(&store);
        sorted.sort();
        assert_eq!(sorted.len(), 4);
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn test_clear_completed_keeps_order() {
        let (mut store, _) = emptyStore();
        for text in ["e", "d", "c", "b", "a"] {
            store.add(text);
        }
        let done: Vec<String> = store.tasks().iter()
            .filter(|t| t.text == "b" || t.text == "d")
            .map(|t| t.id.clone())
            .collect();
        for id in &done {
            store.toggle(id);
        }

        assert_eq!(store.clearCompleted(), 2);
        assert_eq!(texts(&store), vec!["a", "c", "e"]);
        assert_eq!(store.clearCompleted(), 0);
    }

    #[test]
    fn test_filtering_is_pure() {
        let (mut store, _) = emptyStore();
        for text in ["c", "b", "a"] {
            store.add(text);
        }
        let b = store.tasks()[1].id.clone();
        store.toggle(&b);
        let before = store.tasks().to_vec();

        let active: Vec<&str> = store.filtered(Filter::Active).iter().map(|t| t.text.as_str()).collect();
        let done: Vec<&str> = store.filtered(Filter::Done).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(active, vec!["a", "c"]);
        assert_eq!(done, vec!["b"]);
        assert_eq!(store.filtered(Filter::All).len(), 3);
        assert_eq!(store.filtered(Filter::Active), store.filtered(Filter::Active));
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_stats() {
        let (mut store, _) = emptyStore();
        for text in ["c", "b", "a"] {
            store.add(text);
        }
        let a = store.tasks()[0].id.clone();
        store.toggle(&a);
        assert_eq!(store.stats(), Stats { active: 2, done: 1, total: 3 });
    }

    #[test]
    fn test_attachments_append_in_order() {
        let (mut store, _) = emptyStore();
        let id = store.add("report").unwrap();
        let other = store.add("other").unwrap();

        let first = vec![attachment("a1", "x.pdf")];
        assert!(store.addAttachments(&id, first.clone()));
        assert_eq!(store.get(&id).unwrap().attachments, first);

        store.addAttachments(&id, vec![attachment("a2", "y.png"), attachment("a3", "x.pdf")]);
        store.addAttachments(&other, vec![attachment("b1", "z.txt")]);

        let names: Vec<&str> = store.get(&id).unwrap().attachments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2", "a3"]);
        assert_eq!(store.get(&other).unwrap().attachments.len(), 1);
    }

    #[test]
    fn test_attachment_paths_stay_unique() {
        let (mut store, _) = emptyStore();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();

        store.addAttachments(&a, vec![attachment("t1", "x.pdf")]);
        assert!(!store.addAttachments(&b, vec![attachment("t1", "x.pdf")]));
        assert!(store.get(&b).unwrap().attachments.is_empty());
        assert!(!store.addAttachments("missing", vec![attachment("t2", "y")]));
    }

    #[test]
    fn test_remove_attachment_touches_one_entry() {
        let (mut store, _) = emptyStore();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        store.addAttachments(&a, vec![attachment("a1", "x"), attachment("a2", "y")]);
        store.addAttachments(&b, vec![attachment("b1", "x")]);

        assert!(store.removeAttachment(&a, "/store/a1__x"));
        let left: Vec<&str> = store.get(&a).unwrap().attachments.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(left, vec!["a2"]);
        assert_eq!(store.get(&b).unwrap().attachments.len(), 1);

        // path belongs to another task
        assert!(!store.removeAttachment(&a, "/store/b1__x"));
        assert_eq!(store.get(&b).unwrap().attachments.len(), 1);
    }

    #[test]
    fn test_scenario_from_empty() {
        let (mut store, _) = emptyStore();
        let milk = store.add("buy milk").unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.tasks()[0].done);

        store.add("walk dog");
        assert_eq!(texts(&store), vec!["walk dog", "buy milk"]);

        store.toggle(&milk);
        assert!(store.get(&milk).unwrap().done);
        assert!(!store.tasks()[0].done);

        store.clearCompleted();
        assert_eq!(texts(&store), vec!["walk dog"]);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let (mut store, slots) = emptyStore();
        let a = store.add("a").unwrap();
        assert_eq!(persisted(&slots), store.tasks());

        let b = store.add("b").unwrap();
        store.toggle(&a);
        assert_eq!(persisted(&slots), store.tasks());

        store.moveTask(&a, Direction::Up);
        assert_eq!(persisted(&slots), store.tasks());

        store.addAttachments(&b, vec![attachment("t", "f")]);
        assert_eq!(persisted(&slots), store.tasks());

        store.removeAttachment(&b, "/store/t__f");
        store.saveEdit(&b, "bee");
        assert_eq!(persisted(&slots), store.tasks());

        store.clearCompleted();
        assert_eq!(persisted(&slots), store.tasks());
    }

    #[test]
    fn test_reopen_restores_list() {
        let slots = Arc::new(MemorySlots::new());
        let expected = {
            let mut store = TaskStore::open(slots.clone(), KEY);
            let id = store.add("persist me").unwrap();
            store.addAttachments(&id, vec![attachment("a1", "x.pdf")]);
            store.tasks().to_vec()
        };

        let reopened = TaskStore::open(slots, KEY);
        assert_eq!(reopened.tasks(), expected.as_slice());
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        for raw in ["{not json", "null", "42", ""] {
            let store = TaskStore::open(MemorySlots::with(KEY, raw), KEY);
            assert!(store.isEmpty(), "{raw:?} should load as empty");
        }
    }

    #[test]
    fn test_load_drops_duplicates() {
        let raw = r#"[
            {"id":"1","text":"a","done":false,"createdAt":1,"editing":false,
             "attachments":[{"id":"x","name":"f","size":1,"path":"/p/f"}]},
            {"id":"1","text":"dup","done":false,"createdAt":2},
            {"id":"2","text":"b","done":true,"createdAt":3,
             "attachments":[{"id":"y","name":"f","size":1,"path":"/p/f"},
                            {"id":"z","name":"g","size":1,"path":"/p/g"}]}
        ]"#;
        let store = TaskStore::open(MemorySlots::with(KEY, raw), KEY);

        assert_eq!(texts(&store), vec!["a", "b"]);
        let kept: Vec<&str> = store.get("2").unwrap().attachments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(kept, vec!["z"]);
    }

    #[test]
    fn test_load_drops_blank_tasks() {
        let raw = r#"[
            {"id":"1","text":"   ","done":false,"createdAt":1},
            {"id":"2","text":"keep","done":false,"createdAt":2},
            {"id":"3","text":"","done":true,"createdAt":3},
            {"id":"1","text":"reuses a dropped id","done":false,"createdAt":4}
        ]"#;
        let store = TaskStore::open(MemorySlots::with(KEY, raw), KEY);

        assert_eq!(texts(&store), vec!["keep", "reuses a dropped id"]);
        assert!(store.tasks().iter().all(|t| !t.text.trim().is_empty()));
    }

    #[test]
    fn test_write_failure_is_not_surfaced() {
        let mut store = TaskStore::open(FailingSlots, KEY);
        let id = store.add("still here").unwrap();
        assert!(store.toggle(&id));
        assert_eq!(store.len(), 1);
    }
}
