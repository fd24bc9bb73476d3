use lingo_api::v1::{Filter, Stats, Todo, TodoId, Translation};
use tracing::info;

use crate::{KeyValueStore, Notification, Persistence};

/// The todo collection and the only place it is mutated.
///
/// Todos are kept newest first. Every change is written through to the
/// [`Persistence`] layer before the method returns.
#[derive(Debug)]
pub struct TodoStore<S> {
    todos: Vec<Todo>,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Opens the store, loading whatever was persisted under the default key.
    pub fn open(kv: S) -> Self {
        Self::from_persistence(Persistence::new(kv))
    }

    pub fn from_persistence(persistence: Persistence<S>) -> Self {
        let todos = persistence.load();
        Self { todos, persistence }
    }

    pub fn into_inner(self) -> S {
        self.persistence.into_inner()
    }

    /// Adds a todo at the head of the list. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<Notification> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let todo = Todo::new(text);

        info!(
            id = %todo.id,
            text = %todo.text,
            "created todo"
        );

        self.todos.insert(0, todo);
        self.sync();

        Some(Notification::Added)
    }

    pub fn toggle(&mut self, id: &TodoId) -> Option<Notification> {
        let todo = self.todos.iter_mut().find(|todo| todo.id == *id)?;
        todo.completed = !todo.completed;

        info!(
            id = %todo.id,
            completed = todo.completed,
            "toggled todo"
        );

        let notification = match todo.completed {
            true => Notification::Completed,
            false => Notification::Reopened,
        };

        self.sync();

        Some(notification)
    }

    pub fn delete(&mut self, id: &TodoId) -> Option<Notification> {
        let index = self.todos.iter().position(|todo| todo.id == *id)?;
        let todo = self.todos.remove(index);

        info!(id = %todo.id, "deleted todo");

        self.sync();

        Some(Notification::Deleted)
    }

    /// Records a finished translation on the todo with `id`.
    ///
    /// The first translation fixes `original_text`; later ones only replace
    /// the translated text and language. Returns `false` for unknown ids.
    pub fn translate(
        &mut self,
        id: &TodoId,
        translated_text: impl Into<String>,
        language_name: impl Into<String>,
        original_text: impl Into<String>,
    ) -> bool {
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == *id) else {
            return false;
        };

        let original_text = match todo.translation.take() {
            Some(previous) => previous.original_text,
            None => {
                let original_text = original_text.into();
                match original_text.is_empty() {
                    true => todo.text.clone(),
                    false => original_text,
                }
            }
        };

        let translation = Translation {
            original_text,
            translated_text: translated_text.into(),
            target_language: language_name.into(),
        };

        info!(
            id = %todo.id,
            language = %translation.target_language,
            "translated todo"
        );

        todo.translation = Some(translation);
        self.sync();

        true
    }

    /// Removes every completed todo. Nothing is reported when there were none.
    pub fn clear_completed(&mut self) -> Option<Notification> {
        let before = self.todos.len();
        self.todos.retain(Todo::is_active);

        let count = before - self.todos.len();
        if count == 0 {
            return None;
        }

        info!(count, "cleared completed todos");

        self.sync();

        Some(Notification::ClearedCompleted { count })
    }

    pub fn all(&self) -> &[Todo] {
        &self.todos
    }

    pub fn active(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(|todo| todo.is_active())
    }

    pub fn completed(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(|todo| todo.is_completed())
    }

    pub fn view(&self, filter: Filter) -> Vec<&Todo> {
        self.todos.iter().filter(|todo| filter.matches(todo)).collect()
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == *id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.todos)
    }

    fn sync(&mut self) {
        self.persistence.save(&self.todos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStore, MemoryStore, STORAGE_KEY};

    fn store() -> TodoStore<MemoryStore> {
        TodoStore::open(MemoryStore::new())
    }

    fn add(store: &mut TodoStore<MemoryStore>, text: &str) -> TodoId {
        store.add(text).unwrap();
        store.all()[0].id.clone()
    }

    #[test]
    fn add_creates_active_untranslated_todo() {
        let mut store = store();

        assert_eq!(store.add("Buy milk"), Some(Notification::Added));

        let all = store.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "Buy milk");
        assert!(!all[0].completed);
        assert!(all[0].translation.is_none());
    }

    #[test]
    fn add_ignores_blank_text() {
        let mut store = store();

        assert_eq!(store.add(""), None);
        assert_eq!(store.add("   \t\n"), None);
        assert!(store.is_empty());
        assert_eq!(store.into_inner().get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn add_trims_and_inserts_newest_first() {
        let mut store = store();
        store.add("first");
        store.add("  second  ");

        let texts: Vec<_> = store.all().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["second", "first"]);
    }

    #[test]
    fn toggle_flips_and_reports_resulting_state() {
        let mut store = store();
        let id = add(&mut store, "Buy milk");

        assert_eq!(store.toggle(&id), Some(Notification::Completed));
        assert!(store.get(&id).unwrap().completed);

        assert_eq!(store.toggle(&id), Some(Notification::Reopened));
        assert!(!store.get(&id).unwrap().completed);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = store();
        add(&mut store, "Buy milk");
        let before = store.all().to_vec();
        let missing = TodoId::from("missing");

        assert_eq!(store.toggle(&missing), None);
        assert_eq!(store.delete(&missing), None);
        assert!(!store.translate(&missing, "Hola", "Spanish", "Hello"));
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn delete_only_todo_empties_collection() {
        let mut store = store();
        let id = add(&mut store, "Buy milk");

        assert_eq!(store.delete(&id), Some(Notification::Deleted));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_completed_keeps_active_todos_untouched() {
        let mut store = store();
        let a = add(&mut store, "a");
        let b = add(&mut store, "b");
        add(&mut store, "c");
        store.toggle(&a);
        store.toggle(&b);
        let remaining = store.active().next().unwrap().clone();

        assert_eq!(
            store.clear_completed(),
            Some(Notification::ClearedCompleted { count: 2 })
        );
        assert_eq!(store.all(), [remaining]);
    }

    #[test]
    fn clear_completed_without_completed_is_silent() {
        let mut store = store();
        add(&mut store, "a");

        assert_eq!(store.clear_completed(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn translate_sets_all_fields_and_keeps_text() {
        let mut store = store();
        let id = add(&mut store, "Hello");

        assert!(store.translate(&id, "Hola", "Spanish", "Hello"));

        let todo = store.get(&id).unwrap();
        let translation = todo.translation.as_ref().unwrap();
        assert_eq!(todo.text, "Hello");
        assert_eq!(translation.original_text, "Hello");
        assert_eq!(translation.translated_text, "Hola");
        assert_eq!(translation.target_language, "Spanish");
    }

    #[test]
    fn retranslating_keeps_first_original_text() {
        let mut store = store();
        let id = add(&mut store, "Hello");
        store.translate(&id, "Hola", "Spanish", "Hello");

        store.translate(&id, "Bonjour", "French", "Hola");

        let translation = store.get(&id).unwrap().translation.clone().unwrap();
        assert_eq!(translation.original_text, "Hello");
        assert_eq!(translation.translated_text, "Bonjour");
        assert_eq!(translation.target_language, "French");
    }

    #[test]
    fn views_keep_insertion_order() {
        let mut store = store();
        let a = add(&mut store, "a");
        add(&mut store, "b");
        let c = add(&mut store, "c");
        store.toggle(&a);
        store.toggle(&c);

        let text = |todos: Vec<&Todo>| todos.iter().map(|t| t.text.clone()).collect::<Vec<_>>();
        assert_eq!(text(store.view(Filter::All)), ["c", "b", "a"]);
        assert_eq!(text(store.view(Filter::Active)), ["b"]);
        assert_eq!(text(store.view(Filter::Completed)), ["c", "a"]);
        assert_eq!(store.completed().count(), 2);
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut kv = MemoryStore::new();

        let id = {
            let mut store = TodoStore::open(&mut kv);
            store.add("Hello");
            store.add("Walk the dog");
            let id = store.all()[1].id.clone();
            store.toggle(&id);
            store.translate(&id, "Hola", "Spanish", "Hello");
            id
        };

        let reopened = TodoStore::open(&mut kv);
        let todo = reopened.get(&id).unwrap();
        assert_eq!(reopened.len(), 2);
        assert!(todo.completed);
        assert_eq!(todo.display_text(), "Hola");
        assert_eq!(reopened.all()[0].text, "Walk the dog");
    }

    #[test]
    fn failed_write_does_not_reach_the_caller() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut store = TodoStore::open(FileStore::new(file.path()));

        assert_eq!(store.add("Buy milk"), Some(Notification::Added));
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].text, "Buy milk");
    }

    #[test]
    fn stats_of_empty_store() {
        let stats = store().stats();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.completion_percent, 0);
        assert_eq!(stats.translated, 0);
    }
}
