use std::collections::HashSet;

use chrono::{DateTime, Utc};
use eyre::WrapErr;
use lingo_api::v1::{Todo, TodoId, Translation};
use serde::{Deserialize, Serialize};

use crate::KeyValueStore;

/// Key the whole collection is stored under.
pub const STORAGE_KEY: &str = "ai-todos";

/// Mirrors the todo collection into a [`KeyValueStore`] as one JSON array.
#[derive(Debug)]
pub struct Persistence<S> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, STORAGE_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Loads the stored collection, falling back to an empty one.
    ///
    /// A missing blob is the normal first-run case. A blob that can't be read
    /// or parsed is logged and treated as empty.
    pub fn load(&self) -> Vec<Todo> {
        match self.try_load() {
            Ok(todos) => todos,
            Err(err) => {
                tracing::warn!(key = %self.key, "discarding stored todos: {:?}", err);
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> eyre::Result<Vec<Todo>> {
        let Some(blob) = self.kv.get(&self.key)? else {
            return Ok(Vec::new());
        };

        let stored: Vec<StoredOwned> =
            serde_json::from_str(&blob).wrap_err("stored todos are not a valid todo array")?;

        let mut seen = HashSet::with_capacity(stored.len());
        let mut todos = Vec::with_capacity(stored.len());

        for (index, stored) in stored.into_iter().enumerate() {
            let todo = stored
                .into_todo()
                .wrap_err_with(|| format!("todo at index {index}"))?;

            if !seen.insert(todo.id.clone()) {
                eyre::bail!("duplicate todo id `{}`", todo.id);
            }

            todos.push(todo);
        }

        tracing::debug!(key = %self.key, count = todos.len(), "loaded todos");

        Ok(todos)
    }

    /// Overwrites the stored collection, logging instead of failing.
    pub fn save(&mut self, todos: &[Todo]) {
        if let Err(err) = self.try_save(todos) {
            tracing::error!(key = %self.key, "failed to store todos: {:?}", err);
        }
    }

    pub fn try_save(&mut self, todos: &[Todo]) -> eyre::Result<()> {
        let data: Vec<_> = todos.iter().map(StoredBorrowed::from).collect();
        let json = serde_json::to_string(&data)?;

        self.kv.set(&self.key, &json)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredBorrowed<'a> {
    id: &'a TodoId,
    text: &'a str,
    completed: bool,
    created_at: &'a DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    translated_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_language: Option<&'a str>,
}

impl<'a> From<&'a Todo> for StoredBorrowed<'a> {
    fn from(todo: &'a Todo) -> Self {
        let translation = todo.translation.as_ref();

        Self {
            id: &todo.id,
            text: &todo.text,
            completed: todo.completed,
            created_at: &todo.created_at,
            original_text: translation.map(|t| t.original_text.as_str()),
            translated_text: translation.map(|t| t.translated_text.as_str()),
            target_language: translation.map(|t| t.target_language.as_str()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredOwned {
    id: TodoId,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
    #[serde(default)]
    original_text: Option<String>,
    #[serde(default)]
    translated_text: Option<String>,
    #[serde(default)]
    target_language: Option<String>,
}

impl StoredOwned {
    fn into_todo(self) -> eyre::Result<Todo> {
        let translation = match (self.original_text, self.translated_text, self.target_language) {
            (None, None, None) => None,
            (Some(original_text), Some(translated_text), Some(target_language)) => {
                if original_text.is_empty() {
                    eyre::bail!("translated todo `{}` has an empty originalText", self.id);
                }

                Some(Translation {
                    original_text,
                    translated_text,
                    target_language,
                })
            }
            (None, Some(_), Some(_)) => {
                eyre::bail!("translated todo `{}` has no originalText", self.id)
            }
            (Some(_), None, None) => {
                eyre::bail!("todo `{}` has an originalText but no translation", self.id)
            }
            _ => eyre::bail!(
                "todo `{}` must have both translatedText and targetLanguage or neither",
                self.id
            ),
        };

        Ok(Todo {
            id: self.id,
            text: self.text,
            completed: self.completed,
            created_at: self.created_at,
            translation,
        })
    }
}
