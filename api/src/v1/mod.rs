mod language;
mod stats;

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use language::{Language, UnknownLanguage, SOURCE_LANGUAGE};
pub use stats::Stats;

/// Opaque identifier of a [`Todo`].
///
/// Freshly created todos get a v4 uuid, but any string is a valid id so that
/// collections written by older clients keep loading.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The most recent translation of a todo.
///
/// All three fields exist together or not at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    /// Text the translation was made from, fixed by the first translation.
    pub original_text: String,
    pub translated_text: String,
    /// Display name of the language of `translated_text`.
    pub target_language: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub translation: Option<Translation>,
}

impl Todo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TodoId::new(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
            translation: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether there is a non-blank translation to show.
    pub fn is_translated(&self) -> bool {
        self.shown_translation().is_some()
    }

    /// The text shown to the user: the translation if there is a non-blank one.
    pub fn display_text(&self) -> &str {
        self.shown_translation()
            .map_or(&self.text, |translation| &translation.translated_text)
    }

    fn shown_translation(&self) -> Option<&Translation> {
        self.translation
            .as_ref()
            .filter(|translation| !translation.translated_text.is_empty())
    }

    /// Text to send for translation.
    ///
    /// Always the original text, never a previous translation.
    pub fn translation_source(&self) -> &str {
        match &self.translation {
            Some(translation) => &translation.original_text,
            None => &self.text,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => todo.is_active(),
            Filter::Completed => todo.is_completed(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Done",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter `{0}`, expected one of: all, active, completed")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            _ => Err(ParseFilterError(s.to_owned())),
        }
    }
}
