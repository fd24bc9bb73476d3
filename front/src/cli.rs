use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lingo_api::v1::{Filter, Language};

use crate::ui::{Intent, Target};

/// A todo list that can translate its tasks.
#[derive(Debug, Parser)]
#[command(name = "lingo", version)]
pub struct Cli {
    /// RON config file, defaults to `lingo.ron` when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the todos are stored in
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a todo
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show todos
    List {
        #[arg(long, short, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Complete or reopen a todo
    Toggle { target: Target },
    /// Delete a todo
    Delete { target: Target },
    /// Translate a todo from English
    Translate { target: Target, language: Language },
    /// Remove all completed todos
    ClearCompleted,
    /// Show totals and progress
    Stats,
    /// List the languages todos can be translated into
    Languages,
    /// Interactive prompt (the default)
    Shell,
}

impl Command {
    /// The intent a one-shot command stands for. `None` for [`Command::Shell`].
    pub fn into_intent(self) -> Option<Intent> {
        let intent = match self {
            Command::Add { text } => Intent::Add(text.join(" ")),
            Command::List { filter } => Intent::Show(filter),
            Command::Toggle { target } => Intent::Toggle(target),
            Command::Delete { target } => Intent::Delete(target),
            Command::Translate { target, language } => Intent::Translate(target, language),
            Command::ClearCompleted => Intent::ClearCompleted,
            Command::Stats => Intent::Stats,
            Command::Languages => Intent::Languages,
            Command::Shell => return None,
        };

        Some(intent)
    }
}
