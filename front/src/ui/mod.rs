mod session;
pub mod stats;
pub mod todo;
pub mod todo_input;

use std::{convert::Infallible, str::FromStr};

use lingo_api::v1::{Filter, Language};
use lingo_back::{KeyValueStore, Notification};

pub use session::Session;
pub use todo_input::ParseIntentError;

use crate::translate::PendingTranslation;

/// How the user points at a todo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the current view.
    Position(usize),
    /// Full id or a unique prefix of one.
    Id(String),
}

impl FromStr for Target {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Ok(match s.parse() {
            Ok(position) => Target::Position(position),
            Err(_) => Target::Id(s.to_owned()),
        })
    }
}

/// Something the user asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(Target),
    Delete(Target),
    /// Open the language menu for a todo.
    OpenTranslate(Target),
    /// Confirm a language in the open menu.
    PickLanguage(Language),
    Translate(Target, Language),
    ClearCompleted,
    Show(Filter),
    List,
    Stats,
    Languages,
    Help,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    List,
    Stats,
    Menu,
    Languages,
    Help,
}

/// What came out of handling an [`Intent`].
#[derive(Debug, Default)]
pub struct Dispatch {
    pub notifications: Vec<Notification>,
    /// A translation to run off the event loop, then hand to [`Session::finish`].
    pub pending: Option<PendingTranslation>,
    pub screen: Option<Screen>,
    pub quit: bool,
}

impl Dispatch {
    fn changed(notification: Option<Notification>) -> Self {
        Self {
            screen: notification.is_some().then_some(Screen::List),
            notifications: notification.into_iter().collect(),
            ..Self::default()
        }
    }

    fn screen(screen: Screen) -> Self {
        Self {
            screen: Some(screen),
            ..Self::default()
        }
    }

    fn translation(pending: Option<PendingTranslation>) -> Self {
        Self {
            screen: pending.is_some().then_some(Screen::List),
            pending,
            ..Self::default()
        }
    }
}

pub fn render<S: KeyValueStore>(session: &Session<S>, screen: Screen) -> String {
    match screen {
        Screen::List => view(session),
        Screen::Stats => stats::view(&session.store().stats()),
        Screen::Menu => menu(session),
        Screen::Languages => languages(),
        Screen::Help => help(),
    }
}

/// The tab bar followed by the todos of the current view.
pub fn view<S: KeyValueStore>(session: &Session<S>) -> String {
    let store = session.store();
    let stats = store.stats();

    let tabs: Vec<_> = Filter::ALL
        .into_iter()
        .map(|filter| {
            let count = match filter {
                Filter::All => stats.total,
                Filter::Active => stats.active,
                Filter::Completed => stats.completed,
            };

            match filter == session.filter() {
                true => format!("[{} ({count})]", filter.label()),
                false => format!(" {} ({count}) ", filter.label()),
            }
        })
        .collect();

    let mut out = tabs.join("  ");
    out.push('\n');

    let todos = session.visible();
    if todos.is_empty() {
        out.push_str("\n  No tasks here yet.\n");
        out.push_str(match store.is_empty() {
            true => "  Add your first todo above!\n",
            false => "  Great job on staying organized!\n",
        });
        return out;
    }

    out.push('\n');
    for (i, todo) in todos.iter().enumerate() {
        out.push_str(&todo::view(i + 1, todo, session.is_translating(&todo.id)));
    }

    if stats.completed > 0 {
        out.push_str("\n  (clear) removes completed tasks\n");
    }

    out
}

pub fn notification(notification: &Notification) -> String {
    let marker = match notification.is_destructive() {
        true => '!',
        false => '*',
    };

    format!("{marker} {} {}", notification.title(), notification.description())
}

fn menu<S: KeyValueStore>(session: &Session<S>) -> String {
    let Some(todo) = session.menu() else {
        return String::new();
    };

    format!(
        "Translate \"{}\" to:\n{}(pick <code>) confirms\n",
        todo.text,
        languages()
    )
}

pub fn languages() -> String {
    Language::ALL
        .iter()
        .map(|language| format!("  {}  {}\n", language.code(), language.name()))
        .collect()
}

pub fn help() -> String {
    String::from(
        "\
add <text>              add a todo
toggle <n|id>           complete or reopen a todo
delete <n|id>           delete a todo
translate <n|id> [lang] translate a todo, or open the language menu
pick <lang>             confirm a language in the open menu
clear                   remove completed todos
all | active | done     switch view
list | stats | languages
help | quit
",
    )
}
