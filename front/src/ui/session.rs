use lingo_api::v1::{Filter, Language, Todo, TodoId};
use lingo_back::{KeyValueStore, Notification, TodoStore};

use super::{Dispatch, Intent, Screen, Target};
use crate::translate::{InFlight, PendingTranslation, TranslationClient, TranslationDone};

/// Everything the presentation layer works with.
///
/// The store holds the durable state. The rest is transient: the active
/// filter, which todo's translate menu is open and which todos are waiting
/// on a translation.
pub struct Session<S> {
    store: TodoStore<S>,
    translator: TranslationClient,
    in_flight: InFlight,
    filter: Filter,
    menu: Option<TodoId>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: TodoStore<S>, translator: TranslationClient) -> Self {
        Self {
            store,
            translator,
            in_flight: InFlight::new(),
            filter: Filter::All,
            menu: None,
        }
    }

    pub fn store(&self) -> &TodoStore<S> {
        &self.store
    }

    pub fn translator(&self) -> &TranslationClient {
        &self.translator
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// The todo whose translate menu is open.
    pub fn menu(&self) -> Option<&Todo> {
        self.menu.as_ref().and_then(|id| self.store.get(id))
    }

    pub fn is_translating(&self, id: &TodoId) -> bool {
        self.in_flight.contains(id)
    }

    /// Todos in the current view, in display order.
    pub fn visible(&self) -> Vec<&Todo> {
        self.store.view(self.filter)
    }

    /// Finds a todo by its position in the current view, or by id or unique id prefix.
    pub fn resolve(&self, target: &Target) -> Option<TodoId> {
        match target {
            Target::Position(position) => {
                let index = position.checked_sub(1)?;
                self.visible().get(index).map(|todo| todo.id.clone())
            }
            Target::Id(id) => {
                let all = self.store.all();

                if let Some(todo) = all.iter().find(|todo| todo.id.as_str() == id.as_str()) {
                    return Some(todo.id.clone());
                }

                let mut matches = all.iter().filter(|todo| todo.id.as_str().starts_with(id.as_str()));
                match (matches.next(), matches.next()) {
                    (Some(todo), None) => Some(todo.id.clone()),
                    _ => None,
                }
            }
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> Dispatch {
        match intent {
            Intent::Add(text) => Dispatch::changed(self.store.add(&text)),
            Intent::Toggle(target) => {
                let notification = self.resolve(&target).and_then(|id| self.store.toggle(&id));
                Dispatch::changed(notification)
            }
            Intent::Delete(target) => {
                let Some(id) = self.resolve(&target) else {
                    return Dispatch::changed(None);
                };

                if self.menu.as_ref() == Some(&id) {
                    self.menu = None;
                }

                Dispatch::changed(self.store.delete(&id))
            }
            Intent::OpenTranslate(target) => match self.resolve(&target) {
                Some(id) if !self.in_flight.contains(&id) => {
                    self.menu = Some(id);
                    Dispatch::screen(Screen::Menu)
                }
                _ => Dispatch::default(),
            },
            Intent::PickLanguage(language) => match self.menu.take() {
                Some(id) => Dispatch::translation(self.begin_translation(&id, language)),
                None => Dispatch::default(),
            },
            Intent::Translate(target, language) => {
                self.menu = None;
                let pending = self
                    .resolve(&target)
                    .and_then(|id| self.begin_translation(&id, language));

                Dispatch::translation(pending)
            }
            Intent::ClearCompleted => Dispatch::changed(self.store.clear_completed()),
            Intent::Show(filter) => {
                self.filter = filter;
                Dispatch::screen(Screen::List)
            }
            Intent::List => Dispatch::screen(Screen::List),
            Intent::Stats => Dispatch::screen(Screen::Stats),
            Intent::Languages => Dispatch::screen(Screen::Languages),
            Intent::Help => Dispatch::screen(Screen::Help),
            Intent::Quit => Dispatch {
                quit: true,
                ..Dispatch::default()
            },
        }
    }

    /// Admits a translation of `id` unless one is already running for it.
    pub fn begin_translation(&self, id: &TodoId, language: Language) -> Option<PendingTranslation> {
        let todo = self.store.get(id)?;
        let guard = self.in_flight.try_begin(id)?;

        tracing::debug!(id = %id, language = language.code(), "starting translation");

        Some(PendingTranslation::new(
            id.clone(),
            language,
            todo.translation_source().to_owned(),
            guard,
        ))
    }

    /// Merges a finished translation into the store.
    ///
    /// The store is only touched on success. The todo stops being busy once
    /// this returns, whatever the outcome.
    pub fn finish(&mut self, done: TranslationDone) -> Option<Notification> {
        let (id, language, source, result, guard) = done.into_parts();

        let notification = match result {
            Ok(translated) => self
                .store
                .translate(&id, translated, language.name(), source)
                .then(|| Notification::Translated {
                    language: language.name().to_owned(),
                }),
            Err(err) => {
                tracing::error!(id = %id, language = language.code(), "translation failed: {}", err);
                Some(Notification::TranslationFailed)
            }
        };

        drop(guard);

        notification
    }

    /// Runs `pending` to completion and merges the result.
    pub async fn complete(&mut self, pending: PendingTranslation) -> Option<Notification> {
        let done = pending.run(&self.translator).await;
        self.finish(done)
    }
}
