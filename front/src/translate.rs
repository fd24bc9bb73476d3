use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use lingo_api::v1::{Language, TodoId};
use serde_json::Value;

use crate::config::Config;

pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("translation service answered with status {0}")]
    Status(Value),
    #[error("translation service sent an unexpected response")]
    Malformed,
}

/// Client for the MyMemory style `GET ?q=..&langpair=en|xx` translation API.
#[derive(Clone, Debug)]
pub struct TranslationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TranslationClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> eyre::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        Self::new(&config.translate_url, config.request_timeout())
    }

    /// Translates English `text` into `language`. Makes exactly one request.
    pub async fn translate(&self, text: &str, language: Language) -> Result<String, TranslateError> {
        let langpair = language.langpair();

        tracing::debug!(langpair = %langpair, "requesting translation");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        let body = response.text().await?;

        parse_response(&body)
    }
}

// the service reports failures in the body, whatever the HTTP status
fn parse_response(body: &str) -> Result<String, TranslateError> {
    let value: Value = serde_json::from_str(body).map_err(|_| TranslateError::Malformed)?;

    match value.get("responseStatus") {
        Some(status) if status.as_i64() == Some(200) => {}
        status => return Err(TranslateError::Status(status.cloned().unwrap_or_default())),
    }

    value
        .pointer("/responseData/translatedText")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
        .ok_or(TranslateError::Malformed)
}

/// Todos with a translation request currently running.
#[derive(Clone, Debug, Default)]
pub struct InFlight {
    ids: Arc<Mutex<HashSet<TodoId>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as busy, or returns `None` if it already is.
    ///
    /// The mark is cleared when the returned guard is dropped.
    pub fn try_begin(&self, id: &TodoId) -> Option<InFlightGuard> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);

        if !ids.insert(id.clone()) {
            return None;
        }

        Some(InFlightGuard {
            ids: self.ids.clone(),
            id: id.clone(),
        })
    }

    pub fn contains(&self, id: &TodoId) -> bool {
        let ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        let ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        ids.is_empty()
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<TodoId>>>,
    id: TodoId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        ids.remove(&self.id);
    }
}

/// A translation that has been admitted but not yet sent.
#[derive(Debug)]
pub struct PendingTranslation {
    pub id: TodoId,
    pub language: Language,
    /// The todo's original text at the time of the request.
    pub source: String,
    guard: InFlightGuard,
}

impl PendingTranslation {
    pub(crate) fn new(id: TodoId, language: Language, source: String, guard: InFlightGuard) -> Self {
        Self {
            id,
            language,
            source,
            guard,
        }
    }

    pub async fn run(self, client: &TranslationClient) -> TranslationDone {
        let result = client.translate(&self.source, self.language).await;

        TranslationDone {
            id: self.id,
            language: self.language,
            source: self.source,
            result,
            guard: self.guard,
        }
    }
}

/// Outcome of a [`PendingTranslation`]. The todo stays busy until this is dropped.
#[derive(Debug)]
pub struct TranslationDone {
    pub id: TodoId,
    pub language: Language,
    pub source: String,
    pub result: Result<String, TranslateError>,
    guard: InFlightGuard,
}

impl TranslationDone {
    pub(crate) fn into_parts(
        self,
    ) -> (TodoId, Language, String, Result<String, TranslateError>, InFlightGuard) {
        (self.id, self.language, self.source, self.result, self.guard)
    }
}
