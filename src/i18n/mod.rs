//! Locale resolution, bundle loading and text lookup.
//!
//! One resolver instance owns the process-wide locale state: the active
//! language, the cached bundles and the in-flight loads. Bundles are fetched
//! on demand, cached for the page session and never evicted. Concurrent
//! loads for the same language are single-flight: callers join the same
//! in-flight fetch instead of issuing duplicates.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::api::ApiClient;
use crate::storage::{PreferenceStore, PREFERRED_LANGUAGE_KEY};
use crate::ui::{SharedPage, TextDirection};

/// Translation keys the controller and workflow look up.
pub mod keys {
    pub const STATUS_ERROR_URL: &str = "statusErrorUrl";
    pub const STATUS_PROCESSING: &str = "statusProcessing";
    pub const STATUS_SUCCESS_HEADER: &str = "statusSuccessHeader";
    pub const STATUS_POST_DOWNLOAD_HINT: &str = "statusPostDownloadHint";
    pub const STATUS_ERROR_GENERIC: &str = "statusErrorGeneric";
    pub const STATUS_NETWORK_ERROR: &str = "statusNetworkError";
    pub const FILE_STATUS_PENDING: &str = "fileStatusPending";
    pub const FILE_STATUS_DOWNLOADING: &str = "fileStatusDownloading";
    pub const FILE_STATUS_STARTED: &str = "fileStatusStarted";
}

pub const DEFAULT_LANGUAGE: Language = Language::En;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Ru,
    Es,
    Az,
    Tr,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Ru,
        Language::Es,
        Language::Az,
        Language::Tr,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Es => "es",
            Language::Az => "az",
            Language::Tr => "tr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Map any unsupported or empty code to the default language.
    pub fn normalize(code: &str) -> Self {
        Self::from_code(code).unwrap_or(DEFAULT_LANGUAGE)
    }

    /// All currently supported languages are written left to right.
    pub fn direction(self) -> TextDirection {
        TextDirection::LeftToRight
    }
}

/// Pick the startup language: a valid stored preference wins, then the
/// primary subtag of the browser tag, then the default. Never fails.
pub fn resolve_initial_language(stored: Option<&str>, browser_tag: Option<&str>) -> Language {
    if let Some(lang) = stored.and_then(Language::from_code) {
        return lang;
    }
    if let Some(lang) = browser_tag
        .map(|tag| tag.split('-').next().unwrap_or(""))
        .and_then(Language::from_code)
    {
        return lang;
    }
    DEFAULT_LANGUAGE
}

/// Key → localized string map for one language. Values may embed markup.
pub type LocaleBundle = HashMap<String, String>;

#[derive(Debug, Clone, Error)]
#[error("failed to load locale {code}: {reason}")]
pub struct LoadError {
    pub code: &'static str,
    pub reason: String,
}

type SharedLoad = Shared<BoxFuture<'static, Result<Arc<LocaleBundle>, LoadError>>>;

struct LocaleState {
    current: Language,
    loaded: HashMap<Language, Arc<LocaleBundle>>,
    pending: HashMap<Language, SharedLoad>,
}

#[derive(Clone)]
pub struct LocaleResolver {
    client: ApiClient,
    store: Arc<dyn PreferenceStore>,
    state: Arc<Mutex<LocaleState>>,
    events: broadcast::Sender<Language>,
}

impl LocaleResolver {
    pub fn new(client: ApiClient, store: Arc<dyn PreferenceStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            client,
            store,
            state: Arc::new(Mutex::new(LocaleState {
                current: DEFAULT_LANGUAGE,
                loaded: HashMap::new(),
                pending: HashMap::new(),
            })),
            events,
        }
    }

    pub fn current_language(&self) -> Language {
        self.lock_state().current
    }

    /// Subscribe to language-change notifications. The payload is the
    /// resolved language after `apply_translations` completes.
    pub fn subscribe(&self) -> broadcast::Receiver<Language> {
        self.events.subscribe()
    }

    /// Load the bundle for a language, joining an in-flight load if one
    /// exists. On failure the in-flight marker is cleared so a later call
    /// retries the fetch.
    pub async fn load_locale(&self, lang: Language) -> Result<Arc<LocaleBundle>, LoadError> {
        let load = {
            let mut state = self.lock_state();
            if let Some(bundle) = state.loaded.get(&lang) {
                return Ok(bundle.clone());
            }
            match state.pending.get(&lang) {
                Some(load) => load.clone(),
                None => {
                    let client = self.client.clone();
                    let shared_state = self.state.clone();
                    let load: SharedLoad = async move {
                        let result = client
                            .fetch_locale_bundle(lang.code())
                            .await
                            .map(Arc::new)
                            .map_err(|e| LoadError {
                                code: lang.code(),
                                reason: e.to_string(),
                            });
                        let mut state = shared_state
                            .lock()
                            .expect("locale state lock poisoned");
                        state.pending.remove(&lang);
                        if let Ok(bundle) = &result {
                            state.loaded.insert(lang, bundle.clone());
                        }
                        result
                    }
                    .boxed()
                    .shared();
                    state.pending.insert(lang, load.clone());
                    load
                }
            }
        };
        load.await
    }

    /// Like [`load_locale`](Self::load_locale) but recovers from failure:
    /// a non-default language falls back to the default, and if the default
    /// cannot be loaded either the result is an empty bundle, leaving the
    /// page to display literal keys.
    pub async fn ensure_locale(&self, lang: Language) -> Arc<LocaleBundle> {
        match self.load_locale(lang).await {
            Ok(bundle) => bundle,
            Err(err) => {
                log::warn!("{}", err);
                if lang != DEFAULT_LANGUAGE {
                    if let Ok(bundle) = self.load_locale(DEFAULT_LANGUAGE).await {
                        return bundle;
                    }
                }
                self.lock_state()
                    .loaded
                    .get(&DEFAULT_LANGUAGE)
                    .cloned()
                    .unwrap_or_default()
            }
        }
    }

    /// Look up a key in the active language.
    pub fn translate(&self, key: &str) -> String {
        self.translate_in(key, self.current_language())
    }

    pub fn translate_in(&self, key: &str, lang: Language) -> String {
        self.translate_with(key, lang, &[])
    }

    /// Look up a key with placeholder substitution. Resolution order:
    /// requested bundle, default bundle, the key itself. Each replacement
    /// substitutes only the first occurrence of its `{NAME}` token.
    pub fn translate_with(&self, key: &str, lang: Language, replacements: &[(&str, &str)]) -> String {
        let mut text = {
            let state = self.lock_state();
            let active = state.loaded.get(&lang).and_then(|b| b.get(key));
            let fallback = state.loaded.get(&DEFAULT_LANGUAGE).and_then(|b| b.get(key));
            active
                .or(fallback)
                .cloned()
                .unwrap_or_else(|| key.to_string())
        };
        for (name, value) in replacements {
            let token = format!("{{{}}}", name);
            text = text.replacen(&token, value, 1);
        }
        text
    }

    /// Switch the page to a language: ensure the target and default bundles,
    /// set the active language, persist the preference (best effort), update
    /// the document attributes, rewrite every tagged element and broadcast
    /// the change.
    pub async fn apply_translations(&self, lang: Language, page: &SharedPage) {
        self.ensure_locale(lang).await;
        if lang != DEFAULT_LANGUAGE {
            self.ensure_locale(DEFAULT_LANGUAGE).await;
        }

        self.lock_state().current = lang;
        if let Err(err) = self.store.set(PREFERRED_LANGUAGE_KEY, lang.code()) {
            log::debug!("could not persist language preference: {}", err);
        }

        {
            let mut page = page.lock().await;
            page.set_document_language(lang.code(), lang.direction());
            for key in page.translation_keys() {
                let text = self.translate_in(&key, lang);
                page.write_translation(&key, &text);
            }
        }

        // No receivers is fine; the embedded section may not be mounted.
        let _ = self.events.send(lang);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, LocaleState> {
        self.state.lock().expect("locale state lock poisoned")
    }
}
