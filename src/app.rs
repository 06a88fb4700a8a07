use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::api::{ApiClient, ApiConfig};
use crate::application::{DownloadTrigger, SubmissionOutcome, SubmissionWorkflow};
use crate::domain::{AudioFormat, BackgroundMode};
use crate::i18n::{resolve_initial_language, Language, LocaleResolver};
use crate::storage::{PreferenceStore, PREFERRED_BACKGROUND_KEY, PREFERRED_LANGUAGE_KEY};
use crate::ui::showcase::{SectionOverride, ShowcaseSection};
use crate::ui::SharedPage;

/// Wires the locale resolver, the submission workflow and the embedded
/// showcase section to one page.
///
/// Startup order matters and is fixed by [`initialize`](Self::initialize):
/// stored background first, then the initial language (stored preference,
/// browser tag, default), then a full translation pass. The showcase
/// section follows language changes through the resolver's broadcast, the
/// same notification a host shell can subscribe to.
pub struct PageController {
    i18n: LocaleResolver,
    workflow: SubmissionWorkflow,
    store: Arc<dyn PreferenceStore>,
    page: SharedPage,
    showcase: Arc<Mutex<ShowcaseSection>>,
    listener: JoinHandle<()>,
}

impl PageController {
    /// Must be called from within a runtime; the showcase listener task is
    /// spawned here.
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn PreferenceStore>,
        page: SharedPage,
        trigger: Arc<dyn DownloadTrigger>,
        showcase_overrides: HashMap<Language, SectionOverride>,
    ) -> Self {
        let api = ApiClient::new(config);
        let i18n = LocaleResolver::new(api.clone(), store.clone());
        let workflow = SubmissionWorkflow::new(api, i18n.clone(), page.clone(), trigger);
        let showcase = Arc::new(Mutex::new(ShowcaseSection::new(
            crate::i18n::DEFAULT_LANGUAGE,
            showcase_overrides,
        )));
        let listener = spawn_language_listener(&i18n, showcase.clone());

        Self {
            i18n,
            workflow,
            store,
            page,
            showcase,
            listener,
        }
    }

    /// Bootstrap the page. Returns the resolved initial language.
    pub async fn initialize(&self, browser_language: Option<&str>) -> Language {
        let background = self
            .store
            .get(PREFERRED_BACKGROUND_KEY)
            .map(|code| BackgroundMode::normalize(&code))
            .unwrap_or(BackgroundMode::Night);
        self.page.lock().await.set_background(background);

        let stored = self.store.get(PREFERRED_LANGUAGE_KEY);
        let initial = resolve_initial_language(stored.as_deref(), browser_language);
        self.i18n.apply_translations(initial, &self.page).await;
        initial
    }

    /// Language selector change handler.
    pub async fn language_selected(&self, code: &str) {
        let lang = Language::normalize(code);
        self.i18n.apply_translations(lang, &self.page).await;
    }

    /// Background selector change handler. Persisting is best effort.
    pub async fn background_selected(&self, code: &str) {
        let mode = BackgroundMode::normalize(code);
        self.page.lock().await.set_background(mode);
        if let Err(err) = self.store.set(PREFERRED_BACKGROUND_KEY, mode.as_str()) {
            log::debug!("could not persist background preference: {}", err);
        }
    }

    /// Download form submit handler.
    pub async fn submit(&self, url: &str, format: AudioFormat) -> SubmissionOutcome {
        self.workflow.submit(url, format).await
    }

    pub fn locale(&self) -> &LocaleResolver {
        &self.i18n
    }

    pub fn showcase(&self) -> Arc<Mutex<ShowcaseSection>> {
        self.showcase.clone()
    }

    /// Page teardown: stop following language changes and let an in-flight
    /// drain finish.
    pub async fn shutdown(self) {
        self.listener.abort();
        self.workflow.finish_drain().await;
    }
}

fn spawn_language_listener(
    i18n: &LocaleResolver,
    showcase: Arc<Mutex<ShowcaseSection>>,
) -> JoinHandle<()> {
    let mut events = i18n.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(lang) => showcase
                    .lock()
                    .expect("showcase lock poisoned")
                    .on_language_change(lang),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
