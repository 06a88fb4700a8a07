//! Embedded marketing section: per-language heading/card/stat copy with
//! field-level overrides merged over built-in defaults.
//!
//! The section is presentational; this module only owns its content
//! resolution and its reaction to language-change notifications.

use std::collections::HashMap;

use serde::Deserialize;

use crate::i18n::Language;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardCopy {
    pub title: String,
    pub description: String,
    pub badge: String,
    /// Gradient class applied behind the card.
    pub tone: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatCopy {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContent {
    pub heading: String,
    pub subheading: String,
    pub cards: Vec<CardCopy>,
    pub stats: Vec<StatCopy>,
}

/// Optional per-language replacement copy. Missing fields fall back to the
/// built-in content for that language.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionOverride {
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub cards: Option<Vec<CardCopy>>,
    pub stats: Option<Vec<StatCopy>>,
}

pub struct ShowcaseSection {
    content: HashMap<Language, SectionContent>,
    active: Language,
}

impl ShowcaseSection {
    pub fn new(initial: Language, overrides: HashMap<Language, SectionOverride>) -> Self {
        let mut content = HashMap::new();
        for lang in Language::ALL {
            let base = builtin(lang);
            let merged = match overrides.get(&lang) {
                Some(over) => SectionContent {
                    heading: over.heading.clone().unwrap_or(base.heading),
                    subheading: over.subheading.clone().unwrap_or(base.subheading),
                    cards: over.cards.clone().unwrap_or(base.cards),
                    stats: over.stats.clone().unwrap_or(base.stats),
                },
                None => base,
            };
            content.insert(lang, merged);
        }
        Self {
            content,
            active: initial,
        }
    }

    pub fn active_language(&self) -> Language {
        self.active
    }

    pub fn content(&self) -> &SectionContent {
        &self.content[&self.active]
    }

    /// Language-change notification handler.
    pub fn on_language_change(&mut self, lang: Language) {
        self.active = lang;
    }
}

/// Built-in copy. Languages without their own set share the English one.
fn builtin(lang: Language) -> SectionContent {
    match lang {
        Language::En | Language::Az | Language::Tr => SectionContent {
            heading: "Level up your downloader with showcase sections".to_string(),
            subheading: "Blend bento grids, spotlights and playful badges to highlight what makes MusicJack special.".to_string(),
            cards: vec![
                CardCopy {
                    title: "Bento download presets".to_string(),
                    description: "Highlight MP3, M4A, Opus or MP4 workflows with gradient badges and emoji accents.".to_string(),
                    badge: "Preset Grid".to_string(),
                    tone: "from-cyan-400/50 via-sky-500/30 to-blue-600/40".to_string(),
                    icon: "🎚️".to_string(),
                },
                CardCopy {
                    title: "Spotlight instructions".to_string(),
                    description: "Guide users through copyright-safe usage with glow effects and layered cards.".to_string(),
                    badge: "Spotlight".to_string(),
                    tone: "from-fuchsia-500/40 via-purple-500/25 to-indigo-600/30".to_string(),
                    icon: "🔦".to_string(),
                },
                CardCopy {
                    title: "Story-driven updates".to_string(),
                    description: "Use blog cards to tease release notes or link to Telegram announcements.".to_string(),
                    badge: "Release Feed".to_string(),
                    tone: "from-emerald-400/40 via-green-500/40 to-lime-500/30".to_string(),
                    icon: "📻".to_string(),
                },
            ],
            stats: vec![
                StatCopy { label: "Daily conversions".to_string(), value: "12K+".to_string() },
                StatCopy { label: "Avg. latency".to_string(), value: "1.4s".to_string() },
                StatCopy { label: "Global locales".to_string(), value: "15".to_string() },
            ],
        },
        Language::Ru => SectionContent {
            heading: "Укрась раздел сайта витринными секциями".to_string(),
            subheading: "Комбинируй bento-сетки, световые эффекты и бейджи, чтобы выделить преимущества MusicJack.".to_string(),
            cards: vec![
                CardCopy {
                    title: "Готовые пресеты загрузки".to_string(),
                    description: "Покажи варианты MP3/M4A/Opus/MP4 с цветными бейджами и иконками.".to_string(),
                    badge: "Bento".to_string(),
                    tone: "from-cyan-400/50 via-sky-500/30 to-blue-600/40".to_string(),
                    icon: "🎚️".to_string(),
                },
                CardCopy {
                    title: "Подсветка инструкций".to_string(),
                    description: "Расскажи об авторских правах и правилах через карточки со световым акцентом.".to_string(),
                    badge: "Glow".to_string(),
                    tone: "from-fuchsia-500/40 via-purple-500/25 to-indigo-600/30".to_string(),
                    icon: "🔦".to_string(),
                },
                CardCopy {
                    title: "Новостная лента".to_string(),
                    description: "Собери мини-блог о релизах и веди пользователей в Telegram.".to_string(),
                    badge: "Updates".to_string(),
                    tone: "from-emerald-400/40 via-green-500/40 to-lime-500/30".to_string(),
                    icon: "📻".to_string(),
                },
            ],
            stats: vec![
                StatCopy { label: "Ежедневные загрузки".to_string(), value: "12K+".to_string() },
                StatCopy { label: "Среднее ожидание".to_string(), value: "1.4s".to_string() },
                StatCopy { label: "Доступных языков".to_string(), value: "15".to_string() },
            ],
        },
        Language::Es => SectionContent {
            heading: "Destaca tu app con tarjetas de escaparate".to_string(),
            subheading: "Crea bloques editoriales, grids modernos y tarjetas brillantes para tus guías de descarga.".to_string(),
            cards: vec![
                CardCopy {
                    title: "Colección de formatos".to_string(),
                    description: "Presenta los formatos MP3/M4A/Opus/MP4 con fichas suaves y degradados.".to_string(),
                    badge: "Colección".to_string(),
                    tone: "from-cyan-400/50 via-sky-500/30 to-blue-600/40".to_string(),
                    icon: "🎚️".to_string(),
                },
                CardCopy {
                    title: "Consejos iluminados".to_string(),
                    description: "Explica buenas prácticas con tarjetas que reaccionan al cursor y sombras fluidas.".to_string(),
                    badge: "Consejos".to_string(),
                    tone: "from-fuchsia-500/40 via-purple-500/25 to-indigo-600/30".to_string(),
                    icon: "🔦".to_string(),
                },
                CardCopy {
                    title: "Historias del blog".to_string(),
                    description: "Conecta tus novedades o campañas con layouts editoriales.".to_string(),
                    badge: "Historias".to_string(),
                    tone: "from-emerald-400/40 via-green-500/40 to-lime-500/30".to_string(),
                    icon: "📻".to_string(),
                },
            ],
            stats: vec![
                StatCopy { label: "Conversiones/día".to_string(), value: "12K+".to_string() },
                StatCopy { label: "Latencia media".to_string(), value: "1.4s".to_string() },
                StatCopy { label: "Idiomas activos".to_string(), value: "15".to_string() },
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_without_own_copy_share_english() {
        let section = ShowcaseSection::new(Language::Tr, HashMap::new());
        assert_eq!(section.content(), &builtin(Language::En));
    }

    #[test]
    fn test_override_merges_field_by_field() {
        let mut overrides = HashMap::new();
        overrides.insert(
            Language::Ru,
            SectionOverride {
                heading: Some("Новый заголовок".to_string()),
                ..Default::default()
            },
        );

        let section = ShowcaseSection::new(Language::Ru, overrides);
        let content = section.content();
        assert_eq!(content.heading, "Новый заголовок");
        // Untouched fields keep the Russian built-ins.
        assert_eq!(content.cards, builtin(Language::Ru).cards);
        assert_eq!(content.stats, builtin(Language::Ru).stats);
    }

    #[test]
    fn test_language_change_swaps_content() {
        let mut section = ShowcaseSection::new(Language::En, HashMap::new());
        section.on_language_change(Language::Es);
        assert_eq!(section.active_language(), Language::Es);
        assert_eq!(section.content(), &builtin(Language::Es));
    }

    #[test]
    fn test_override_parses_from_json() {
        let over: SectionOverride = serde_json::from_str(
            r#"{"stats": [{"label": "Uptime", "value": "99.9%"}]}"#,
        )
        .unwrap();
        let mut overrides = HashMap::new();
        overrides.insert(Language::En, over);

        let section = ShowcaseSection::new(Language::En, overrides);
        assert_eq!(section.content().stats[0].value, "99.9%");
        assert_eq!(section.content().heading, builtin(Language::En).heading);
    }
}
