use std::{fmt, str::FromStr};

/// Language the todo text is assumed to be written in.
pub const SOURCE_LANGUAGE: &str = "en";

/// Languages a todo can be translated into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
    Japanese,
    Korean,
    Chinese,
    Arabic,
    Hindi,
    Dutch,
}

impl Language {
    pub const ALL: [Language; 12] = [
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Russian,
        Language::Japanese,
        Language::Korean,
        Language::Chinese,
        Language::Arabic,
        Language::Hindi,
        Language::Dutch,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Chinese => "zh",
            Language::Arabic => "ar",
            Language::Hindi => "hi",
            Language::Dutch => "nl",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Chinese => "Chinese",
            Language::Arabic => "Arabic",
            Language::Hindi => "Hindi",
            Language::Dutch => "Dutch",
        }
    }

    /// The `langpair` query value for translating from [`SOURCE_LANGUAGE`].
    pub fn langpair(self) -> String {
        format!("{}|{}", SOURCE_LANGUAGE, self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language `{0}`")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts either the code (`es`) or the display name (`Spanish`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(needle) || lang.name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}
