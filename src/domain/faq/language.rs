//! Supported content languages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Language an FAQ can be authored in or served in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English, served from the original fields
    #[default]
    En,
    /// Hindi
    Hi,
    /// Bengali
    Bn,
}

impl Language {
    /// Every language the service knows about
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Bn];

    /// Languages that have dedicated translated fields on an FAQ
    pub const TRANSLATION_TARGETS: [Language; 2] = [Language::Hi, Language::Bn];

    /// Two-letter code used in query strings and cache keys
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Bn => "bn",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "hi" => Ok(Self::Hi),
            "bn" => Ok(Self::Bn),
            _ => {
                let codes: Vec<&str> = Self::ALL.iter().map(Language::code).collect();
                Err(DomainError::invalid_language(s, codes.as_slice()))
            }
        }
    }
}
