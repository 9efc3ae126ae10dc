//! Translation domain - Contract for the external translation provider

mod provider;

pub use provider::Translator;

#[cfg(test)]
pub use provider::MockTranslator;
