pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod merge;
pub mod model;
pub mod render;
pub mod resolver;
pub mod review;
mod wire;

#[cfg(test)]
mod test_utils;

pub use client::{EndpointClient, Transport};
pub use config::{Endpoints, LookupConfig, Session};
pub use dispatch::Dispatcher;
pub use error::{LookupError, Result};
pub use merge::{RawResults, normalize};
pub use model::{
    ConjugationSet, ExampleSentence, Gender, LexicalCategory, Person, ResourceBundle,
    SecondaryDictionaryResult, TranslationEntry, WordRecord,
};
pub use render::{Fragment, Section, render};
pub use resolver::{LookupKind, SubLookup, plan_lookups};

/// Fetches everything about one word over HTTP with the given configuration.
pub fn gather_word_resources(config: &LookupConfig, word_id: &str) -> Result<ResourceBundle> {
    let client = EndpointClient::new(&config.session, config.timeout)?;
    Dispatcher::new(&client, config)?.gather_word_resources(word_id)
}
