//! Response schemas of the remote services, as they arrive on the wire.
//!
//! Only the fields the lookup pipeline consumes are declared; everything else
//! in the payloads is ignored by serde.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct Word {
    pub id: String,
    pub target_text: String,
    pub word_type: WordType,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub plural_nouns: Vec<TextOnly>,
    #[serde(default)]
    pub no_plural: bool,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub learned: bool,
    #[serde(default)]
    pub reviewing: bool,
    #[serde(default)]
    pub translation_sources: Vec<TranslationSource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WordType {
    pub abbreviation: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Level {
    pub abbreviation: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextOnly {
    pub target_text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranslationSource {
    pub source: SourceText,
    #[serde(default)]
    pub rejected: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SourceText {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Phonetic {
    pub ipa: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaztaaSearch {
    pub result: Vec<FaztaaResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaztaaResult {
    #[serde(default)]
    pub content: Vec<FaztaaContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaztaaContent {
    #[serde(default)]
    pub means: Vec<FaztaaMean>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaztaaMean {
    pub mean: String,
    #[serde(default)]
    pub examples: Vec<FaztaaExample>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaztaaExample {
    pub e: String,
    #[serde(default)]
    pub m: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Sentence {
    pub target_text: String,
    #[serde(default)]
    pub literal_source: Option<String>,
    #[serde(default)]
    pub word_associations: Vec<WordAssociation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WordAssociation {
    pub word: AssociatedWord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssociatedWord {
    pub target_text: String,
    #[serde(default)]
    pub root_word: Option<RootWord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RootWord {
    pub id: String,
}

/// The cards endpoint answers either with a bare list or with a paginated
/// envelope. Variant order matters: a JSON array must be tried as `Bare`
/// first, since serde structs also accept sequences.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Membership {
    Bare(Vec<Value>),
    Envelope { data: Vec<Value> },
}

impl Membership {
    pub fn is_member(&self) -> bool {
        match self {
            Membership::Bare(cards) | Membership::Envelope { data: cards } => !cards.is_empty(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Conjugation {
    pub concept: Concept,
    #[serde(default)]
    pub singular_1p: Option<String>,
    #[serde(default)]
    pub singular_2p: Option<String>,
    #[serde(default)]
    pub singular_3p: Option<String>,
    #[serde(default)]
    pub plural_1p: Option<String>,
    #[serde(default)]
    pub plural_2p: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Concept {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DueCards {
    pub count: u64,
    pub review_cards_count: u64,
}
