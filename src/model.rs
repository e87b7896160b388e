use std::fmt;

use serde::Serialize;

use crate::wire;

/// Grammatical class of a word, decoded from the service abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LexicalCategory {
    Noun,
    Adjective,
    Adverb,
    Verb,
    Other(String),
}

impl LexicalCategory {
    pub fn from_abbreviation(abbreviation: &str) -> Self {
        match abbreviation {
            "noun" => LexicalCategory::Noun,
            "adj" => LexicalCategory::Adjective,
            "adv" => LexicalCategory::Adverb,
            "vrb" => LexicalCategory::Verb,
            other => LexicalCategory::Other(other.to_string()),
        }
    }

    pub fn abbreviation(&self) -> &str {
        match self {
            LexicalCategory::Noun => "noun",
            LexicalCategory::Adjective => "adj",
            LexicalCategory::Adverb => "adv",
            LexicalCategory::Verb => "vrb",
            LexicalCategory::Other(other) => other,
        }
    }

    /// Label shown in front of the category name in report headings.
    pub fn short_label(&self) -> &str {
        match self {
            LexicalCategory::Noun => "N",
            LexicalCategory::Adjective => "A",
            LexicalCategory::Adverb => "Adv",
            LexicalCategory::Verb => "V",
            LexicalCategory::Other(other) => other,
        }
    }

    pub fn is_verb(&self) -> bool {
        matches!(self, LexicalCategory::Verb)
    }

    pub fn is_noun(&self) -> bool {
        matches!(self, LexicalCategory::Noun)
    }
}

impl fmt::Display for LexicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Feminine,
    Masculine,
    Neuter,
}

impl Gender {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "feminine" => Some(Gender::Feminine),
            "masculine" => Some(Gender::Masculine),
            "neuter" => Some(Gender::Neuter),
            _ => None,
        }
    }

    /// Article ending used as a compact gender marker (die → `e`, der → `r`, das → `s`).
    pub fn marker(&self) -> &'static str {
        match self {
            Gender::Feminine => "e",
            Gender::Masculine => "r",
            Gender::Neuter => "s",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationEntry {
    pub source: String,
    pub text: String,
    pub rejected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordRecord {
    pub id: String,
    pub text: String,
    pub category: LexicalCategory,
    pub category_name: String,
    pub gender: Option<Gender>,
    pub plural_forms: Vec<String>,
    pub no_plural: bool,
    pub level: Option<String>,
    pub learned: bool,
    pub reviewing: bool,
    pub translations: Vec<TranslationEntry>,
}

pub const PRIMARY_SOURCE: &str = "seedlang";

impl From<wire::Word> for WordRecord {
    fn from(word: wire::Word) -> Self {
        let category = LexicalCategory::from_abbreviation(&word.word_type.abbreviation);
        let category_name = word
            .word_type
            .name
            .unwrap_or_else(|| word.word_type.abbreviation.clone());
        Self {
            id: word.id,
            text: word.target_text,
            category,
            category_name,
            gender: word.gender.as_deref().and_then(Gender::parse),
            plural_forms: word
                .plural_nouns
                .into_iter()
                .map(|plural| plural.target_text)
                .collect(),
            no_plural: word.no_plural,
            level: word.level.map(|level| level.abbreviation),
            learned: word.learned,
            reviewing: word.reviewing,
            translations: word
                .translation_sources
                .into_iter()
                .map(|translation| TranslationEntry {
                    source: PRIMARY_SOURCE.to_string(),
                    text: translation.source.text,
                    rejected: translation.rejected,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordAssociation {
    pub form: String,
    pub root_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleSentence {
    pub text: String,
    pub literal_gloss: String,
    /// One association per whitespace-separated token of `text`, in order.
    pub associations: Vec<WordAssociation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossedExample {
    pub text: String,
    pub gloss: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meaning {
    pub gloss: String,
    pub examples: Vec<GlossedExample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondaryDictionaryResult {
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Person {
    Singular1,
    Singular2,
    Plural2,
    Singular3,
    Plural1,
}

impl Person {
    /// Row order of the conjugation table.
    pub const ALL: [Person; 5] = [
        Person::Singular1,
        Person::Singular2,
        Person::Plural2,
        Person::Singular3,
        Person::Plural1,
    ];

    pub fn pronouns(&self) -> &'static str {
        match self {
            Person::Singular1 => "ich",
            Person::Singular2 => "du",
            Person::Plural2 => "ihr",
            Person::Singular3 => "er/sie/es",
            Person::Plural1 => "wir/sie/Sie",
        }
    }

    fn index(self) -> usize {
        match self {
            Person::Singular1 => 0,
            Person::Singular2 => 1,
            Person::Plural2 => 2,
            Person::Singular3 => 3,
            Person::Plural1 => 4,
        }
    }
}

/// Surface forms of one tense/mood concept, one per person slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenseForms {
    pub concept: String,
    forms: [String; 5],
}

impl TenseForms {
    pub fn new(concept: impl Into<String>, forms: [String; 5]) -> Self {
        Self {
            concept: concept.into(),
            forms,
        }
    }

    pub fn form(&self, person: Person) -> &str {
        &self.forms[person.index()]
    }
}

impl From<wire::Conjugation> for TenseForms {
    fn from(raw: wire::Conjugation) -> Self {
        let mut forms: [String; 5] = Default::default();
        let slots = [
            (Person::Singular1, raw.singular_1p),
            (Person::Singular2, raw.singular_2p),
            (Person::Plural2, raw.plural_2p),
            (Person::Singular3, raw.singular_3p),
            (Person::Plural1, raw.plural_1p),
        ];
        for (person, form) in slots {
            forms[person.index()] = form.unwrap_or_default();
        }
        Self::new(raw.concept.name, forms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConjugationSet {
    pub tenses: Vec<TenseForms>,
}

/// Everything known about one word, merged from all sources.
///
/// Built only by [`crate::merge::normalize`], which guarantees that
/// `conjugation` is present exactly when the word is a verb.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceBundle {
    pub(crate) word: WordRecord,
    pub(crate) examples: Vec<ExampleSentence>,
    pub(crate) phonetics: Vec<String>,
    pub(crate) secondary: SecondaryDictionaryResult,
    pub(crate) in_deck: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) conjugation: Option<ConjugationSet>,
}

impl ResourceBundle {
    pub fn word(&self) -> &WordRecord {
        &self.word
    }

    pub fn translations(&self) -> &[TranslationEntry] {
        &self.word.translations
    }

    pub fn examples(&self) -> &[ExampleSentence] {
        &self.examples
    }

    pub fn phonetics(&self) -> &[String] {
        &self.phonetics
    }

    pub fn secondary(&self) -> &SecondaryDictionaryResult {
        &self.secondary
    }

    pub fn in_deck(&self) -> bool {
        self.in_deck
    }

    pub fn conjugation(&self) -> Option<&ConjugationSet> {
        self.conjugation.as_ref()
    }
}
