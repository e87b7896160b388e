use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{LookupError, Result};
use crate::model::{
    ConjugationSet, ExampleSentence, GlossedExample, Meaning, ResourceBundle,
    SecondaryDictionaryResult, TenseForms, WordAssociation, WordRecord,
};
use crate::resolver::LookupKind;
use crate::wire;

/// Raw sub-lookup payloads, keyed by lookup, next to the word that gated them.
#[derive(Debug)]
pub struct RawResults {
    word: WordRecord,
    payloads: HashMap<LookupKind, Value>,
}

impl RawResults {
    pub fn new(word: WordRecord, payloads: impl IntoIterator<Item = (LookupKind, Value)>) -> Self {
        Self {
            word,
            payloads: payloads.into_iter().collect(),
        }
    }

    fn take<T: DeserializeOwned>(&mut self, kind: LookupKind) -> Result<T> {
        let value = self
            .payloads
            .remove(&kind)
            .ok_or_else(|| LookupError::data_shape(kind.name(), "no payload was collected"))?;
        decode(kind.name(), value)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(lookup: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| LookupError::data_shape(lookup, err.to_string()))
}

/// Normalizes every raw payload into one bundle.
pub fn normalize(mut raw: RawResults) -> Result<ResourceBundle> {
    let phonetics: Vec<wire::Phonetic> = raw.take(LookupKind::Phonetic)?;
    let secondary: wire::FaztaaSearch = raw.take(LookupKind::SecondaryDictionary)?;
    let examples: Vec<wire::Sentence> = raw.take(LookupKind::Examples)?;
    let membership: wire::Membership = raw.take(LookupKind::Membership)?;

    let conjugation = if raw.word.category.is_verb() {
        let tenses: Vec<wire::Conjugation> = raw.take(LookupKind::Conjugation)?;
        Some(ConjugationSet {
            tenses: tenses.into_iter().map(TenseForms::from).collect(),
        })
    } else {
        None
    };

    Ok(ResourceBundle {
        word: raw.word,
        examples: examples.into_iter().map(example_sentence).collect(),
        phonetics: phonetics.into_iter().map(|entry| entry.ipa).collect(),
        secondary: first_secondary_result(secondary)?,
        in_deck: membership.is_member(),
        conjugation,
    })
}

fn first_secondary_result(search: wire::FaztaaSearch) -> Result<SecondaryDictionaryResult> {
    let lookup = LookupKind::SecondaryDictionary.name();
    let first = search
        .result
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::data_shape(lookup, "result list is empty"))?;
    let content = first
        .content
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::data_shape(lookup, "first result has no content"))?;
    let meanings = content
        .means
        .into_iter()
        .map(|mean| Meaning {
            gloss: mean.mean,
            examples: mean
                .examples
                .into_iter()
                .map(|example| GlossedExample {
                    text: example.e,
                    gloss: example.m,
                })
                .collect(),
        })
        .collect();
    Ok(SecondaryDictionaryResult { meanings })
}

fn example_sentence(sentence: wire::Sentence) -> ExampleSentence {
    ExampleSentence {
        text: sentence.target_text,
        literal_gloss: sentence.literal_source.unwrap_or_default(),
        associations: sentence
            .word_associations
            .into_iter()
            .map(|association| WordAssociation {
                form: association.word.target_text,
                root_id: association.word.root_word.map(|root| root.id),
            })
            .collect(),
    }
}
