use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::client::Transport;
use crate::config::{Endpoints, LookupConfig, Session};
use crate::error::{LookupError, Result};
use crate::merge::{RawResults, normalize};
use crate::model::{ResourceBundle, WordRecord};
use crate::resolver::LookupKind;
use crate::wire;

/// In-memory transport answering from canned payloads.
///
/// A request is answered by the registered fragment that is the longest
/// substring of its URL.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Vec<(String, Value)>,
    failures: Vec<String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
    submissions: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_fixtures() -> Self {
        Self::new()
            .respond("/api/words/W1", noun_payload())
            .respond("/api/words/W2", verb_payload())
            .respond("/conjugated_verb_strings", conjugation_payload())
            .respond("/api/ipa/", json!([{"ipa": "ˈkat͡sə"}]))
            .respond("/api/search/en/devi/", faztaa_payload())
            .respond("/api/sentences", examples_payload())
            .respond("/api/cards", json!({"data": [{"id": "card-1"}]}))
    }

    pub fn respond(mut self, fragment: &str, payload: Value) -> Self {
        self.responses.push((fragment.to_string(), payload));
        self
    }

    pub fn failing(mut self, fragment: &str) -> Self {
        self.failures.push(fragment.to_string());
        self
    }

    /// Delays every successful answer, so failures land first.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn submissions(&self) -> Vec<(String, Value)> {
        self.submissions.lock().clone()
    }

    fn answer(&self, url: &str) -> Result<Value> {
        self.requests.lock().push(url.to_string());
        if self.failures.iter().any(|fragment| url.contains(fragment)) {
            return Err(LookupError::Transport {
                url: url.to_string(),
                detail: "simulated connection reset".to_string(),
            });
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.responses
            .iter()
            .filter(|(fragment, _)| url.contains(fragment.as_str()))
            .max_by_key(|(fragment, _)| fragment.len())
            .map(|(_, payload)| payload.clone())
            .ok_or_else(|| LookupError::HttpStatus {
                url: url.to_string(),
                status: 404,
                reason: "Not Found".to_string(),
            })
    }
}

impl Transport for FakeTransport {
    fn fetch(&self, url: &str) -> Result<Value> {
        self.answer(url)
    }

    fn submit(&self, url: &str, payload: &Value) -> Result<Value> {
        self.submissions.lock().push((url.to_string(), payload.clone()));
        self.answer(url)
    }

    fn update(&self, url: &str, payload: &Value) -> Result<Value> {
        self.submissions.lock().push((url.to_string(), payload.clone()));
        self.answer(url)
    }
}

pub(crate) fn test_config() -> LookupConfig {
    LookupConfig {
        session: Session::new(vec![("sid".into(), "abc".into())], "user-1"),
        endpoints: Endpoints {
            seedlang: "http://seedlang.test".into(),
            dwds: "http://dwds.test".into(),
            faztaa: "http://faztaa.test".into(),
        },
        deck_id: Some("deck-1".into()),
        review_deck_id: Some("review-deck-1".into()),
        ..LookupConfig::default()
    }
}

pub(crate) fn noun_payload() -> Value {
    json!({
        "id": "W1",
        "target_text": "Katze",
        "word_type": {"abbreviation": "noun", "name": "Nomen"},
        "gender": "feminine",
        "plural_nouns": [{"target_text": "Katzen"}],
        "no_plural": false,
        "level": {"abbreviation": "A1"},
        "learned": false,
        "reviewing": true,
        "translation_sources": [
            {"source": {"text": "cat"}, "rejected": false},
            {"source": {"text": "pussy"}, "rejected": true},
            {"source": {"text": "female cat"}, "rejected": false}
        ]
    })
}

pub(crate) fn verb_payload() -> Value {
    json!({
        "id": "W2",
        "target_text": "gehen",
        "word_type": {"abbreviation": "vrb", "name": "Verb"},
        "gender": null,
        "plural_nouns": [],
        "level": {"abbreviation": "A1"},
        "learned": true,
        "reviewing": false,
        "translation_sources": [{"source": {"text": "to go"}, "rejected": false}]
    })
}

pub(crate) fn noun_record() -> WordRecord {
    let raw: wire::Word = serde_json::from_value(noun_payload()).expect("noun fixture decodes");
    WordRecord::from(raw)
}

pub(crate) fn verb_record() -> WordRecord {
    let raw: wire::Word = serde_json::from_value(verb_payload()).expect("verb fixture decodes");
    WordRecord::from(raw)
}

fn association(form: &str, root: Option<&str>) -> Value {
    json!({"word": {"target_text": form, "root_word": root.map(|id| json!({"id": id}))}})
}

pub(crate) fn examples_payload() -> Value {
    let mut sentences = vec![
        json!({
            "target_text": "Die Katze schläft.",
            "literal_source": "The cat sleeps.",
            "word_associations": [
                association("die", None),
                association("Katze", Some("W1")),
                association("schläft", Some("V7")),
            ]
        }),
        json!({
            "target_text": "Ich sehe zwei Katzen.",
            "literal_source": "I see two cats.",
            "word_associations": [
                association("ich", Some("P1")),
                association("sehe", Some("V3")),
                association("zwei", Some("N2")),
                association("Katzen", Some("W1")),
            ]
        }),
    ];
    for n in 3..=6 {
        sentences.push(json!({
            "target_text": format!("Katze Nummer {n}"),
            "literal_source": format!("Cat number {n}"),
            "word_associations": [association("Katze", Some("W1"))]
        }));
    }
    Value::Array(sentences)
}

pub(crate) fn faztaa_payload() -> Value {
    let examples: Vec<Value> = (1..=6)
        .map(|n| json!({"e": format!("Die Katze {n} miaut, die Katze schnurrt."), "m": format!("Cat {n} meows.")}))
        .collect();
    json!({
        "result": [
            {"content": [{"means": [
                {"mean": "cat", "examples": examples},
                {"mean": "female cat", "examples": []}
            ]}]},
            {"content": [{"means": [{"mean": "never shown", "examples": []}]}]}
        ]
    })
}

pub(crate) fn conjugation_payload() -> Value {
    json!([
        {
            "concept": {"name": "Präsens"},
            "singular_1p": "gehe",
            "singular_2p": "gehst",
            "singular_3p": "geht",
            "plural_1p": "gehen",
            "plural_2p": "geht"
        },
        {
            "concept": {"name": "Präteritum"},
            "singular_1p": "ging",
            "singular_2p": "gingst",
            "singular_3p": "ging",
            "plural_1p": "gingen",
            "plural_2p": "gingt"
        }
    ])
}

pub(crate) fn bundle_for(word: WordRecord) -> ResourceBundle {
    let mut payloads = vec![
        (LookupKind::Phonetic, json!([{"ipa": "ˈkat͡sə"}, {"ipa": "ˈkat͡sɛ"}])),
        (LookupKind::SecondaryDictionary, faztaa_payload()),
        (LookupKind::Examples, examples_payload()),
        (LookupKind::Membership, json!([])),
    ];
    if word.category.is_verb() {
        payloads.push((LookupKind::Conjugation, conjugation_payload()));
    }
    normalize(RawResults::new(word, payloads)).expect("fixture bundle normalizes")
}
