use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::LookupConfig;
use crate::model::WordRecord;

/// Everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Phonetic,
    SecondaryDictionary,
    Examples,
    Membership,
    Conjugation,
}

impl LookupKind {
    pub fn name(&self) -> &'static str {
        match self {
            LookupKind::Phonetic => "phonetic",
            LookupKind::SecondaryDictionary => "secondary dictionary",
            LookupKind::Examples => "examples",
            LookupKind::Membership => "membership",
            LookupKind::Conjugation => "conjugation",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named request contributing one field to a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubLookup {
    pub kind: LookupKind,
    pub url: String,
}

pub fn word_url(config: &LookupConfig, word_id: &str) -> String {
    format!("{}/api/words/{}", config.endpoints.seedlang, encode(word_id))
}

/// Decides the second-phase fetch set from the already fetched word.
///
/// Conjugations are only requested for verbs.
pub fn plan_lookups(config: &LookupConfig, word: &WordRecord) -> Vec<SubLookup> {
    let endpoints = &config.endpoints;
    let id = encode(&word.id);
    let text = encode(&word.text);
    let user = encode(config.session.user_id());

    let mut lookups = vec![
        SubLookup {
            kind: LookupKind::Phonetic,
            url: format!("{}/api/ipa/?q={text}", endpoints.dwds),
        },
        SubLookup {
            kind: LookupKind::SecondaryDictionary,
            url: format!("{}/api/search/en/devi/{text}", endpoints.faztaa),
        },
        SubLookup {
            kind: LookupKind::Examples,
            url: format!(
                "{}/api/sentences?word_id={id}&sort=20&vocab_list=level_abbreviation,%20target_text&vocab_trainer=true",
                endpoints.seedlang
            ),
        },
        SubLookup {
            kind: LookupKind::Membership,
            url: format!(
                "{}/api/cards?filters[user_id]={user}&filters[word_id]={id}&filters[sentence_id]=false&limit=20&page=1&my_reviews=true",
                endpoints.seedlang
            ),
        },
    ];

    if word.category.is_verb() {
        lookups.push(SubLookup {
            kind: LookupKind::Conjugation,
            url: format!(
                "{}/api/words/{id}/conjugated_verb_strings?limit=20&page=1",
                endpoints.seedlang
            ),
        });
    }
    lookups
}

pub(crate) fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}
