//! Turns a merged bundle into ordered report sections.
//!
//! Rendering is pure: it never touches the network or the terminal. Emphasis
//! is expressed as [`Fragment::Highlight`] and styled by the caller.

use crate::model::{ExampleSentence, LexicalCategory, Person, ResourceBundle, WordRecord};
use crate::resolver::encode;

pub const MAX_EXAMPLES: usize = 5;
pub const PHONETIC_SEPARATOR: &str = " ; ";

const REFERENCE_SITES: [(&str, &str); 8] = [
    ("DWDS", "https://www.dwds.de/wb/{word}"),
    ("Wiktionary", "https://de.wiktionary.org/wiki/{word}"),
    (
        "Collins",
        "https://www.collinsdictionary.com/dictionary/german-english/{word}",
    ),
    ("Seedlang", "https://seedlang.com/vocab/words/{id}"),
    ("Faztaa", "https://faztaa.com/search/word/{word}?hl=en"),
    (
        "Cambridge",
        "https://dictionary.cambridge.org/dictionary/german-english/{word}",
    ),
    ("YouGlish", "https://youglish.com/pronounce/{word}/german"),
    ("Google Img", "https://www.google.com/search?q={word}&udm=2"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Plain(String),
    Highlight(String),
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Plain(text) | Fragment::Highlight(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExample {
    pub sentence: Vec<Fragment>,
    pub gloss: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headword {
    pub gender_marker: Option<String>,
    pub text: String,
    pub plural_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleBlock {
    pub category: LexicalCategory,
    pub category_label: String,
    pub category_name: String,
    pub headword: Headword,
    pub phonetics: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnStatus {
    Learned,
    Reviewing,
    Unseen,
}

impl LearnStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LearnStatus::Learned => "learned",
            LearnStatus::Reviewing => "reviewing",
            LearnStatus::Unseen => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBlock {
    pub level: String,
    pub status: LearnStatus,
    pub in_deck: bool,
    pub gender_marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryTranslations {
    pub glosses: Vec<String>,
    pub examples: Vec<RenderedExample>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMeaning {
    pub gloss: String,
    pub examples: Vec<RenderedExample>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryTranslations {
    pub meanings: Vec<RenderedMeaning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjugationRow {
    pub person: &'static str,
    pub forms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjugationTable {
    pub columns: Vec<String>,
    pub rows: Vec<ConjugationRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLink {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Title(TitleBlock),
    Attributes(AttributeBlock),
    PrimaryTranslations(PrimaryTranslations),
    SecondaryTranslations(SecondaryTranslations),
    Conjugation(ConjugationTable),
    References(Vec<ReferenceLink>),
}

pub fn render(bundle: &ResourceBundle) -> Vec<Section> {
    let word = bundle.word();
    let mut sections = vec![
        Section::Title(title_block(bundle)),
        Section::Attributes(AttributeBlock {
            level: word.level.clone().unwrap_or_default(),
            status: learn_status(word),
            in_deck: bundle.in_deck(),
            gender_marker: gender_marker(word),
        }),
        Section::PrimaryTranslations(primary_translations(bundle)),
        Section::SecondaryTranslations(secondary_translations(bundle)),
    ];
    if let Some(table) = conjugation_table(bundle) {
        sections.push(Section::Conjugation(table));
    }
    sections.push(Section::References(reference_links(word)));
    sections
}

fn title_block(bundle: &ResourceBundle) -> TitleBlock {
    let word = bundle.word();
    TitleBlock {
        category: word.category.clone(),
        category_label: word.category.short_label().to_string(),
        category_name: word.category_name.clone(),
        headword: Headword {
            gender_marker: gender_marker(word),
            text: word.text.clone(),
            plural_suffix: plural_suffix(word),
        },
        phonetics: bundle.phonetics().join(PHONETIC_SEPARATOR),
    }
}

fn learn_status(word: &WordRecord) -> LearnStatus {
    if word.learned {
        LearnStatus::Learned
    } else if word.reviewing {
        LearnStatus::Reviewing
    } else {
        LearnStatus::Unseen
    }
}

pub fn gender_marker(word: &WordRecord) -> Option<String> {
    if !word.category.is_noun() {
        return None;
    }
    word.gender.map(|gender| format!("{},", gender.marker()))
}

/// Plural ending of a noun: the plural form minus the singular it starts with.
///
/// Plurals that change the stem (`Apfel` → `Äpfel`) are returned whole.
pub fn plural_suffix(word: &WordRecord) -> Option<String> {
    if !word.category.is_noun() || word.no_plural {
        return None;
    }
    let plural = word.plural_forms.first().map(String::as_str).unwrap_or("");
    let suffix = plural.strip_prefix(word.text.as_str()).unwrap_or(plural);
    Some(suffix.to_string())
}

fn primary_translations(bundle: &ResourceBundle) -> PrimaryTranslations {
    let word = bundle.word();
    PrimaryTranslations {
        glosses: bundle
            .translations()
            .iter()
            .filter(|translation| !translation.rejected)
            .map(|translation| translation.text.clone())
            .collect(),
        examples: bundle
            .examples()
            .iter()
            .take(MAX_EXAMPLES)
            .map(|example| RenderedExample {
                sentence: highlight_associations(example, &word.id),
                gloss: example.literal_gloss.clone(),
            })
            .collect(),
    }
}

fn secondary_translations(bundle: &ResourceBundle) -> SecondaryTranslations {
    let surface = bundle.word().text.as_str();
    SecondaryTranslations {
        meanings: bundle
            .secondary()
            .meanings
            .iter()
            .map(|meaning| RenderedMeaning {
                gloss: meaning.gloss.clone(),
                examples: meaning
                    .examples
                    .iter()
                    .take(MAX_EXAMPLES)
                    .map(|example| RenderedExample {
                        sentence: highlight_occurrences(&example.text, surface),
                        gloss: example.gloss.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn conjugation_table(bundle: &ResourceBundle) -> Option<ConjugationTable> {
    let conjugation = bundle.conjugation()?;
    Some(ConjugationTable {
        columns: conjugation
            .tenses
            .iter()
            .map(|tense| tense.concept.clone())
            .collect(),
        rows: Person::ALL
            .iter()
            .map(|&person| ConjugationRow {
                person: person.pronouns(),
                forms: conjugation
                    .tenses
                    .iter()
                    .map(|tense| tense.form(person).to_string())
                    .collect(),
            })
            .collect(),
    })
}

pub fn reference_links(word: &WordRecord) -> Vec<ReferenceLink> {
    let text = encode(&word.text);
    let id = encode(&word.id);
    REFERENCE_SITES
        .iter()
        .map(|&(label, template)| ReferenceLink {
            label,
            url: template.replace("{word}", &text).replace("{id}", &id),
        })
        .collect()
}

/// Highlights the tokens whose association points back at `root_id`,
/// substituting the associated word form for the token.
fn highlight_associations(example: &ExampleSentence, root_id: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for (index, token) in example.text.split(' ').enumerate() {
        if index > 0 {
            push_plain(&mut fragments, " ");
        }
        match example.associations.get(index) {
            Some(association) if association.root_id.as_deref() == Some(root_id) => {
                fragments.push(Fragment::Highlight(association.form.clone()));
            }
            _ => push_plain(&mut fragments, token),
        }
    }
    trim_fragments(fragments)
}

fn highlight_occurrences(text: &str, needle: &str) -> Vec<Fragment> {
    if needle.is_empty() {
        return vec![Fragment::Plain(text.to_string())];
    }
    let mut fragments = Vec::new();
    let mut cursor = 0;
    for (start, matched) in text.match_indices(needle) {
        push_plain(&mut fragments, &text[cursor..start]);
        fragments.push(Fragment::Highlight(matched.to_string()));
        cursor = start + matched.len();
    }
    push_plain(&mut fragments, &text[cursor..]);
    fragments
}

fn push_plain(fragments: &mut Vec<Fragment>, text: &str) {
    if text.is_empty() {
        return;
    }
    match fragments.last_mut() {
        Some(Fragment::Plain(last)) => last.push_str(text),
        _ => fragments.push(Fragment::Plain(text.to_string())),
    }
}

fn trim_fragments(mut fragments: Vec<Fragment>) -> Vec<Fragment> {
    if let Some(Fragment::Plain(first)) = fragments.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Fragment::Plain(last)) = fragments.last_mut() {
        *last = last.trim_end().to_string();
    }
    fragments.retain(|fragment| !matches!(fragment, Fragment::Plain(text) if text.is_empty()));
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{bundle_for, noun_record, verb_record};

    #[test]
    fn noun_title_and_attributes() {
        let sections = render(&bundle_for(noun_record()));
        let Section::Title(title) = &sections[0] else {
            panic!("title comes first");
        };
        assert_eq!(title.category_label, "N");
        assert_eq!(title.category_name, "Nomen");
        assert_eq!(title.headword.gender_marker.as_deref(), Some("e,"));
        assert_eq!(title.headword.plural_suffix.as_deref(), Some("n"));
        assert_eq!(title.phonetics, "ˈkat͡sə ; ˈkat͡sɛ");

        let attributes = sections
            .iter()
            .find_map(|s| match s {
                Section::Attributes(block) => Some(block),
                _ => None,
            })
            .expect("section present");
        assert_eq!(attributes.gender_marker.as_deref(), Some("e,"));
        assert_eq!(attributes.level, "A1");
        assert_eq!(attributes.status, LearnStatus::Reviewing);
        assert!(!attributes.in_deck);
    }

    #[test]
    fn noun_report_has_no_conjugation_section() {
        let sections = render(&bundle_for(noun_record()));
        assert!(!sections.iter().any(|s| matches!(s, Section::Conjugation(_))));
        assert!(matches!(sections.last(), Some(Section::References(_))));
    }

    #[test]
    fn verb_table_has_five_rows_and_one_column_per_concept() {
        let sections = render(&bundle_for(verb_record()));
        let table = sections
            .iter()
            .find_map(|s| match s {
                Section::Conjugation(table) => Some(table),
                _ => None,
            })
            .expect("section present");
        assert_eq!(table.columns, vec!["Präsens".to_string(), "Präteritum".to_string()]);
        assert_eq!(table.rows.len(), 5);
        assert!(table.rows.iter().all(|row| row.forms.len() == 2));
        assert_eq!(table.rows[0].person, "ich");
        assert_eq!(table.rows[0].forms, vec!["gehe".to_string(), "ging".to_string()]);
        assert_eq!(table.rows[2].person, "ihr");
        assert_eq!(table.rows[2].forms[1], "gingt");
    }

    #[test]
    fn verb_title_is_plain() {
        let sections = render(&bundle_for(verb_record()));
        let Section::Title(title) = &sections[0] else {
            panic!("title comes first");
        };
        assert_eq!(title.category_label, "V");
        assert_eq!(title.headword.gender_marker, None);
        assert_eq!(title.headword.plural_suffix, None);
        let Section::Attributes(attributes) = &sections[1] else {
            panic!("attributes follow the title");
        };
        assert_eq!(attributes.status, LearnStatus::Learned);
    }

    #[test]
    fn primary_translations_skip_rejected_and_cap_examples() {
        let sections = render(&bundle_for(noun_record()));
        let primary = sections
            .iter()
            .find_map(|s| match s {
                Section::PrimaryTranslations(block) => Some(block),
                _ => None,
            })
            .expect("section present");
        assert_eq!(primary.glosses, vec!["cat".to_string(), "female cat".to_string()]);
        assert_eq!(primary.examples.len(), MAX_EXAMPLES);
        assert_eq!(
            primary.examples[0].sentence,
            vec![
                Fragment::Plain("Die ".into()),
                Fragment::Highlight("Katze".into()),
                Fragment::Plain(" schläft.".into()),
            ]
        );
        assert_eq!(primary.examples[0].gloss, "The cat sleeps.");
        assert_eq!(
            primary.examples[1].sentence.last(),
            Some(&Fragment::Highlight("Katzen".into()))
        );
    }

    #[test]
    fn secondary_translations_highlight_every_occurrence() {
        let sections = render(&bundle_for(noun_record()));
        let secondary = sections
            .iter()
            .find_map(|s| match s {
                Section::SecondaryTranslations(block) => Some(block),
                _ => None,
            })
            .expect("section present");
        assert_eq!(secondary.meanings.len(), 2);
        let first = &secondary.meanings[0];
        assert_eq!(first.gloss, "cat");
        assert_eq!(first.examples.len(), MAX_EXAMPLES);
        let highlights = first.examples[0]
            .sentence
            .iter()
            .filter(|fragment| matches!(fragment, Fragment::Highlight(_)))
            .count();
        assert_eq!(highlights, 2);
        let joined: String = first.examples[0].sentence.iter().map(Fragment::text).collect();
        assert_eq!(joined, "Die Katze 1 miaut, die Katze schnurrt.");
        assert!(secondary.meanings[1].examples.is_empty());
    }

    #[test]
    fn plural_suffix_rules() {
        let mut word = noun_record();
        assert_eq!(plural_suffix(&word).as_deref(), Some("n"));

        word.text = "Apfel".into();
        word.plural_forms = vec!["Äpfel".into()];
        assert_eq!(plural_suffix(&word).as_deref(), Some("Äpfel"));

        word.text = "Lehrer".into();
        word.plural_forms = vec!["Lehrer".into()];
        assert_eq!(plural_suffix(&word).as_deref(), Some(""));

        word.no_plural = true;
        assert_eq!(plural_suffix(&word), None);
    }

    #[test]
    fn reference_links_are_templated() {
        let links = reference_links(&noun_record());
        assert_eq!(links.len(), REFERENCE_SITES.len());
        assert_eq!(links[0].url, "https://www.dwds.de/wb/Katze");
        let seedlang = links.iter().find(|link| link.label == "Seedlang").unwrap();
        assert_eq!(seedlang.url, "https://seedlang.com/vocab/words/W1");
        let youglish = links.iter().find(|link| link.label == "YouGlish").unwrap();
        assert_eq!(youglish.url, "https://youglish.com/pronounce/Katze/german");
    }

    #[test]
    fn highlighting_edge_cases() {
        assert_eq!(
            highlight_occurrences("no match here", "Katze"),
            vec![Fragment::Plain("no match here".into())]
        );
        assert_eq!(
            highlight_occurrences("Katze", ""),
            vec![Fragment::Plain("Katze".into())]
        );
        let example = ExampleSentence {
            text: "Katze".into(),
            literal_gloss: String::new(),
            associations: Vec::new(),
        };
        assert_eq!(
            highlight_associations(&example, "W1"),
            vec![Fragment::Plain("Katze".into())]
        );
    }
}
