use std::error::Error;
use std::io;

use atty::Stream;
use clap::{Parser, Subcommand};
use seedlang_lookup::render::{
    AttributeBlock, ConjugationTable, PrimaryTranslations, ReferenceLink, RenderedExample,
    SecondaryTranslations, TitleBlock,
};
use seedlang_lookup::{
    Dispatcher, EndpointClient, Fragment, LexicalCategory, LookupConfig, LookupError, Section,
    render, review,
};
use serde_json::json;
use termimad::crossterm::style::Color;
use termimad::{FmtText, MadSkin, terminal_size};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const PROGRESS_WIDTH: usize = 30;

#[derive(Parser, Debug)]
#[command(
    name = "seedlang-lookup",
    about = "Look up German vocabulary on Seedlang and friends",
    version
)]
pub struct Cli {
    /// Emit JSON instead of the formatted report.
    #[arg(long, global = true)]
    json: bool,

    /// Log requests to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show grammar, translations, examples and conjugations of a word.
    Word {
        /// Seedlang word identifier.
        word_id: String,
    },
    /// Queue a word in the review deck and show the due-card count.
    AddReview {
        /// Seedlang word identifier.
        word_id: String,
    },
    /// Open the review deck in the browser.
    Review,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = LookupConfig::from_env().map_err(describe)?;
    match cli.command {
        Command::Word { word_id } => handle_word(&config, &word_id, cli.json),
        Command::AddReview { word_id } => handle_add_review(&config, &word_id, cli.json),
        Command::Review => handle_review(&config, cli.json),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn describe(err: LookupError) -> Box<dyn Error> {
    format!("{} failure: {err}", err.kind()).into()
}

fn handle_word(config: &LookupConfig, word_id: &str, as_json: bool) -> Result<(), Box<dyn Error>> {
    let client = EndpointClient::new(&config.session, config.timeout).map_err(describe)?;
    let dispatcher = Dispatcher::new(&client, config).map_err(describe)?;
    let bundle = dispatcher
        .gather_word_resources(word_id)
        .map_err(describe)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    let skin = markdown_skin(&bundle.word().category);
    for section in render(&bundle) {
        print_markdown(&skin, &section_markdown(&section));
    }
    println!("To quickly add the word to your deck, run:");
    println!("\tseedlang-lookup add-review {word_id}");
    Ok(())
}

fn handle_add_review(
    config: &LookupConfig,
    word_id: &str,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let client = EndpointClient::new(&config.session, config.timeout).map_err(describe)?;
    let card = review::add_to_reviews(&client, config, word_id).map_err(describe)?;
    let due = review::due_card_count(&client, config).map_err(describe)?;
    let review_url = review::review_deck_url(config).map_err(describe)?;

    if as_json {
        let payload = json!({ "card": card, "due": due, "review_url": review_url });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&card)?);
    println!();
    println!(
        "Waiting for review: {} {} / {} cards",
        due.progress_bar(PROGRESS_WIDTH),
        due.count,
        due.review_cards_count
    );
    println!();
    println!("To quickly review, open: {review_url}");
    Ok(())
}

fn handle_review(config: &LookupConfig, as_json: bool) -> Result<(), Box<dyn Error>> {
    let review_url = review::review_deck_url(config).map_err(describe)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&json!({ "review_url": review_url }))?);
        return Ok(());
    }
    if let Some(fallback) = launch_browser(&review_url, |url| open::that(url)) {
        println!("{fallback}");
    }
    Ok(())
}

/// Opens `url` with `opener`, returning the line to print when it could not.
fn launch_browser<F>(url: &str, opener: F) -> Option<String>
where
    F: FnOnce(&str) -> io::Result<()>,
{
    match opener(url) {
        Ok(()) => None,
        Err(err) => {
            warn!(url, error = %err, "browser launch failed");
            Some(format!("Open the review deck at: {url}"))
        }
    }
}

/// Backslash-escapes characters that termimad reads as table or inline markup.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '*' | '|' | '`' | '~') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn section_markdown(section: &Section) -> String {
    match section {
        Section::Title(title) => title_markdown(title),
        Section::Attributes(attributes) => attributes_markdown(attributes),
        Section::PrimaryTranslations(primary) => primary_markdown(primary),
        Section::SecondaryTranslations(secondary) => secondary_markdown(secondary),
        Section::Conjugation(table) => conjugation_markdown(table),
        Section::References(links) => references_markdown(links),
    }
}

fn title_markdown(title: &TitleBlock) -> String {
    let headword = &title.headword;
    let mut word = String::new();
    if let Some(marker) = &headword.gender_marker {
        word.push_str(marker);
    }
    word.push_str(&format!("**{}**", escape_markdown(&headword.text)));
    if let Some(suffix) = &headword.plural_suffix {
        word.push_str(&format!("-{}", escape_markdown(suffix)));
    }
    let mut text = format!(
        "# {} - {}\n\n{word}\n",
        escape_markdown(&title.category_label),
        escape_markdown(&title.category_name)
    );
    if !title.phonetics.is_empty() {
        text.push_str(&format!("\n*{}*\n", escape_markdown(&title.phonetics)));
    }
    text
}

fn attributes_markdown(attributes: &AttributeBlock) -> String {
    let in_deck = if attributes.in_deck { "ADDED" } else { "" };
    let gender = attributes.gender_marker.as_deref().unwrap_or("");
    format!(
        "|Level|Learn Status|In deck ?|Gender|\n|:-|:-|:-|:-|\n|{}|{}|{}|{}|\n",
        escape_markdown(&attributes.level),
        attributes.status.label(),
        in_deck,
        gender
    )
}

fn primary_markdown(primary: &PrimaryTranslations) -> String {
    let mut lines = vec!["## Translations - seedlang".to_string()];
    lines.extend(primary.glosses.iter().map(|gloss| format!("* [EN]: {}", escape_markdown(gloss))));
    if !primary.examples.is_empty() {
        lines.push(String::new());
        lines.push("Examples:".to_string());
        lines.extend(primary.examples.iter().flat_map(example_lines));
    }
    lines.join("\n")
}

fn secondary_markdown(secondary: &SecondaryTranslations) -> String {
    let mut lines = vec!["## Translations - faztaa".to_string()];
    for meaning in &secondary.meanings {
        lines.push(format!("* [EN]: {}", escape_markdown(&meaning.gloss)));
        lines.extend(meaning.examples.iter().flat_map(example_lines));
    }
    lines.join("\n")
}

fn example_lines(example: &RenderedExample) -> [String; 2] {
    let sentence: String = example
        .sentence
        .iter()
        .map(|fragment| match fragment {
            Fragment::Plain(text) => escape_markdown(text),
            Fragment::Highlight(text) => format!("**{}**", escape_markdown(text)),
        })
        .collect();
    [
        format!("> {sentence}"),
        format!(">   *{}*", escape_markdown(&example.gloss)),
    ]
}

fn conjugation_markdown(table: &ConjugationTable) -> String {
    let mut lines = vec!["## Verb conjugation".to_string(), String::new()];
    let mut header = String::from("|Person|");
    let mut divider = String::from("|:-|");
    for column in &table.columns {
        header.push_str(&format!("{}|", escape_markdown(column)));
        divider.push_str(":-|");
    }
    lines.push(header);
    lines.push(divider);
    for row in &table.rows {
        let mut line = format!("|{}|", escape_markdown(row.person));
        for form in &row.forms {
            line.push_str(&format!("**{}**|", escape_markdown(form)));
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn references_markdown(links: &[ReferenceLink]) -> String {
    let mut lines = vec!["**External references:**".to_string()];
    lines.extend(
        links
            .iter()
            .map(|link| format!("* **{}**: {}", link.label, link.url)),
    );
    lines.join("\n")
}

fn stdout_is_tty() -> bool {
    atty::is(Stream::Stdout)
}

fn markdown_width() -> usize {
    let (width, _) = terminal_size();
    width.max(60) as usize
}

fn category_color(category: &LexicalCategory) -> Color {
    match category {
        LexicalCategory::Noun => Color::Green,
        LexicalCategory::Adjective | LexicalCategory::Adverb => Color::Yellow,
        LexicalCategory::Verb => Color::Red,
        LexicalCategory::Other(_) => Color::White,
    }
}

fn markdown_skin(category: &LexicalCategory) -> MadSkin {
    let mut skin = MadSkin::default();
    skin.bold.set_fg(category_color(category));
    skin.italic.set_fg(Color::DarkGrey);
    skin
}

fn print_markdown(skin: &MadSkin, body: &str) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return;
    }
    if stdout_is_tty() {
        let formatted = FmtText::from(skin, trimmed, Some(markdown_width()));
        println!("{formatted}");
    } else {
        println!("{trimmed}\n");
    }
}
