use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::client::Transport;
use crate::config::LookupConfig;
use crate::error::Result;
use crate::merge::decode;
use crate::resolver::encode;
use crate::wire;

const LANGUAGE_ID: &str = "DE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueCards {
    pub count: u64,
    pub review_cards_count: u64,
}

impl DueCards {
    /// Text gauge of due cards against all review cards, `width` cells wide.
    pub fn progress_bar(&self, width: usize) -> String {
        let filled = if self.review_cards_count == 0 {
            0
        } else {
            let due = self.count.min(self.review_cards_count) as f64;
            let ratio = due / self.review_cards_count as f64;
            (ratio * width as f64).round() as usize
        };
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }
}

/// Queues a word in the configured review deck.
pub fn add_to_reviews<T: Transport + ?Sized>(
    transport: &T,
    config: &LookupConfig,
    word_id: &str,
) -> Result<Value> {
    let payload = json!({
        "data": {
            "interface_source": "vocab-word",
            "card_type_slug": "vocab_word_translate",
            "card_type_id": null,
            "deck_id": config.deck_id()?,
            "user_id": config.session.user_id(),
            "word_id": word_id,
            "sentence_id": false,
            "language_id": LANGUAGE_ID,
        }
    });
    let url = format!("{}/api/cards", config.endpoints.seedlang);
    let response = transport.submit(&url, &payload)?;
    info!(word_id, "review card submitted");
    Ok(response)
}

/// Counts the past-due cards of the review deck.
pub fn due_card_count<T: Transport + ?Sized>(
    transport: &T,
    config: &LookupConfig,
) -> Result<DueCards> {
    let url = format!(
        "{}/api/decks/{}/cards_count",
        config.endpoints.seedlang,
        encode(config.review_deck_id()?)
    );
    let payload = json!({
        "filters": {
            "card_type_id": null,
            "retired": false,
            "difficulty_label": null,
            "created_at_before_after": "after",
            "created_at_days_ago": null,
            "due": "past-due",
        }
    });
    let counts: wire::DueCards = decode("due cards", transport.update(&url, &payload)?)?;
    Ok(DueCards {
        count: counts.count,
        review_cards_count: counts.review_cards_count,
    })
}

pub fn review_deck_url(config: &LookupConfig) -> Result<String> {
    Ok(format!(
        "{}/reviews/decks/{}",
        config.endpoints.seedlang,
        encode(config.review_deck_id()?)
    ))
}
