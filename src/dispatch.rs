use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::Transport;
use crate::config::LookupConfig;
use crate::error::Result;
use crate::merge::{self, RawResults};
use crate::model::{ResourceBundle, WordRecord};
use crate::resolver::{self, LookupKind, SubLookup};
use crate::wire;

/// Fans the per-word sub-lookups out over a bounded worker pool.
pub struct Dispatcher<'a, T: Transport + ?Sized> {
    transport: &'a T,
    config: &'a LookupConfig,
    pool: ThreadPool,
}

impl<'a, T: Transport + ?Sized> Dispatcher<'a, T> {
    pub fn new(transport: &'a T, config: &'a LookupConfig) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.max_concurrency.max(1))
            .thread_name(|index| format!("lookup-worker-{index}"))
            .build()?;
        Ok(Self {
            transport,
            config,
            pool,
        })
    }

    /// Fetches and merges everything known about one word.
    ///
    /// The word record is fetched first; its category decides the rest of the
    /// fetch set. Any failing sub-lookup fails the whole call.
    pub fn gather_word_resources(&self, word_id: &str) -> Result<ResourceBundle> {
        let word = self.fetch_word(word_id)?;
        let lookups = resolver::plan_lookups(self.config, &word);
        debug!(
            word_id,
            category = %word.category,
            lookups = lookups.len(),
            "dispatching sub-lookups"
        );
        let payloads = self.dispatch(lookups)?;
        let bundle = merge::normalize(RawResults::new(word, payloads))?;
        info!(word_id, in_deck = bundle.in_deck(), "word resources gathered");
        Ok(bundle)
    }

    pub fn fetch_word(&self, word_id: &str) -> Result<WordRecord> {
        let value = self
            .transport
            .fetch(&resolver::word_url(self.config, word_id))?;
        let word: wire::Word = merge::decode("word", value)?;
        Ok(WordRecord::from(word))
    }

    /// Runs every lookup on the pool and returns once all of them joined.
    ///
    /// Each worker hands back its own `(kind, payload)`; nothing is shared
    /// between workers. On failure, lookups already in flight still finish but
    /// their payloads are dropped.
    pub fn dispatch(&self, lookups: Vec<SubLookup>) -> Result<Vec<(LookupKind, Value)>> {
        self.pool.install(|| {
            lookups
                .into_par_iter()
                .map(|lookup| -> Result<(LookupKind, Value)> {
                    let payload = self.transport.fetch(&lookup.url).inspect_err(|err| {
                        warn!(lookup = %lookup.kind, error = %err, "sub-lookup failed");
                    })?;
                    Ok((lookup.kind, payload))
                })
                .collect()
        })
    }
}
