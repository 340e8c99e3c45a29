//! Engine - Main orchestrator for the matching pipeline.
//!
//! Owns the lazily loaded store snapshot, the injected RNG and the session's
//! conversation context, and runs each input through the pipeline: follow-up
//! intercept, topic declaration, synonym rewrite, sentiment short-circuit,
//! exact/category match, fuzzy scoring, fallback, and finally context update
//! and personalization.
//!
//! The snapshot is loaded once, on first query, behind a `OnceCell`, so
//! concurrent callers cannot trigger duplicate loads. Inserts are
//! write-through: the store row is committed first, then the in-memory
//! snapshot is updated, so reads in the same process see every append
//! without a reload.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::sqlite::SqlitePool;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{debug, info, warn};

use super::context::{self, ConversationState};
use super::fuzzy::{self, ScoringWeights};
use super::matcher;
use super::rotation;
use super::sentiment::{self, SentimentRule};
use super::synonyms;
use crate::database;
use crate::error::AppError;
use crate::models::{BotReply, KnowledgeEntry, GENERAL_CATEGORY};

/// In-memory, read-mostly view of the knowledge store.
struct Snapshot {
    /// Every entry, in id order.
    entries: Vec<KnowledgeEntry>,
    /// Lowercased keyword → category, insertion order, first-loaded wins.
    /// `"General"` entries are excluded: chit-chat is matched whole-word only.
    keyword_index: Vec<(String, String)>,
}

impl Snapshot {
    fn build(entries: Vec<KnowledgeEntry>) -> Self {
        let mut keyword_index: Vec<(String, String)> = Vec::new();
        for entry in entries.iter().filter(|e| !e.is_general()) {
            let keyword = entry.keyword.to_lowercase();
            if !keyword_index.iter().any(|(k, _)| *k == keyword) {
                keyword_index.push((keyword, entry.category.clone()));
            }
        }
        Self {
            entries,
            keyword_index,
        }
    }

    /// Answers of every entry in `category`, in id order.
    fn tips_for(&self, category: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .map(|e| e.answer.clone())
            .collect()
    }

    /// Distinct categories in first-appearance order.
    fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !out.iter().any(|c| c.eq_ignore_ascii_case(&entry.category)) {
                out.push(entry.category.clone());
            }
        }
        out
    }

    /// First category name appearing in `input` as a case-insensitive
    /// substring, used by the topic-declaration intercept.
    fn category_mentioned(&self, input: &str) -> Option<String> {
        let lower = input.to_lowercase();
        self.categories()
            .into_iter()
            .find(|c| lower.contains(&c.to_lowercase()))
    }

    fn push(&mut self, entry: KnowledgeEntry) {
        if !entry.is_general() {
            let keyword = entry.keyword.to_lowercase();
            if !self.keyword_index.iter().any(|(k, _)| *k == keyword) {
                self.keyword_index.push((keyword, entry.category.clone()));
            }
        }
        self.entries.push(entry);
    }
}

/// The matching engine. One instance serves one logical session.
pub struct Engine {
    pool: SqlitePool,
    weights: ScoringWeights,
    snapshot: OnceCell<RwLock<Snapshot>>,
    rng: Mutex<StdRng>,
    context: Mutex<ConversationState>,
}

impl Engine {
    /// Build an engine over `pool` with a real entropy source. Fails fast on
    /// a malformed synonym or sentiment table.
    pub fn new(pool: SqlitePool) -> Result<Self, AppError> {
        Self::with_rng(pool, StdRng::from_entropy())
    }

    /// Build an engine with an explicit RNG, so tests can seed tip and
    /// fallback selection.
    pub fn with_rng(pool: SqlitePool, rng: StdRng) -> Result<Self, AppError> {
        synonyms::validate_rules(synonyms::SYNONYM_RULES)?;
        sentiment::validate_rules(sentiment::SENTIMENT_RULES)?;

        Ok(Self {
            pool,
            weights: ScoringWeights::default(),
            snapshot: OnceCell::new(),
            rng: Mutex::new(rng),
            context: Mutex::new(ConversationState::new()),
        })
    }

    /// The loaded snapshot, performing the one-time guarded load on first use.
    /// A load failure is fatal to the query (the engine cannot answer without
    /// data) but leaves the cell empty, so a later call may retry.
    async fn snapshot(&self) -> Result<&RwLock<Snapshot>, AppError> {
        self.snapshot
            .get_or_try_init(|| async {
                let entries = database::load_entries(&self.pool).await?;
                info!("Loaded {} knowledge entries", entries.len());
                Ok(RwLock::new(Snapshot::build(entries)))
            })
            .await
    }

    /// Primary entry point: answer one raw input.
    ///
    /// The category in the reply is empty when no topic could be resolved.
    /// Empty or whitespace input is treated as an empty string and falls
    /// through deterministically to the fallback response.
    pub async fn lookup(&self, raw_input: &str) -> Result<BotReply, AppError> {
        let input = raw_input.trim();
        let lock = self.snapshot().await?;
        let snap = lock.read().await;
        let mut ctx = self.context.lock().await;

        ctx.push_history(input);

        // Follow-up phrasing resolves against the previous turn's category
        // and bypasses the rest of the pipeline.
        if let Some(category) = ctx.follow_up_category(input) {
            let tips = snap.tips_for(&category);
            if let Some(next) = rotation::next_tip(&tips, ctx.last_answer.as_deref()) {
                let next = next.to_string();
                debug!("Follow-up within '{}'", category);
                ctx.last_answer = Some(next.clone());
                return Ok(BotReply::new(next, category));
            }
        }

        // Topic declaration: store the favorite topic and acknowledge,
        // bypassing normal lookup.
        if context::declares_interest(input) {
            if let Some(category) = snap.category_mentioned(input) {
                info!("Remembering favorite topic '{}'", category);
                ctx.remember_favorite(&category);
                return Ok(BotReply::new(
                    format!("Got it, I'll remember you like {category}."),
                    category,
                ));
            }
        }

        let normalized = synonyms::normalize(input);

        // Sentiment cue: empathetic intro, with a topical tip when a known
        // keyword also appears. Short-circuits exact and fuzzy matching.
        if let Some(rule) = sentiment::detect(&normalized) {
            debug!("Sentiment cue '{}'", rule.cue);
            return Ok(self.sentiment_reply(rule, &normalized, &snap, &mut ctx).await);
        }

        let reply = self.resolve(&normalized, &snap).await;
        // Overwritten even when nothing resolved: a follow-up after a
        // fallback then finds no tips for the empty category and falls
        // through to a fresh lookup instead of rotating a stale topic.
        ctx.record_turn(&reply.answer, &reply.category);
        let answer = ctx.personalize(reply.answer, &reply.category);
        Ok(BotReply {
            answer,
            category: reply.category,
        })
    }

    /// Compose the reply for a matched sentiment cue.
    async fn sentiment_reply(
        &self,
        rule: &SentimentRule,
        normalized: &str,
        snap: &Snapshot,
        ctx: &mut ConversationState,
    ) -> BotReply {
        let Some(category) = matcher::keyword_category(normalized, &snap.keyword_index) else {
            // No topic to attach; the intro alone, prior state untouched.
            return BotReply::unresolved(rule.intro);
        };

        let category = category.to_string();
        let tips = snap.tips_for(&category);
        let body = {
            let mut rng = self.rng.lock().await;
            match rotation::random_tip(&tips, &mut *rng) {
                Some(tip) => tip.to_string(),
                None => rotation::fallback_response(&mut *rng).to_string(),
            }
        };

        let answer = format!("{} {}", rule.intro, body);
        ctx.record_turn(&answer, &category);
        let answer = ctx.personalize(answer, &category);
        BotReply::new(answer, category)
    }

    /// Exact strategies, then fuzzy scoring, then the global fallback.
    async fn resolve(&self, normalized: &str, snap: &Snapshot) -> BotReply {
        // Strategy 1: literal keyword containment, insertion order.
        if let Some(category) = matcher::keyword_category(normalized, &snap.keyword_index) {
            let category = category.to_string();
            let tips = snap.tips_for(&category);
            let mut rng = self.rng.lock().await;
            if let Some(tip) = rotation::random_tip(&tips, &mut *rng) {
                debug!("Keyword containment match: '{}'", category);
                return BotReply::new(tip, category);
            }
        }

        // Strategy 2: whole-word chit-chat, answer returned verbatim.
        if let Some(entry) = matcher::chitchat_entry(normalized, snap.entries.iter()) {
            debug!("Chit-chat match on '{}'", entry.keyword);
            return BotReply::new(entry.answer.clone(), GENERAL_CATEGORY);
        }

        // Fuzzy fallback over all non-General entries.
        let candidates = snap.entries.iter().filter(|e| !e.is_general());
        if let Some((entry, score)) = fuzzy::best_match(normalized, candidates, &self.weights) {
            debug!("Fuzzy match on '{}' (score {:.2})", entry.keyword, score);
            return BotReply::new(entry.answer.clone(), entry.category.clone());
        }

        let mut rng = self.rng.lock().await;
        BotReply::unresolved(rotation::fallback_response(&mut *rng))
    }

    /// All stored keywords, case-insensitively deduplicated, sorted.
    pub async fn all_keywords(&self) -> Result<Vec<String>, AppError> {
        let lock = self.snapshot().await?;
        let snap = lock.read().await;

        let mut keywords: Vec<String> = Vec::new();
        for entry in &snap.entries {
            if !keywords.iter().any(|k| k.eq_ignore_ascii_case(&entry.keyword)) {
                keywords.push(entry.keyword.clone());
            }
        }
        keywords.sort_by_key(|k| k.to_lowercase());
        Ok(keywords)
    }

    /// All distinct categories, in first-appearance order.
    pub async fn all_categories(&self) -> Result<Vec<String>, AppError> {
        let lock = self.snapshot().await?;
        let snap = lock.read().await;
        Ok(snap.categories())
    }

    /// Answers of every entry in `category`, in stable id order. Reads the
    /// store directly; inserts are write-through, so this always agrees with
    /// the snapshot.
    pub async fn related_tips(&self, category: &str) -> Result<Vec<String>, AppError> {
        let entries = database::entries_by_category(&self.pool, category).await?;
        Ok(entries.into_iter().map(|e| e.answer).collect())
    }

    /// Append a `"General"` entry, write-through: the store row first, then
    /// the snapshot, so the entry is immediately visible without a reload.
    /// Never errors to the caller; a store failure leaves the in-memory
    /// state unchanged and is reported as `false`.
    pub async fn insert_entry(&self, keyword: &str, answer: &str) -> bool {
        let keyword = keyword.trim();
        let answer = answer.trim();
        if keyword.is_empty() || answer.is_empty() {
            let err = AppError::Validation("insert requires a keyword and an answer".to_string());
            warn!("Rejected insert: {}", err);
            return false;
        }

        let lock = match self.snapshot().await {
            Ok(lock) => lock,
            Err(e) => {
                warn!("Insert failed, store unavailable: {}", e);
                return false;
            }
        };

        match database::insert_entry(&self.pool, keyword, answer, GENERAL_CATEGORY).await {
            Ok(entry) => {
                info!("Inserted entry #{} '{}'", entry.id, entry.keyword);
                lock.write().await.push(entry);
                true
            }
            Err(e) => {
                warn!("Insert failed, in-memory state unchanged: {}", e);
                false
            }
        }
    }

    /// Store a favorite topic in session memory.
    pub async fn remember_topic(&self, topic: &str) {
        self.context.lock().await.remember_favorite(topic);
    }

    /// Clear session memory, history and last-turn state.
    pub async fn reset_memory(&self) {
        self.context.lock().await.reset();
    }

    /// The recorded inputs of this session, oldest first.
    pub async fn history(&self) -> Vec<String> {
        self.context.lock().await.history().to_vec()
    }
}
