//! # Bartender Service
//!
//! Coordinates the pieces behind the HTTP API:
//! 1. Session bookkeeping (`SessionStore`)
//! 2. Question selection with conditional skips (`QuestionFlow`)
//! 3. The recommendation engine on the terminal answer
//! 4. Phrasing of replies, with a neutral fallback on any failure
//!
//! Session locks are only held inside `SessionStore` calls, never across
//! an `.await`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};

use catalog::{CatalogItem, CatalogKind, Catalogs};
use phrasing::prompts::{intermediate_request, recommendation_request};
use phrasing::{
    FALLBACK_RESPONSE, OpenAiPhraser, PhrasingRequest, PhrasingService, StaticPhraser,
    TimeoutPhraser,
};
use questionnaire::{
    AnswerInput, QuestionFlow, QuestionView, QuestionnaireError, SessionId, SessionStore,
};
use recommender::{Outcome, RecommendationEngine, SidePolicy, WineScorer};

use crate::config::ServerConfig;

/// What the guest gets back after submitting an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerReply {
    /// A non-final answer: a bit of banter.
    Banter(String),
    /// The final answer produced a drink from each catalog.
    Recommended {
        primary: CatalogItem,
        vendor: CatalogItem,
        response: String,
    },
    /// The final answer could not be served; informational.
    Warning(String),
    /// The final answer could not be served.
    Rejected(String),
}

/// Liveness snapshot for `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub sessions: usize,
    pub primary_items: usize,
    pub vendor_items: usize,
}

pub struct BartenderService {
    sessions: SessionStore,
    flow: QuestionFlow,
    engine: RecommendationEngine,
    policy: SidePolicy,
    phraser: Arc<dyn PhrasingService>,
}

impl BartenderService {
    pub fn new(catalogs: Arc<Catalogs>, phraser: Arc<dyn PhrasingService>) -> Self {
        let flow = QuestionFlow::default();
        Self {
            sessions: SessionStore::new(flow.len()),
            flow,
            engine: RecommendationEngine::new(catalogs),
            policy: SidePolicy::default(),
            phraser,
        }
    }

    pub fn with_policy(mut self, policy: SidePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_pinned_wines<I, S>(mut self, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engine = self
            .engine
            .with_wine_scorer(WineScorer::new().with_pinned(pins));
        self
    }

    /// Load both catalogs and pick a phraser as configured.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        info!("Loading catalogs...");
        let catalogs = Catalogs::load_from_files(&config.primary_catalog, &config.vendor_catalog);
        let (primary, vendor) = catalogs.counts();
        info!(primary, vendor, "Catalogs loaded");

        let phraser: Arc<dyn PhrasingService> = match &config.openai_api_key {
            Some(key) => {
                let client = OpenAiPhraser::new(key, &config.openai_base_url, &config.model)
                    .context("Failed to build phrasing client")?;
                Arc::new(TimeoutPhraser::new(client, config.phrasing_timeout()))
            }
            None => {
                warn!("No OPENAI_API_KEY set, using canned replies");
                Arc::new(StaticPhraser::default())
            }
        };

        Ok(Self::new(Arc::new(catalogs), phraser)
            .with_policy(config.side_policy())
            .with_pinned_wines(config.pins.iter().cloned()))
    }

    pub fn catalogs(&self) -> &Catalogs {
        self.engine.catalogs()
    }

    pub fn start(&self) -> SessionId {
        self.sessions.create()
    }

    pub fn toggle_speech(&self, id: &str, enabled: bool) -> Result<(), QuestionnaireError> {
        self.sessions.set_speech_enabled(id, enabled)?;
        info!(session = %id, enabled, "Speech toggled");
        Ok(())
    }

    /// The question to show next, after persisting any skips.
    pub fn question(&self, id: &str) -> Result<QuestionView, QuestionnaireError> {
        self.sessions.next_question(id, &self.flow)
    }

    pub async fn answer(
        &self,
        id: &str,
        answer: AnswerInput,
    ) -> Result<AnswerReply, QuestionnaireError> {
        let submitted = self.sessions.submit_answer(id, answer)?;
        let answered = submitted.previous_index;
        let answers = submitted.answers;

        let is_terminal = self
            .flow
            .spec(answered)
            .is_some_and(|spec| spec.is_terminal);

        if is_terminal {
            return Ok(self.recommend(id, &answers).await);
        }

        let drink = answers.first().map(String::as_str).unwrap_or_default();
        let latest = answers.last().map(String::as_str).unwrap_or_default();
        let response = match intermediate_request(answered, drink, latest) {
            Some(request) => self.phrase(request).await,
            None => FALLBACK_RESPONSE.to_string(),
        };
        Ok(AnswerReply::Banter(response))
    }

    async fn recommend(&self, id: &str, answers: &[String]) -> AnswerReply {
        let start = Instant::now();

        let recommendation = match self.engine.recommend(answers, self.policy) {
            Ok(Outcome::Recommended(recommendation)) => recommendation,
            Ok(Outcome::Warning(message)) => {
                warn!(session = %id, "Recommendation downgraded: {}", message);
                return AnswerReply::Warning(message);
            }
            Err(e) => {
                warn!(session = %id, answers = ?answers, "Recommendation failed: {}", e);
                return AnswerReply::Rejected(e.to_string());
            }
        };

        log_recommendation(CatalogKind::Primary, &recommendation.primary);
        log_recommendation(CatalogKind::Vendor, &recommendation.vendor);

        let occasion = answers.last().map(String::as_str).unwrap_or_default();
        let response = self
            .phrase(recommendation_request(&recommendation.primary, occasion))
            .await;

        info!(
            session = %id,
            "Recommendation served in {:.2?}",
            start.elapsed()
        );

        AnswerReply::Recommended {
            primary: recommendation.primary,
            vendor: recommendation.vendor,
            response,
        }
    }

    async fn phrase(&self, request: PhrasingRequest) -> String {
        match self.phraser.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(service = self.phraser.name(), "Phrasing failed, using fallback: {}", e);
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    pub fn reset(&self, id: &str) -> Result<(), QuestionnaireError> {
        self.sessions.reset(id)
    }

    pub fn close(&self, id: &str) -> Result<(), QuestionnaireError> {
        self.sessions.close(id)
    }

    pub fn purge_expired(&self, ttl: Duration) -> usize {
        self.sessions.purge_expired(ttl)
    }

    pub fn health(&self) -> Health {
        let (primary_items, vendor_items) = self.catalogs().counts();
        Health {
            sessions: self.sessions.len(),
            primary_items,
            vendor_items,
        }
    }
}

fn log_recommendation(kind: CatalogKind, item: &CatalogItem) {
    info!(
        catalog = %kind,
        name = %item.name,
        description = %item.description,
        flavor_profile = %item.flavor_profile,
        alcohol_content = ?item.alcohol_content,
        pairing = %item.pairing,
        occasion = %item.occasion,
        category = %item.category,
        image_name = ?item.image_name,
        image_icon = ?item.image_icon,
        "Recommended drink"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> BartenderService {
        let primary = vec![
            CatalogItem::new("Hazy IPA", "beer")
                .with_flavor("fruity, hoppy")
                .with_level("medium"),
            CatalogItem::new("Rioja Reserva", "red wine")
                .with_flavor("oaked, spicy")
                .with_occasion("bbq"),
        ];
        let vendor = vec![
            CatalogItem::new("Retail Pale Ale", "beer")
                .with_flavor("hoppy")
                .with_level("medium"),
        ];
        BartenderService::new(
            Arc::new(Catalogs::new(primary, vendor)),
            Arc::new(StaticPhraser::new("Nice pick!")),
        )
    }

    #[tokio::test]
    async fn test_beer_walkthrough() {
        let service = service();
        let id = service.start();

        for answer in ["Beer", "Fruity, Hoppy, Sour", "Medium"] {
            let reply = service.answer(&id, answer.into()).await.unwrap();
            assert_eq!(reply, AnswerReply::Banter("Nice pick!".into()));
        }

        let view = service.question(&id).unwrap();
        assert!(view.is_terminal);

        match service.answer(&id, "BBQ".into()).await.unwrap() {
            AnswerReply::Recommended { primary, vendor, response } => {
                assert_eq!(primary.name, "Hazy IPA");
                assert_eq!(vendor.name, "Retail Pale Ale");
                assert_eq!(response, "Nice pick!");
            }
            other => panic!("expected a recommendation, got {:?}", other),
        }

        assert_eq!(service.question(&id), Err(QuestionnaireError::NoMoreQuestions));
    }

    #[tokio::test]
    async fn test_wine_without_vendor_match_is_rejected_by_default() {
        let service = service();
        let id = service.start();
        for answer in ["Red Wine", "Oaked, Spicy, Fruity", "High"] {
            service.answer(&id, answer.into()).await.unwrap();
        }

        let reply = service.answer(&id, "BBQ".into()).await.unwrap();
        assert_eq!(
            reply,
            AnswerReply::Rejected("No matching drink found in systembolaget.".into())
        );
    }

    #[tokio::test]
    async fn test_unknown_drink_skips_to_occasion() {
        let service = service();
        let id = service.start();
        service.answer(&id, "Cider".into()).await.unwrap();

        let view = service.question(&id).unwrap();
        assert_eq!(view.index, 3);

        let reply = service.answer(&id, "BBQ".into()).await.unwrap();
        assert!(matches!(reply, AnswerReply::Rejected(_)));
    }

    #[test]
    fn test_health_counts() {
        let service = service();
        service.start();

        assert_eq!(
            service.health(),
            Health {
                sessions: 1,
                primary_items: 2,
                vendor_items: 1
            }
        );
    }
}
