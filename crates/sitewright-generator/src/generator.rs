//! Core Generator implementation

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::hints::extract_hints;
use crate::prompt::{system_prompt, PromptBuilder};
use crate::sanitizer::sanitize;
use crate::types::{GenerationRequest, GenerationResult};
use sitewright_domain::traits::KeyedStore;
use sitewright_domain::{ContentId, StoredDocument};
use sitewright_llm::ModelProvider;
use sitewright_store::ContentStore;
use sitewright_validator::ContentValidator;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// The Generator turns prompts into validated, stored website documents
pub struct Generator<P, S>
where
    P: ModelProvider,
    S: KeyedStore,
{
    provider: Arc<P>,
    store: Arc<Mutex<ContentStore<S>>>,
    validator: ContentValidator,
    config: GeneratorConfig,
}

impl<P, S> Generator<P, S>
where
    P: ModelProvider,
    S: KeyedStore + Send + 'static,
    S::Error: std::fmt::Display,
{
    /// Create a new Generator
    pub fn new(provider: P, store: S, config: GeneratorConfig) -> Self {
        let validator = ContentValidator::new(config.validation.clone());
        Self {
            provider: Arc::new(provider),
            store: Arc::new(Mutex::new(ContentStore::new(store))),
            validator,
            config,
        }
    }

    /// The model provider in use
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate, validate and store a website for `request`
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GeneratorError> {
        let prompt = request.prompt;
        if prompt.trim().is_empty() {
            return Err(GeneratorError::InvalidInput("Invalid prompt".to_string()));
        }
        let length = prompt.chars().count();
        if length > self.config.max_prompt_length {
            return Err(GeneratorError::InvalidInput(format!(
                "Prompt too long: {} chars (max: {})",
                length, self.config.max_prompt_length
            )));
        }

        if !self.provider.is_configured() {
            return Err(GeneratorError::Config(
                "Model token is not configured. Set GITHUB_TOKEN or [model].token.".to_string(),
            ));
        }

        let hints = request.style_hints.unwrap_or_else(|| extract_hints(&prompt));
        info!(?hints, model = self.provider.model_name(), "Starting generation");

        let user_message = PromptBuilder::new(prompt).with_hints(hints.clone()).build();
        debug!("User message length: {} chars", user_message.len());

        let raw = self.provider.complete(system_prompt(), &user_message).await?;
        debug!("Model response length: {} chars", raw.len());

        let outcome = sanitize(&raw)?;
        if outcome.recovered {
            warn!("Using fallback content structure");
        }

        let content = self.validator.validate(&outcome.candidate).map_err(|e| {
            warn!(error = %e, "Generated content failed validation");
            GeneratorError::Validation(e)
        })?;

        let document = content.clone();
        let id = self
            .with_store(move |store| store.save(&document))
            .await?;

        info!(%id, sections = content.sections.len(), "Generation complete");

        Ok(GenerationResult {
            id,
            content,
            hints,
            recovered: outcome.recovered,
        })
    }

    /// Fetch a stored document by id
    pub async fn load(&self, id: ContentId) -> Result<Option<StoredDocument>, GeneratorError> {
        self.with_store(move |store| store.load(id)).await
    }

    /// Fetch the most recently stored document
    pub async fn latest(&self) -> Result<Option<StoredDocument>, GeneratorError> {
        self.with_store(|store| store.latest()).await
    }

    /// Run a store operation on the blocking pool
    async fn with_store<T, F>(&self, op: F) -> Result<T, GeneratorError>
    where
        T: Send + 'static,
        F: FnOnce(&mut ContentStore<S>) -> Result<T, S::Error> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let mut guard = store
                .lock()
                .map_err(|_| GeneratorError::Store("content store lock poisoned".to_string()))?;
            op(&mut *guard).map_err(|e| GeneratorError::Store(e.to_string()))
        })
        .await
        .map_err(|e| GeneratorError::Store(format!("storage task failed: {}", e)))?
    }
}
