//! Validator Chains
//!
//! A chain runs its validators in order against one request and one fresh
//! context. Every validator runs; dependent validators skip their lookups
//! once the context holds an error, while independent ones keep collecting.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::Model;

use super::context::ValidationContext;
use super::errors::{ChainError, ChainResult};
use super::request::ValidationRequest;
use super::validators::{session_model, Validate, Validator};

/// An ordered list of validators
#[derive(Clone)]
pub struct ValidatorChain {
    name: String,
    validators: Vec<Arc<dyn Validate>>,
}

impl ValidatorChain {
    /// Create an empty chain
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validators: Vec::new(),
        }
    }

    /// Append a validator
    pub fn with(mut self, validator: impl Validate + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of validators
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Validator names in run order
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run every validator against `request`
    pub fn run(&self, request: &ValidationRequest<'_>) -> ValidationContext {
        let mut ctx = ValidationContext::new();

        for validator in &self.validators {
            tracing::debug!(
                request_id = %ctx.request_id,
                chain = %self.name,
                validator = validator.name(),
                "running validator"
            );
            validator.validate(request, &mut ctx);
        }

        match ctx.status() {
            Some(status) => tracing::info!(
                request_id = %ctx.request_id,
                chain = %self.name,
                status = status.as_u16(),
                errors = ctx.errors().len(),
                elapsed_ms = ctx.elapsed_ms() as u64,
                "request rejected"
            ),
            None => tracing::debug!(
                request_id = %ctx.request_id,
                chain = %self.name,
                elapsed_ms = ctx.elapsed_ms() as u64,
                "request validated"
            ),
        }

        ctx
    }
}

impl fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("name", &self.name)
            .field("validators", &self.validator_names())
            .finish()
    }
}

/// Chains addressed by name
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<String, ValidatorChain>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chains used by the web views
    pub fn standard() -> Self {
        let chains = [
            ValidatorChain::new("model").with(Validator::ResolveSession),
            ValidatorChain::new("model_by_id").with(Validator::RequireModel),
            ValidatorChain::new("map").with(Validator::RequireMap),
            ValidatorChain::new("environment").with(Validator::RequireEnvironmentEntry),
            ValidatorChain::new("mover").with(Validator::RequireMoverEntry),
            ValidatorChain::new("spill").with(Validator::RequireSpillEntry),
            ValidatorChain::new("wind_mover").with(Validator::RequireWind),
            ValidatorChain::new("coordinates").with(Validator::RequireCoordinates),
            ValidatorChain::new("file_upload").with(Validator::RequireFilename),
            ValidatorChain::new("uploaded_file").with(Validator::RequireUploadedFile),
            ValidatorChain::new("location_file").with(Validator::RequireLocationConfig),
            ValidatorChain::new("location_file_wizard").with(Validator::RequireLocationWizard),
            ValidatorChain::new("new_location_file").with(Validator::RequireNewLocationPath),
        ];

        Self {
            chains: chains
                .into_iter()
                .map(|chain| (chain.name.clone(), chain))
                .collect(),
        }
    }

    /// Add a chain; names are unique
    pub fn register(&mut self, chain: ValidatorChain) -> ChainResult<()> {
        if self.chains.contains_key(&chain.name) {
            return Err(ChainError::DuplicateChain(chain.name));
        }
        self.chains.insert(chain.name.clone(), chain);
        Ok(())
    }

    pub fn get(&self, name: &str) -> ChainResult<&ValidatorChain> {
        self.chains
            .get(name)
            .ok_or_else(|| ChainError::UnknownChain(name.to_string()))
    }

    /// Registered chain names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.chains.keys().map(String::as_str).collect()
    }
}

/// Run the chain called `name` against `request`
pub fn run_validator_chain(
    registry: &ChainRegistry,
    name: &str,
    request: &ValidationRequest<'_>,
) -> ChainResult<ValidationContext> {
    Ok(registry.get(name)?.run(request))
}

/// Hand the session's model (or a newly created one) to `handler`
pub fn with_session_model<R>(
    request: &ValidationRequest<'_>,
    handler: impl FnOnce(Arc<dyn Model>, &ValidationRequest<'_>) -> R,
) -> R {
    let model = session_model(request).unwrap_or_else(|| request.services().models.create());
    handler(model, request)
}
