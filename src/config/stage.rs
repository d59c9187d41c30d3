//! # Stage Context
//!
//! The ambient "current stage" consumed by the naming convention.
//!
//! Parsing never reads process state itself; it is handed a [`StageContext`]. The
//! facade decides where that context comes from through [`StageSource`].

use crate::constants::{STAGE_ENV_VAR, STAGE_FALLBACK_ENV_VAR};

/// Explicit stage value passed into the path codec
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageContext {
    pub stage: Option<String>,
}

impl StageContext {
    /// Context with a known stage
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: Some(stage.into()),
        }
    }

    /// Context with no stage set
    #[must_use]
    pub fn unset() -> Self {
        Self { stage: None }
    }

    /// Read `AWS_STAGE`, falling back to `NODE_ENV`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the stage through an arbitrary variable lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let stage = [STAGE_ENV_VAR, STAGE_FALLBACK_ENV_VAR]
            .into_iter()
            .filter_map(&lookup)
            .find(|value| !value.is_empty());
        Self { stage }
    }

    #[must_use]
    pub fn stage(&self) -> Option<&str> {
        self.stage.as_deref()
    }
}

/// Where the facade obtains its stage on each call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StageSource {
    /// Re-read the process environment on every operation
    #[default]
    Process,
    /// Always use the given context
    Fixed(StageContext),
}

impl StageSource {
    #[must_use]
    pub fn current(&self) -> StageContext {
        match self {
            StageSource::Process => StageContext::from_env(),
            StageSource::Fixed(context) => context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_primary_variable_wins() {
        let ctx = StageContext::from_lookup(lookup(&[("AWS_STAGE", "prod"), ("NODE_ENV", "dev")]));
        assert_eq!(ctx.stage(), Some("prod"));
    }

    #[test]
    fn test_fallback_variable_used() {
        let ctx = StageContext::from_lookup(lookup(&[("NODE_ENV", "dev")]));
        assert_eq!(ctx.stage(), Some("dev"));
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let ctx = StageContext::from_lookup(lookup(&[("AWS_STAGE", ""), ("NODE_ENV", "")]));
        assert_eq!(ctx, StageContext::unset());

        let ctx = StageContext::from_lookup(lookup(&[("AWS_STAGE", ""), ("NODE_ENV", "test")]));
        assert_eq!(ctx.stage(), Some("test"));
    }

    #[test]
    fn test_fixed_source_ignores_environment() {
        let source = StageSource::Fixed(StageContext::new("test"));
        assert_eq!(source.current().stage(), Some("test"));
    }
}
