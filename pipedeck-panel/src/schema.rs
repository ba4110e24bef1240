//! Per-step required fields.
//!
//! Each step's trigger payload has its own field names. The registry checks
//! that the required ones are present and non-blank before anything is sent.

use crate::error::{PanelError, Result};
use pipedeck_client::{StepName, StepPayload};
use std::collections::BTreeMap;

/// Required fields for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSchema {
    step: StepName,
    required: Vec<String>,
}

impl StepSchema {
    /// Create a schema.
    pub fn new<I, S>(step: impl Into<StepName>, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            step: step.into(),
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    /// Step this schema applies to.
    pub fn step(&self) -> &StepName {
        &self.step
    }

    /// Required field names in declaration order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Names of required fields that are absent or blank in `payload`.
    pub fn missing(&self, payload: &StepPayload) -> Vec<String> {
        self.required
            .iter()
            .filter(|field| {
                payload
                    .get(field)
                    .is_none_or(|value| value.trim().is_empty())
            })
            .cloned()
            .collect()
    }
}

/// Collection of step schemas.
///
/// Steps without a registered schema accept any payload.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<StepName, StepSchema>,
}

impl SchemaRegistry {
    /// Registry with no schemas; every payload passes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry for the stock release pipeline.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(StepSchema::new(
            "commit",
            ["repoPath", "baseRelease", "targetRelease", "jiraRef", "appName"],
        ));
        registry.register(StepSchema::new(
            "report",
            ["jsonFile", "title", "release", "subtitle", "version", "date"],
        ));
        registry.register(StepSchema::new(
            "security",
            ["RemoteReleaseVersion", "RemoteAppName", "username", "password"],
        ));
        registry.register(StepSchema::new(
            "incrementals",
            ["RepoPath", "AppName", "BaseVersion", "TargetVersion", "JiraRef"],
        ));
        registry.register(StepSchema::new(
            "angular",
            [
                "ReleaseVersion",
                "RemoteReleaseVersion",
                "RemoteAppName",
                "JenkinsUser",
                "JenkinsToken",
            ],
        ));
        for step in ["attach", "zip", "email", "staas"] {
            registry.register(StepSchema::new(step, Vec::<String>::new()));
        }
        registry
    }

    /// Add or replace a schema.
    pub fn register(&mut self, schema: StepSchema) {
        self.schemas.insert(schema.step.clone(), schema);
    }

    /// Look up the schema for a step.
    pub fn get(&self, step: &StepName) -> Option<&StepSchema> {
        self.schemas.get(step)
    }

    /// Iterate over registered schemas in step-name order.
    pub fn iter(&self) -> impl Iterator<Item = &StepSchema> {
        self.schemas.values()
    }

    /// Check `payload` against the schema for `step`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] listing every missing field.
    pub fn validate(&self, step: &StepName, payload: &StepPayload) -> Result<()> {
        let Some(schema) = self.schemas.get(step) else {
            return Ok(());
        };

        let missing = schema.missing(payload);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PanelError::Validation {
                step: step.clone(),
                missing,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angular_payload() -> StepPayload {
        StepPayload::new()
            .with("ReleaseVersion", "26.1.0")
            .with("RemoteReleaseVersion", "R26.0.0.1.2")
            .with("RemoteAppName", "ORM")
            .with("JenkinsUser", "builder")
            .with("JenkinsToken", "t0k3n")
    }

    #[test]
    fn complete_payload_passes() {
        let registry = SchemaRegistry::builtin();
        assert!(registry
            .validate(&"angular".into(), &angular_payload())
            .is_ok());
    }

    #[test]
    fn missing_and_blank_fields_are_reported_in_order() {
        let registry = SchemaRegistry::builtin();
        let payload = StepPayload::new()
            .with("repoPath", "/src/app")
            .with("baseRelease", "   ")
            .with("appName", "orm");

        let err = registry.validate(&"commit".into(), &payload).unwrap_err();
        match err {
            PanelError::Validation { step, missing } => {
                assert_eq!(step.as_str(), "commit");
                assert_eq!(missing, vec!["baseRelease", "targetRelease", "jiraRef"]);
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn unregistered_steps_accept_anything() {
        let registry = SchemaRegistry::builtin();
        assert!(registry
            .validate(&"deploy-canary".into(), &StepPayload::new())
            .is_ok());
        assert!(SchemaRegistry::empty()
            .validate(&"commit".into(), &StepPayload::new())
            .is_ok());
    }

    #[test]
    fn field_free_steps_accept_empty_payload() {
        let registry = SchemaRegistry::builtin();
        for step in ["zip", "email", "staas", "attach"] {
            assert!(registry.validate(&step.into(), &StepPayload::new()).is_ok());
        }
    }

    #[test]
    fn validation_message_lists_fields() {
        let err = PanelError::Validation {
            step: "security".into(),
            missing: vec!["username".into(), "password".into()],
        };
        assert_eq!(
            err.to_string(),
            "step 'security' is missing required fields: username, password"
        );
    }
}
