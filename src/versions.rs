//! # Version Resolver
//!
//! Groups flat parameter listings back into `module -> version -> variable`
//! structures and picks one version per module.
//!
//! "Latest" is the numerically **lowest** version key present. This mirrors the
//! behaviour existing deployments rely on; see DESIGN.md before changing it.

use crate::config::StageContext;
use crate::error::{Result, SsmError};
use crate::naming;
use crate::types::ParameterRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Variable name -> record
pub type VariableMap = BTreeMap<String, ParameterRecord>;

/// Version number -> variables, ordered ascending
pub type VersionMap = BTreeMap<u32, VariableMap>;

/// Transient `module -> version -> variable -> record` aggregate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleVersionIndex {
    modules: BTreeMap<String, VersionMap>,
}

impl ModuleVersionIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index by re-parsing each record's stored path
    ///
    /// Records whose path does not follow the convention, or that carry no module,
    /// are left out.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ParameterRecord>,
    {
        let no_stage = StageContext::unset();
        let mut index = Self::new();

        for record in records {
            let parts = match naming::parse(&record.path, &no_stage, true) {
                Ok(parts) => parts,
                Err(e) => {
                    debug!(path = %record.path, error = %e, "Skipping non-conforming parameter path");
                    continue;
                }
            };
            match (parts.stage, parts.module) {
                (Some(_), Some(module)) => index.insert(module, parts.version, parts.name, record),
                _ => debug!(path = %record.path, "Skipping parameter without a module"),
            }
        }

        index
    }

    /// Add a record, annotating it with its module and variable name
    pub fn insert(
        &mut self,
        module: String,
        version: u32,
        variable: String,
        mut record: ParameterRecord,
    ) {
        record.module = Some(module.clone());
        record.variable = Some(variable.clone());
        self.modules
            .entry(module)
            .or_default()
            .entry(version)
            .or_default()
            .insert(variable, record);
    }

    #[must_use]
    pub fn module(&self, module: &str) -> Option<&VersionMap> {
        self.modules.get(module)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Variables of one module, either as bare values or full records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleVariables {
    Values(BTreeMap<String, String>),
    Records(VariableMap),
}

impl ModuleVariables {
    #[must_use]
    pub fn empty(verbose: bool) -> Self {
        if verbose {
            ModuleVariables::Records(BTreeMap::new())
        } else {
            ModuleVariables::Values(BTreeMap::new())
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ModuleVariables::Values(values) => values.len(),
            ModuleVariables::Records(records) => records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bare value of a variable regardless of projection
    #[must_use]
    pub fn value(&self, variable: &str) -> Option<&str> {
        match self {
            ModuleVariables::Values(values) => values.get(variable).map(String::as_str),
            ModuleVariables::Records(records) => records.get(variable).map(|r| r.value.as_str()),
        }
    }

    /// Full record of a variable; only available for verbose results
    #[must_use]
    pub fn record(&self, variable: &str) -> Option<&ParameterRecord> {
        match self {
            ModuleVariables::Values(_) => None,
            ModuleVariables::Records(records) => records.get(variable),
        }
    }
}

/// Variables of the "latest" version of a module (lowest version key)
#[must_use]
pub fn latest(versions: &VersionMap, verbose: bool) -> ModuleVariables {
    match versions.iter().next() {
        Some((version, variables)) => {
            debug!(version, "Selected latest module version");
            project(variables, verbose)
        }
        None => ModuleVariables::empty(verbose),
    }
}

/// Variables of an explicitly requested version of a module
///
/// A module with no data at all yields an empty result; a module that has data
/// but not the requested version fails with [`SsmError::VersionNotFound`].
pub fn specific(
    module: &str,
    versions: &VersionMap,
    version: u32,
    verbose: bool,
) -> Result<ModuleVariables> {
    if versions.is_empty() {
        return Ok(ModuleVariables::empty(verbose));
    }
    versions
        .get(&version)
        .map(|variables| project(variables, verbose))
        .ok_or_else(|| SsmError::VersionNotFound {
            module: module.to_string(),
            version,
        })
}

/// Flatten a variable map into a list, each record naming its variable
#[must_use]
pub fn flatten(variables: &VariableMap) -> Vec<ParameterRecord> {
    variables
        .iter()
        .map(|(variable, record)| {
            let mut record = record.clone();
            record.variable = Some(variable.clone());
            record
        })
        .collect()
}

fn project(variables: &VariableMap, verbose: bool) -> ModuleVariables {
    if verbose {
        ModuleVariables::Records(variables.clone())
    } else {
        ModuleVariables::Values(
            variables
                .iter()
                .map(|(name, record)| (name.clone(), record.value.clone()))
                .collect(),
        )
    }
}
