//! # Naming Convention
//!
//! Bidirectional mapping between the short names callers type and the
//! fully-qualified parameter paths kept in the store:
//!
//! ```text
//! / {stage} / {version} / [ {module} / ] {NAME}
//! ```
//!
//! A caller may supply one of four shapes, told apart purely by the number of
//! `/`-separated segments once a single leading slash is removed:
//!
//! | segments | shape                     | stage/version from   |
//! |----------|---------------------------|----------------------|
//! | 1        | `NAME`                    | ambient stage, v1    |
//! | 2        | `module/NAME`             | ambient stage, v1    |
//! | 3        | `stage/version/NAME`      | the name itself      |
//! | 4        | `stage/version/module/NAME` | the name itself    |
//!
//! A two-segment name is always `module/NAME`; there is no heuristic. Empty
//! segments (`firebase/`, `/test/1//FOO`) are rejected.

use crate::config::StageContext;
use crate::constants::DEFAULT_VERSION;
use crate::error::{Result, SsmError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Parsed identity of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathParts {
    /// Absent only when parsing was told to ignore convention errors
    pub stage: Option<String>,
    pub version: u32,
    pub module: Option<String>,
    pub name: String,
}

impl PathParts {
    pub fn new(stage: impl Into<String>, version: u32, name: impl Into<String>) -> Self {
        Self {
            stage: Some(stage.into()),
            version,
            module: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

impl fmt::Display for PathParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build(self))
    }
}

/// The four shapes a caller-supplied name can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawName<'a> {
    Bare {
        name: &'a str,
    },
    Module {
        module: &'a str,
        name: &'a str,
    },
    Versioned {
        stage: &'a str,
        version: &'a str,
        name: &'a str,
    },
    Qualified {
        stage: &'a str,
        version: &'a str,
        module: &'a str,
        name: &'a str,
    },
}

impl<'a> RawName<'a> {
    /// Classify `input` by segment count
    pub fn classify(input: &'a str) -> Result<Self> {
        let trimmed = input.strip_prefix('/').unwrap_or(input);
        let segments: Vec<&'a str> = trimmed.split('/').collect();

        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(SsmError::InvalidFormat {
                message: format!(
                    "The name \"{input}\" has an empty segment; every part of an SSM parameter \
                     name (stage, version, module and NAME) must be non-empty."
                ),
            });
        }

        match segments[..] {
            [name] => Ok(RawName::Bare { name }),
            [module, name] => Ok(RawName::Module { module, name }),
            [stage, version, name] => Ok(RawName::Versioned {
                stage,
                version,
                name,
            }),
            [stage, version, module, name] => Ok(RawName::Qualified {
                stage,
                version,
                module,
                name,
            }),
            _ => Err(SsmError::InvalidFormat {
                message: format!(
                    "The \"name\" in an SSM parameter can be a simple string (aka, FOO) or a shorthand \
                     notation (aka, firebase/FOO) or a fully qualified notation (aka., test/1/firebase/FOO) \
                     but the passed in name -- {input} -- was not recognized as any of these formats."
                ),
            }),
        }
    }
}

/// Parse a caller-supplied name into its path components
///
/// Short forms take their stage from `context`. When the context has no stage the
/// call fails with [`SsmError::NotReady`], unless `ignore_convention_errors` is set,
/// in which case the stage is simply left empty.
pub fn parse(
    input: &str,
    context: &StageContext,
    ignore_convention_errors: bool,
) -> Result<PathParts> {
    let parts = match RawName::classify(input)? {
        RawName::Bare { name } => PathParts {
            stage: ambient_stage(input, context, ignore_convention_errors)?,
            version: DEFAULT_VERSION,
            module: None,
            name: name.to_string(),
        },
        RawName::Module { module, name } => PathParts {
            stage: ambient_stage(input, context, ignore_convention_errors)?,
            version: DEFAULT_VERSION,
            module: Some(module.to_string()),
            name: name.to_string(),
        },
        RawName::Versioned {
            stage,
            version,
            name,
        } => PathParts {
            stage: Some(stage.to_string()),
            version: parse_version(input, version)?,
            module: None,
            name: name.to_string(),
        },
        RawName::Qualified {
            stage,
            version,
            module,
            name,
        } => PathParts {
            stage: Some(stage.to_string()),
            version: parse_version(input, version)?,
            module: Some(module.to_string()),
            name: name.to_string(),
        },
    };

    debug!(input, path = %parts, "Parsed parameter name");
    Ok(parts)
}

/// Serialize components back into a canonical path
///
/// Pure formatter: the parts are assumed well-formed. A missing stage (possible
/// only after parsing with `ignore_convention_errors`) omits that segment.
#[must_use]
pub fn build(parts: &PathParts) -> String {
    let mut path = String::new();
    if let Some(stage) = &parts.stage {
        path.push('/');
        path.push_str(stage);
    }
    path.push('/');
    path.push_str(&parts.version.to_string());
    if let Some(module) = &parts.module {
        path.push('/');
        path.push_str(module);
    }
    path.push('/');
    path.push_str(&parts.name);
    path
}

/// Ensure a path begins with a single `/`
#[must_use]
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn ambient_stage(
    input: &str,
    context: &StageContext,
    ignore_convention_errors: bool,
) -> Result<Option<String>> {
    match context.stage() {
        Some(stage) => Ok(Some(stage.to_string())),
        None if ignore_convention_errors => Ok(None),
        None => Err(SsmError::NotReady {
            name: input.to_string(),
        }),
    }
}

fn parse_version(input: &str, version: &str) -> Result<u32> {
    match version.parse::<u32>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => {
            let joined = input.strip_prefix('/').unwrap_or(input);
            Err(SsmError::InvalidFormat {
                message: format!(
                    "You appear to be using a fully-qualified naming convention with the name \
                     \"{joined}\" but the version specified [ {version} ] is not a valid number!"
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_stage() -> StageContext {
        StageContext::new("test")
    }

    #[test]
    fn test_bare_name_uses_ambient_stage() {
        let parts = parse("foo", &test_stage(), false).unwrap();
        assert_eq!(parts, PathParts::new("test", 1, "foo"));
    }

    #[test]
    fn test_two_segments_are_module_and_name() {
        let parts = parse("firebase/FOO", &test_stage(), false).unwrap();
        assert_eq!(parts, PathParts::new("test", 1, "FOO").with_module("firebase"));
    }

    #[test]
    fn test_fully_qualified_ignores_ambient_stage() {
        let ctx = StageContext::new("prod");
        let parts = parse("test/1/firebase/FOO", &ctx, false).unwrap();
        assert_eq!(parts, PathParts::new("test", 1, "FOO").with_module("firebase"));

        let parts = parse("/test/1/firebase/FOO", &StageContext::unset(), false).unwrap();
        assert_eq!(parts, PathParts::new("test", 1, "FOO").with_module("firebase"));
    }

    #[test]
    fn test_three_segments_have_no_module() {
        let parts = parse("/test/1/FOOBAR", &StageContext::unset(), false).unwrap();
        assert_eq!(parts, PathParts::new("test", 1, "FOOBAR"));
    }

    #[test]
    fn test_leading_slash_is_normalized_once() {
        let ctx = test_stage();
        assert_eq!(
            parse("a/b", &ctx, false).unwrap(),
            parse("/a/b", &ctx, false).unwrap()
        );
    }

    #[test]
    fn test_short_forms_fail_without_stage() {
        let ctx = StageContext::unset();
        for name in ["foo", "firebase/FOO"] {
            let err = parse(name, &ctx, false).unwrap_err();
            assert!(
                matches!(err, SsmError::NotReady { .. }),
                "{name} should fail with NotReady, got {err:?}"
            );
        }
    }

    #[test]
    fn test_short_forms_tolerated_when_ignoring_convention() {
        let parts = parse("firebase/FOO", &StageContext::unset(), true).unwrap();
        assert_eq!(parts.stage, None);
        assert_eq!(parts.version, 1);
        assert_eq!(parts.module.as_deref(), Some("firebase"));
        assert_eq!(build(&parts), "/1/firebase/FOO");
    }

    #[test]
    fn test_invalid_segment_count() {
        for name in ["a/b/c/d/e", "test/1/2/3/4/5"] {
            let err = parse(name, &test_stage(), false).unwrap_err();
            assert_eq!(err.code(), "aws-ssm/invalid-format");
        }
    }

    #[test]
    fn test_non_numeric_version_names_offending_value() {
        let err = parse("test/not-number/firebase/FOO", &test_stage(), false).unwrap_err();
        assert_eq!(err.code(), "aws-ssm/invalid-format");
        let message = err.to_string();
        assert!(message.contains("is not a valid number"));
        assert!(message.contains("not-number"));
        assert!(message.contains("test/not-number/firebase/FOO"));
    }

    #[test]
    fn test_empty_segments_rejected() {
        for name in ["", "/", "firebase/", "test/1/", "/test/1//FOO", "//1/FOO"] {
            let err = parse(name, &test_stage(), false).unwrap_err();
            assert!(
                matches!(err, SsmError::InvalidFormat { ref message } if message.contains(&format!("\"{name}\""))),
                "{name:?} should fail with InvalidFormat naming the input, got {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_segments_rejected_when_ignoring_convention() {
        let err = parse("/test/1/firebase/", &StageContext::unset(), true).unwrap_err();
        assert_eq!(err.code(), "aws-ssm/invalid-format");
    }

    #[test]
    fn test_version_zero_rejected() {
        let err = parse("test/0/FOO", &test_stage(), false).unwrap_err();
        assert!(matches!(err, SsmError::InvalidFormat { .. }));
    }

    #[test]
    fn test_non_numeric_version_is_error_even_when_ignoring_convention() {
        let err = parse("test/x/FOO", &StageContext::unset(), true).unwrap_err();
        assert!(matches!(err, SsmError::InvalidFormat { .. }));
    }

    #[test]
    fn test_build_reverses_parse() {
        let ctx = StageContext::unset();
        for (input, expected) in [
            ("test/1/firebase/KEY", "/test/1/firebase/KEY"),
            ("test/1/KEY", "/test/1/KEY"),
            ("/test/1/KEY", "/test/1/KEY"),
            ("/prod/12/mySql/HOST", "/prod/12/mySql/HOST"),
        ] {
            assert_eq!(build(&parse(input, &ctx, false).unwrap()), expected);
        }
    }

    #[test]
    fn test_parse_reverses_build() {
        let samples = vec![
            PathParts::new("test", 1, "KEY"),
            PathParts::new("prod", 3, "SECRET").with_module("firebase"),
        ];
        for parts in samples {
            assert_eq!(parse(&build(&parts), &StageContext::unset(), false).unwrap(), parts);
        }
    }

    #[test]
    fn test_classify_shapes() {
        assert_eq!(RawName::classify("FOO").unwrap(), RawName::Bare { name: "FOO" });
        assert_eq!(
            RawName::classify("/test/2/FOO").unwrap(),
            RawName::Versioned {
                stage: "test",
                version: "2",
                name: "FOO"
            }
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("test/1"), "/test/1");
        assert_eq!(normalize_path("/test/1"), "/test/1");
    }
}
