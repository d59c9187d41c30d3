//! # Facade Tests
//!
//! End-to-end behaviour of [`Ssm`] against the in-memory parameter store:
//! - Name resolution against a fixed stage
//! - Value coercion on write
//! - Overwrite protection and not-found mapping
//! - Module lookup with latest/specific version selection

use aws_ssm::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn ssm_with_stage(stage: Option<&str>) -> (Ssm, InMemoryParameterStore) {
    let store = InMemoryParameterStore::new();
    let context = stage.map_or_else(StageContext::unset, StageContext::new);
    let ssm = Ssm::new(Arc::new(store.clone()), SsmConfig::default())
        .with_stage_source(StageSource::Fixed(context));
    (ssm, store)
}

fn plain() -> PutOptions {
    PutOptions {
        encrypt: Some(false),
        ..PutOptions::default()
    }
}

async fn seed(ssm: &Ssm, entries: &[(&str, &str)]) {
    for (name, value) in entries {
        ssm.put(name, &json!(value), &plain()).await.unwrap();
    }
}

#[tokio::test]
async fn test_put_then_get_uses_current_stage() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    ssm.put("firebase/API_KEY", &json!("abc"), &plain())
        .await
        .unwrap();

    let record = ssm
        .get("firebase/API_KEY", &GetOptions::default())
        .await
        .unwrap();
    assert_eq!(record.path, "/test/1/firebase/API_KEY");
    assert_eq!(record.value, "abc");
    assert_eq!(record.parameter_type, ParameterType::String);
    assert!(!record.encrypted);

    let same = ssm
        .get("/test/1/firebase/API_KEY", &GetOptions::default())
        .await
        .unwrap();
    assert_eq!(same.value, "abc");
}

#[tokio::test]
async fn test_secure_string_is_flagged_until_decrypted() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    ssm.put("SECRET", &json!("hunter2"), &PutOptions::default())
        .await
        .unwrap();

    let hidden = ssm.get("SECRET", &GetOptions::default()).await.unwrap();
    assert_eq!(hidden.parameter_type, ParameterType::SecureString);
    assert!(hidden.encrypted);
    assert_ne!(hidden.value, "hunter2");
    assert!(matches!(
        hidden.env_value(),
        Err(SsmError::NotAllowed { .. })
    ));

    let shown = ssm
        .get(
            "SECRET",
            &GetOptions {
                decrypt: true,
                ..GetOptions::default()
            },
        )
        .await
        .unwrap();
    assert!(!shown.encrypted);
    assert_eq!(shown.env_value().unwrap(), "hunter2");
}

#[tokio::test]
async fn test_default_type_applies_when_encrypt_unspecified() {
    let store = InMemoryParameterStore::new();
    let config = SsmConfig {
        default_type: ParameterType::String,
        ..SsmConfig::default()
    };
    let ssm = Ssm::new(Arc::new(store), config)
        .with_stage_source(StageSource::Fixed(StageContext::new("test")));

    ssm.put("FOO", &json!("bar"), &PutOptions::default())
        .await
        .unwrap();
    let record = ssm.get("FOO", &GetOptions::default()).await.unwrap();
    assert_eq!(record.parameter_type, ParameterType::String);

    ssm.put(
        "BAZ",
        &json!("qux"),
        &PutOptions {
            encrypt: Some(true),
            ..PutOptions::default()
        },
    )
    .await
    .unwrap();
    let record = ssm.get("BAZ", &GetOptions::default()).await.unwrap();
    assert_eq!(record.parameter_type, ParameterType::SecureString);
}

#[tokio::test]
async fn test_values_are_coerced_on_write() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    ssm.put("COUNT", &json!(42), &plain()).await.unwrap();
    ssm.put("ENABLED", &json!(true), &plain()).await.unwrap();
    ssm.put("SETTINGS", &json!({"a": 1}), &plain())
        .await
        .unwrap();

    let get = |name: &'static str| {
        let ssm = &ssm;
        async move { ssm.get(name, &GetOptions::default()).await.unwrap().value }
    };
    assert_eq!(get("COUNT").await, "NUMBER(42)");
    assert_eq!(get("ENABLED").await, "__TRUE__");
    assert_eq!(get("SETTINGS").await, r#"{"a":1}"#);
    assert_eq!(from_stored_string(&get("COUNT").await), json!(42));
}

#[tokio::test]
async fn test_put_without_override_conflicts() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    ssm.put("FOO", &json!("a"), &plain()).await.unwrap();

    let err = ssm.put("FOO", &json!("b"), &plain()).await.unwrap_err();
    assert_eq!(err.code(), "aws-ssm/store");

    let version = ssm
        .put(
            "FOO",
            &json!("b"),
            &PutOptions {
                override_existing: true,
                ..plain()
            },
        )
        .await
        .unwrap();
    assert_eq!(version, 2);
}

#[tokio::test]
async fn test_description_and_key_are_forwarded() {
    let (ssm, store) = ssm_with_stage(Some("test"));
    ssm.put(
        "FOO",
        &json!("a"),
        &PutOptions {
            description: Some("the foo".to_string()),
            encryption_key: Some("alias/ssm".to_string()),
            ..PutOptions::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(
        store.description("/test/1/FOO").await.as_deref(),
        Some("the foo")
    );
    assert_eq!(
        store.key_id("/test/1/FOO").await.as_deref(),
        Some("alias/ssm")
    );
}

#[tokio::test]
async fn test_missing_parameter_maps_to_not_found() {
    let (ssm, _) = ssm_with_stage(Some("test"));

    let err = ssm.get("NOPE", &GetOptions::default()).await.unwrap_err();
    assert!(matches!(err, SsmError::ParameterNotFound { ref name } if name == "/test/1/NOPE"));
    assert_eq!(err.code(), "aws-ssm/parameter-not-found");

    let err = ssm
        .delete("NOPE", &DeleteOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SsmError::ParameterNotFound { .. }));
}

#[tokio::test]
async fn test_short_names_need_a_stage() {
    let (ssm, store) = ssm_with_stage(None);

    let err = ssm.put("FOO", &json!("a"), &plain()).await.unwrap_err();
    assert!(matches!(err, SsmError::NotReady { .. }));
    assert!(store.is_empty().await);

    ssm.put("/prod/1/FOO", &json!("a"), &plain()).await.unwrap();
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_empty_segment_fails_before_store() {
    let (ssm, store) = ssm_with_stage(Some("test"));

    for name in ["firebase/", "/test/1//FOO", ""] {
        let err = ssm.put(name, &json!("a"), &plain()).await.unwrap_err();
        assert!(
            matches!(err, SsmError::InvalidFormat { .. }),
            "{name:?} should fail with InvalidFormat, got {err:?}"
        );
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_non_standard_path_bypasses_convention() {
    let (ssm, _) = ssm_with_stage(None);
    let options = PutOptions {
        non_standard_path: true,
        ..plain()
    };
    ssm.put("legacy/a/b/c/d/VALUE", &json!("x"), &options)
        .await
        .unwrap();

    let record = ssm
        .get(
            "legacy/a/b/c/d/VALUE",
            &GetOptions {
                non_standard_path: true,
                ..GetOptions::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(record.path, "/legacy/a/b/c/d/VALUE");

    ssm.delete(
        "/legacy/a/b/c/d/VALUE",
        &DeleteOptions {
            non_standard_path: true,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_delete_removes_parameter() {
    let (ssm, store) = ssm_with_stage(Some("test"));
    seed(&ssm, &[("FOO", "a")]).await;

    ssm.delete("FOO", &DeleteOptions::default()).await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_list_scopes_and_filters() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    seed(
        &ssm,
        &[
            ("/test/1/firebase/API_KEY", "a"),
            ("/test/1/firebase/DB_URL", "b"),
            ("/test/1/stripe/API_KEY", "c"),
            ("/prod/1/firebase/API_KEY", "d"),
        ],
    )
    .await;

    assert_eq!(ssm.list(ListOptions::default()).await.unwrap().len(), 4);
    assert_eq!(ssm.list("test").await.unwrap().len(), 3);

    let keys = ssm
        .list(ListOptions {
            path: Some("/test".to_string()),
            contains: Some("API_KEY".to_string()),
            decrypt: false,
        })
        .await
        .unwrap();
    let paths: Vec<&str> = keys.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["/test/1/firebase/API_KEY", "/test/1/stripe/API_KEY"]
    );
}

#[tokio::test]
async fn test_values_decrypts() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    ssm.put("SECRET", &json!("hunter2"), &PutOptions::default())
        .await
        .unwrap();

    let values = ssm.values(Some("/test")).await.unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, "hunter2");
}

#[tokio::test]
async fn test_modules_picks_lowest_version_as_latest() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    seed(
        &ssm,
        &[
            ("/test/1/firebase/API_KEY", "v1-key"),
            ("/test/2/firebase/API_KEY", "v2-key"),
            ("/test/2/firebase/DB_URL", "v2-db"),
            ("/test/1/stripe/TOKEN", "tok"),
            ("/prod/1/firebase/API_KEY", "prod-key"),
            ("/test/1/TOP_LEVEL", "ignored"),
        ],
    )
    .await;

    let modules = ssm
        .modules(&["firebase", "stripe"], &ModuleOptions::default())
        .await
        .unwrap();

    let firebase = &modules["firebase"];
    assert_eq!(firebase.len(), 1);
    assert_eq!(firebase.value("API_KEY"), Some("v1-key"));
    assert_eq!(modules["stripe"].value("TOKEN"), Some("tok"));
}

#[tokio::test]
async fn test_modules_specific_version() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    seed(
        &ssm,
        &[
            ("/test/1/firebase/API_KEY", "v1-key"),
            ("/test/2/firebase/API_KEY", "v2-key"),
            ("/test/2/firebase/DB_URL", "v2-db"),
        ],
    )
    .await;

    let options = ModuleOptions {
        version: Some(2),
        verbose: false,
    };
    let modules = ssm.modules(&["firebase"], &options).await.unwrap();
    assert_eq!(modules["firebase"].len(), 2);
    assert_eq!(modules["firebase"].value("API_KEY"), Some("v2-key"));

    let options = ModuleOptions {
        version: Some(7),
        verbose: false,
    };
    let err = ssm.modules(&["firebase"], &options).await.unwrap_err();
    assert!(matches!(
        err,
        SsmError::VersionNotFound { ref module, version: 7 } if module == "firebase"
    ));
    assert_eq!(err.code(), "aws-ssm/version-not-found");
}

#[tokio::test]
async fn test_modules_unknown_module_is_empty() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    seed(&ssm, &[("/test/1/firebase/API_KEY", "a")]).await;

    let options = ModuleOptions {
        version: Some(3),
        verbose: false,
    };
    let modules = ssm
        .modules(&["firebase", "nonexistent"], &ModuleOptions::default())
        .await
        .unwrap();
    assert!(modules["nonexistent"].is_empty());
    assert_eq!(modules.len(), 2);

    let pinned = ssm.modules(&["nonexistent"], &options).await.unwrap();
    assert!(pinned["nonexistent"].is_empty());
}

#[tokio::test]
async fn test_modules_verbose_returns_annotated_records() {
    let (ssm, _) = ssm_with_stage(Some("test"));
    seed(&ssm, &[("/test/1/firebase/API_KEY", "a")]).await;

    let options = ModuleOptions {
        version: None,
        verbose: true,
    };
    let modules = ssm.modules(&["firebase"], &options).await.unwrap();
    let record = modules["firebase"].record("API_KEY").unwrap();
    assert_eq!(record.path, "/test/1/firebase/API_KEY");
    assert_eq!(record.module.as_deref(), Some("firebase"));
    assert_eq!(record.variable.as_deref(), Some("API_KEY"));
}

#[tokio::test]
async fn test_modules_requires_stage() {
    let (ssm, _) = ssm_with_stage(None);
    let err = ssm
        .modules(&["firebase"], &ModuleOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SsmError::NotAllowed { .. }));
}

#[tokio::test]
async fn test_configuration_reflects_config() {
    let store = InMemoryParameterStore::new();
    let config = SsmConfig::default().with_profile("ssm").with_region("eu-west-1");
    let ssm = Ssm::new(Arc::new(store), config);

    let configuration = ssm.configuration();
    assert_eq!(configuration.region, "eu-west-1");
    assert_eq!(configuration.profile.as_deref(), Some("ssm"));
    assert!(!configuration.explicit_credentials);
    assert_eq!(configuration.default_type, ParameterType::SecureString);
}
