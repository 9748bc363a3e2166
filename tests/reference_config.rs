// tests/reference_config.rs
//
// Loading ReferenceLists / FactCheckConfig from disk and env. Env-mutating
// tests are serialized.

use std::env;
use std::fs;
use std::sync::Arc;

use serial_test::serial;
use tempfile::tempdir;

use credibility_assistant::config::factcheck::ENV_FACTCHECK_API_KEY;
use credibility_assistant::config::reference::ENV_REFERENCE_PATH;
use credibility_assistant::domain::DomainClassifier;
use credibility_assistant::{EvaluateOptions, Evaluator, FactCheckConfig, ReasonType, ReferenceLists};

/// Restores an env var on drop.
struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let prev = env::var(key).ok();
        env::set_var(key, value);
        Self { key, prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => env::set_var(self.key, v),
            None => env::remove_var(self.key),
        }
    }
}

#[test]
#[serial]
fn env_path_toml_overrides_trusted_domains() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reference.toml");
    fs::write(
        &path,
        r#"
trusted_domains = ["Local-Gazette.org"]
suspicious_patterns = ["hoaxwire"]
"#,
    )
    .unwrap();
    let _g = EnvGuard::set(ENV_REFERENCE_PATH, path.to_str().unwrap());

    let lists = ReferenceLists::load_default().unwrap();
    assert_eq!(lists.trusted_domains, vec!["local-gazette.org".to_string()]);
    // Lists not in the file keep the seed.
    assert_eq!(lists.emotional_words, ReferenceLists::default_seed().emotional_words);

    let c = DomainClassifier::new(&lists);
    assert_eq!(c.classify("see https://news.local-gazette.org/story").score, 30);
    // reuters.com is no longer trusted under this configuration.
    let r = c.classify("see https://www.reuters.com/world");
    assert_eq!(r.score, 15);
    assert_eq!(r.reason.unwrap().kind, ReasonType::Warning);
    assert_eq!(c.classify("http://daily-hoaxwire.net/x").score, 0);
}

#[test]
#[serial]
fn env_path_json_is_supported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reference.json");
    fs::write(&path, r#"{ "clickbait_phrases": ["Read Until The End"] }"#).unwrap();
    let _g = EnvGuard::set(ENV_REFERENCE_PATH, path.to_str().unwrap());

    let lists = ReferenceLists::load_default().unwrap();
    assert_eq!(lists.clickbait_phrases, vec!["read until the end".to_string()]);
}

#[test]
#[serial]
fn missing_env_path_is_an_error() {
    let _g = EnvGuard::set(ENV_REFERENCE_PATH, "/definitely/not/here/reference.toml");
    let err = ReferenceLists::load_default().unwrap_err();
    assert!(err.to_string().contains(ENV_REFERENCE_PATH));
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let err = ReferenceLists::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
#[serial]
fn factcheck_config_resolves_env_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("factcheck.json");
    fs::write(&path, r#"{ "api_key": "ENV", "max_queries": 2, "language": " EN " }"#).unwrap();
    let _g = EnvGuard::set(ENV_FACTCHECK_API_KEY, "test-key");

    let cfg = FactCheckConfig::load_from_file(&path).unwrap();
    assert_eq!(cfg.api_key(), Some("test-key"));
    assert_eq!(cfg.max_queries, 2);
    assert_eq!(cfg.language, "en");
    assert_eq!(cfg.page_size, 5);
}

#[tokio::test]
#[serial]
async fn custom_vocabulary_flows_into_evaluation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reference.toml");
    fs::write(&path, r#"emotional_words = ["gobsmacking"]"#).unwrap();
    let _g = EnvGuard::set(ENV_REFERENCE_PATH, path.to_str().unwrap());

    let lists = Arc::new(ReferenceLists::load_default().unwrap());
    let r = Evaluator::offline(lists)
        .evaluate(
            "A gobsmacking result for the team.",
            EvaluateOptions {
                skip_fact_check: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let e = &r.analysis_breakdown.emotional;
    assert_eq!(e.detail.emotional_count, 1);
    assert_eq!(e.score, 0);
}
