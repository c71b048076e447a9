use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_NAMESPACE: &str = "ns1";
const DEFAULT_TOP_K: usize = 3;
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_DIR: &str = "logs";

/// Runtime settings, resolved once at startup.
///
/// Secrets come exclusively from the environment; everything else has a
/// default matching the production deployment and can be overridden the
/// same way.
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub pinecone_api_key: String,
    pub pinecone_index_host: String,
    pub pinecone_namespace: String,
    pub top_k: usize,
    pub port: u16,
    pub log_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| anyhow!("missing required environment variable {}", name))
        };

        let openai_api_key = required("OPENAI_API_KEY")?;
        let pinecone_api_key = required("PINECONE_API_KEY")?;
        let pinecone_index_host = required("PINECONE_INDEX_HOST")?;

        let top_k = match lookup("TOP_K") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| anyhow!("TOP_K must be a positive integer, got {:?}", raw))?,
            None => DEFAULT_TOP_K,
        };
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Settings {
            openai_api_key,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            pinecone_api_key,
            pinecone_index_host,
            pinecone_namespace: lookup("PINECONE_NAMESPACE")
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            top_k,
            port,
            log_dir: PathBuf::from(
                lookup("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("OPENAI_API_KEY", "sk-test"),
            ("PINECONE_API_KEY", "pc-test"),
            ("PINECONE_INDEX_HOST", "https://idx.example.pinecone.io"),
        ])
    }

    fn lookup_in<'a>(env: &'a HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| env.get(name).map(|v| v.to_string())
    }

    #[test]
    fn defaults_apply_when_only_secrets_are_set() {
        let env = base_env();
        let settings = Settings::from_lookup(lookup_in(&env)).unwrap();

        assert_eq!(settings.openai_base_url, "https://api.openai.com");
        assert_eq!(settings.embedding_model, "text-embedding-3-small");
        assert_eq!(settings.chat_model, "gpt-4o-mini");
        assert_eq!(settings.pinecone_namespace, "ns1");
        assert_eq!(settings.top_k, 3);
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn missing_secret_names_the_variable() {
        let mut env = base_env();
        env.remove("PINECONE_API_KEY");

        let err = Settings::from_lookup(lookup_in(&env)).unwrap_err();
        assert!(err.to_string().contains("PINECONE_API_KEY"));
    }

    #[test]
    fn blank_secret_is_treated_as_missing() {
        let mut env = base_env();
        env.insert("OPENAI_API_KEY", "  ");

        let err = Settings::from_lookup(lookup_in(&env)).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn overrides_are_honored() {
        let mut env = base_env();
        env.insert("TOP_K", "5");
        env.insert("PORT", "9090");
        env.insert("CHAT_MODEL", "gpt-4o");

        let settings = Settings::from_lookup(lookup_in(&env)).unwrap();
        assert_eq!(settings.top_k, 5);
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.chat_model, "gpt-4o");
    }

    #[test]
    fn invalid_top_k_is_rejected() {
        let mut env = base_env();
        env.insert("TOP_K", "three");

        assert!(Settings::from_lookup(lookup_in(&env)).is_err());
    }
}
