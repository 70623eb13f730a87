//! Runtime Configuration
//!
//! Settings come from environment variables with defaults, and `--bind` on the
//! command line overrides the listen address.
//!
//! | Variable | Default |
//! |---|---|
//! | `NEWS_BIND` | `127.0.0.1:3000` |
//! | `MONGODB_URL` | unset (in-memory primary store) |
//! | `ELASTICSEARCH_URL` | unset (in-memory search index) |
//! | `NEWS_INDEX` | `news` |
//! | `NEWS_BATCH_SIZE` | `100` |
//! | `NEWS_SEED_DEFAULT` | `2000` |

use crate::service::types::{DEFAULT_BATCH_SIZE, DEFAULT_INDEX, DEFAULT_SEED_RECORDS};

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::net::SocketAddr;

const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub mongodb_url: Option<String>,
    pub elasticsearch_url: Option<String>,
    pub index_name: String,
    pub batch_size: usize,
    pub seed_default: u64,
}

impl AppConfig {
    /// Reads the process environment and command-line arguments.
    pub fn load() -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&env, &args)
    }

    pub fn from_sources(env: &HashMap<String, String>, args: &[String]) -> Result<Self> {
        let var = |name: &str| env.get(name).filter(|v| !v.trim().is_empty()).cloned();

        let mut bind_addr: SocketAddr = var("NEWS_BIND")
            .as_deref()
            .unwrap_or(DEFAULT_BIND)
            .parse()
            .context("NEWS_BIND must be an <addr:port>")?;

        let batch_size = match var("NEWS_BATCH_SIZE") {
            Some(v) => v.parse().context("NEWS_BATCH_SIZE must be a number")?,
            None => DEFAULT_BATCH_SIZE,
        };
        if batch_size == 0 {
            anyhow::bail!("NEWS_BATCH_SIZE must be greater than zero");
        }

        let seed_default = match var("NEWS_SEED_DEFAULT") {
            Some(v) => v.parse().context("NEWS_SEED_DEFAULT must be a number")?,
            None => DEFAULT_SEED_RECORDS,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args
                        .get(i + 1)
                        .context("--bind requires <addr:port>")?;
                    bind_addr = value.parse().context("--bind must be an <addr:port>")?;
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }

        Ok(Self {
            bind_addr,
            mongodb_url: var("MONGODB_URL"),
            elasticsearch_url: var("ELASTICSEARCH_URL"),
            index_name: var("NEWS_INDEX").unwrap_or_else(|| DEFAULT_INDEX.to_string()),
            batch_size,
            seed_default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_sources(&env(&[]), &args(&["news-index"])).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.mongodb_url, None);
        assert_eq!(config.elasticsearch_url, None);
        assert_eq!(config.index_name, "news");
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.seed_default, 2000);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_sources(
            &env(&[
                ("MONGODB_URL", "mongodb://localhost:27017/news-db"),
                ("ELASTICSEARCH_URL", "http://localhost:9200"),
                ("NEWS_INDEX", "articles"),
                ("NEWS_BATCH_SIZE", "250"),
                ("NEWS_SEED_DEFAULT", "10"),
            ]),
            &args(&["news-index"]),
        )
        .unwrap();

        assert_eq!(
            config.mongodb_url.as_deref(),
            Some("mongodb://localhost:27017/news-db")
        );
        assert_eq!(
            config.elasticsearch_url.as_deref(),
            Some("http://localhost:9200")
        );
        assert_eq!(config.index_name, "articles");
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.seed_default, 10);
    }

    #[test]
    fn test_bind_argument_wins_over_env() {
        let config = AppConfig::from_sources(
            &env(&[("NEWS_BIND", "127.0.0.1:4000")]),
            &args(&["news-index", "--bind", "0.0.0.0:8080"]),
        )
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(AppConfig::from_sources(&env(&[("NEWS_BATCH_SIZE", "lots")]), &args(&[])).is_err());
        assert!(AppConfig::from_sources(&env(&[("NEWS_BATCH_SIZE", "0")]), &args(&[])).is_err());
        assert!(AppConfig::from_sources(&env(&[("NEWS_BIND", "nowhere")]), &args(&[])).is_err());
        assert!(AppConfig::from_sources(&env(&[]), &args(&["news-index", "--bind"])).is_err());
    }
}
