use std::str::FromStr;

use bkt_algo::{HierarchyBounds, RankOptions, RecommendConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub recommend: RecommendConfig,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = RecommendConfig::default();
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let recommend = RecommendConfig {
            top_n: env_or("BKT_TOP_N", defaults.top_n),
            related_n: env_or("BKT_RELATED_N", defaults.related_n),
            bounds: HierarchyBounds {
                max_target: env_or("BKT_MAX_TARGET", defaults.bounds.max_target),
                max_child: env_or("BKT_MAX_CHILD", defaults.bounds.max_child),
                max_parent: env_or("BKT_MAX_PARENT", defaults.bounds.max_parent),
            },
            rank: RankOptions {
                error_margin: env_or("BKT_ERROR_MARGIN", defaults.rank.error_margin),
                penalty: env_or("BKT_PENALTY", defaults.rank.penalty),
            },
        };

        Self {
            log_level,
            recommend,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            recommend: RecommendConfig::default(),
        }
    }
}
