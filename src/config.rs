use std::ffi::OsStr;
use std::fs::File;

use anyhow::anyhow;
use justconfig::error::ConfigError;
use justconfig::item::ValueExtractor;
use justconfig::processors::Trim;
use justconfig::sources::env::Env;
use justconfig::sources::text::ConfigText;
use justconfig::ConfPath;
use justconfig::Config;

use crate::config_processors::Unquote;
use crate::recommender::{DEFAULT_COLLABORATIVE_TOP_N, DEFAULT_CONTENT_TOP_N, DEFAULT_HYBRID_TOP_N};

// Set some default values
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: usize = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";

pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub data: DataConfig,
    pub model: ModelConfig,
}

pub struct ServerConfig {
    pub host: String,
    pub port: usize,
    pub num_workers: usize,
}

pub struct LogConfig {
    pub level: String,
}

pub struct DataConfig {
    pub restaurants_path: String,
    pub ratings_path: String,
}

pub struct ModelConfig {
    pub num_items_to_recommend: usize,
    pub content_top_n: usize,
    pub collaborative_top_n: usize,
}

impl AppConfig {
    /// Reads the optional config file at `config_path`, then the environment overrides
    /// `RESTAURANTS_DATA`, `RATINGS_DATA`, `NUM_WORKERS` and `PORT`.
    pub fn new(config_path: String) -> anyhow::Result<AppConfig> {
        let mut conf = Config::default();

        if let Ok(config_file) = File::open(&config_path) {
            let config_text = ConfigText::new(config_file, &config_path)
                .map_err(|err| anyhow!("loading configuration file {} failed: {}", config_path, err))?;
            conf.add_source(config_text);
        }

        let config_env = Env::new(&[
            (
                ConfPath::from(&["data", "restaurants_path"]),
                OsStr::new("RESTAURANTS_DATA"),
            ),
            (
                ConfPath::from(&["data", "ratings_path"]),
                OsStr::new("RATINGS_DATA"),
            ),
            (
                ConfPath::from(&["server", "num_workers"]),
                OsStr::new("NUM_WORKERS"),
            ),
            (ConfPath::from(&["server", "port"]), OsStr::new("PORT")),
        ]);
        conf.add_source(config_env);

        AppConfig::parse(&conf)
    }

    pub(crate) fn parse(conf: &Config) -> anyhow::Result<AppConfig> {
        Ok(AppConfig {
            server: ServerConfig::parse(conf, ConfPath::from(&["server"])),
            log: LogConfig::parse(conf, ConfPath::from(&["log"])),
            data: DataConfig::parse(conf, ConfPath::from(&["data"]))?,
            model: ModelConfig::parse(conf, ConfPath::from(&["model"])),
        })
    }
}

fn required<T>(value: Result<T, ConfigError>, key: &str) -> anyhow::Result<T> {
    value.map_err(|err| anyhow!("configuration value `{}` is required: {}", key, err))
}

impl ServerConfig {
    fn parse(conf: &Config, path: ConfPath) -> ServerConfig {
        ServerConfig {
            host: conf
                .get(path.push("host"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_HOST)),
            port: conf.get(path.push("port")).trim().value().unwrap_or(DEFAULT_PORT),
            num_workers: conf
                .get(path.push("num_workers"))
                .trim()
                .value()
                // Detect number of CPUs
                .unwrap_or_else(|_| sys_info::cpu_num().map(|cpus| cpus as usize).unwrap_or(1))
                .max(1),
        }
    }
}

impl LogConfig {
    fn parse(conf: &Config, path: ConfPath) -> LogConfig {
        LogConfig {
            level: conf
                .get(path.push("level"))
                .unquote()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_LOG_LEVEL)),
        }
    }
}

impl DataConfig {
    fn parse(conf: &Config, path: ConfPath) -> anyhow::Result<DataConfig> {
        Ok(DataConfig {
            restaurants_path: required(
                conf.get(path.push("restaurants_path")).unquote().value(),
                "data.restaurants_path",
            )?,
            ratings_path: required(
                conf.get(path.push("ratings_path")).unquote().value(),
                "data.ratings_path",
            )?,
        })
    }
}

impl ModelConfig {
    fn parse(conf: &Config, path: ConfPath) -> ModelConfig {
        ModelConfig {
            num_items_to_recommend: conf
                .get(path.push("num_items_to_recommend"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_HYBRID_TOP_N),
            content_top_n: conf
                .get(path.push("content_top_n"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_CONTENT_TOP_N),
            collaborative_top_n: conf
                .get(path.push("collaborative_top_n"))
                .trim()
                .value()
                .unwrap_or(DEFAULT_COLLABORATIVE_TOP_N),
        }
    }
}

#[cfg(test)]
mod config_test {
    use justconfig::sources::defaults::Defaults;

    use super::*;

    fn config_with(values: &[(&[&str], &str)]) -> Config {
        let mut conf = Config::default();
        let mut defaults = Defaults::default();
        for (key, value) in values {
            defaults.set(conf.root().push_all(*key), value, "unit test");
        }
        conf.add_source(defaults);
        conf
    }

    #[test]
    fn should_apply_defaults() {
        let conf = config_with(&[
            (&["data", "restaurants_path"], "\"data/Restaurants.csv\""),
            (&["data", "ratings_path"], "'data/ratings.csv'"),
        ]);
        let config = AppConfig::parse(&conf).unwrap();

        assert_eq!("0.0.0.0", config.server.host);
        assert_eq!(8080, config.server.port);
        assert!(config.server.num_workers >= 1);
        assert_eq!("info", config.log.level);
        assert_eq!("data/Restaurants.csv", config.data.restaurants_path);
        assert_eq!("data/ratings.csv", config.data.ratings_path);
        assert_eq!(10, config.model.num_items_to_recommend);
        assert_eq!(5, config.model.content_top_n);
        assert_eq!(5, config.model.collaborative_top_n);
    }

    #[test]
    fn should_read_explicit_values() {
        let conf = config_with(&[
            (&["server", "port"], " 9090 "),
            (&["server", "num_workers"], "3"),
            (&["log", "level"], "\"debug\""),
            (&["data", "restaurants_path"], "r.csv"),
            (&["data", "ratings_path"], "u.csv"),
            (&["model", "num_items_to_recommend"], "4"),
        ]);
        let config = AppConfig::parse(&conf).unwrap();

        assert_eq!(9090, config.server.port);
        assert_eq!(3, config.server.num_workers);
        assert_eq!("debug", config.log.level);
        assert_eq!(4, config.model.num_items_to_recommend);
    }

    #[test]
    fn should_require_data_paths() {
        let conf = config_with(&[(&["data", "restaurants_path"], "r.csv")]);
        let err = AppConfig::parse(&conf).err().unwrap();
        assert!(err.to_string().contains("data.ratings_path"));
    }
}
