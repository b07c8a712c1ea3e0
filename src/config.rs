use crate::provider::{ip_api, ipinfo};
use crate::timeout::RequestTimeout;
use crate::uri_tools::UriTemplate;

use hyper::http::uri::Uri;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "ipgeo.toml";
pub const MAX_MAP_ZOOM: u8 = 19;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("map zoom must be between 0 and 19, got {0}")]
    MapZoom(u8),
    #[error(r#"ipinfo self_uri "{0}" must be an absolute URI"#)]
    RelativeSelfUri(Uri),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub timeout: RequestTimeout,
    #[serde(default = "Config::default_log_level")]
    pub log_level: log::Level,
    #[serde(default = "Config::default_error_log")]
    pub error_log: PathBuf,
    #[serde(default)]
    pub ipinfo: IpInfoConfig,
    #[serde(default)]
    pub ip_api: IpApiConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub csv: CsvConfig,
}

impl Config {
    fn default_log_level() -> log::Level {
        log::Level::Warn
    }

    fn default_error_log() -> PathBuf {
        "error_log.txt".into()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.zoom > MAX_MAP_ZOOM {
            return Err(ConfigError::MapZoom(self.map.zoom));
        }
        let self_uri = &self.ipinfo.self_uri;
        if self_uri.scheme().is_none() || self_uri.authority().is_none() {
            return Err(ConfigError::RelativeSelfUri(self_uri.clone()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: RequestTimeout::default(),
            log_level: Self::default_log_level(),
            error_log: Self::default_error_log(),
            ipinfo: IpInfoConfig::default(),
            ip_api: IpApiConfig::default(),
            map: MapConfig::default(),
            csv: CsvConfig::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct IpInfoConfig {
    #[serde(default = "IpInfoConfig::default_uri_template", alias = "url")]
    pub uri_template: UriTemplate,
    #[serde(
        default = "IpInfoConfig::default_self_uri",
        alias = "self_url",
        with = "http_serde::uri"
    )]
    pub self_uri: Uri,
}

impl IpInfoConfig {
    fn default_uri_template() -> UriTemplate {
        UriTemplate::new(ipinfo::DEFAULT_URI_TEMPLATE).unwrap()
    }

    fn default_self_uri() -> Uri {
        Uri::from_static(ipinfo::DEFAULT_SELF_URI)
    }
}

impl Default for IpInfoConfig {
    fn default() -> Self {
        Self {
            uri_template: Self::default_uri_template(),
            self_uri: Self::default_self_uri(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct IpApiConfig {
    #[serde(default = "IpApiConfig::default_uri_template", alias = "url")]
    pub uri_template: UriTemplate,
}

impl IpApiConfig {
    fn default_uri_template() -> UriTemplate {
        UriTemplate::new(ip_api::DEFAULT_URI_TEMPLATE).unwrap()
    }
}

impl Default for IpApiConfig {
    fn default() -> Self {
        Self {
            uri_template: Self::default_uri_template(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    #[serde(default = "MapConfig::default_path")]
    pub path: PathBuf,
    #[serde(default = "MapConfig::default_zoom")]
    pub zoom: u8,
}

impl MapConfig {
    fn default_path() -> PathBuf {
        "ip_location.html".into()
    }

    fn default_zoom() -> u8 {
        8
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            zoom: Self::default_zoom(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CsvConfig {
    #[serde(default = "CsvConfig::default_path")]
    pub path: PathBuf,
}

impl CsvConfig {
    fn default_path() -> PathBuf {
        "ip_log.csv".into()
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

pub fn parse_config_str(toml_string: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(toml_string)?;
    config.validate()?;
    Ok(config)
}

pub fn parse_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let toml_string = std::fs::read_to_string(path)?;
    parse_config_str(&toml_string)
}
