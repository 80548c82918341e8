//! # Configuration SSDP
//!
//! La configuration est construite en trois couches :
//! 1. la configuration par défaut intégrée (`pmossdp.yaml`)
//! 2. un fichier YAML externe optionnel, fusionné par-dessus
//! 3. les variables d'environnement `PMOSSDP_CONFIG__<CLE>`
//!
//! ```no_run
//! use pmossdp::SsdpConfig;
//!
//! let config = SsdpConfig::load(None)?;
//! let search = config.m_search();
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::constants::{MulticastScope, NetworkConstants};
use crate::message::{DEFAULT_VERSION, SsdpRequest};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::{env, fs, io};
use tracing::{info, warn};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("pmossdp.yaml");

const ENV_PREFIX: &str = "PMOSSDP_CONFIG__";

const DEFAULT_MX: u32 = 3;
const DEFAULT_SEARCH_TARGET: &str = "ssdp:all";
const DEFAULT_SERVER: &str = "Linux UPnP/1.1 PMOSSDP/0.1";
const DEFAULT_MAX_AGE: u32 = 1800;
const DEFAULT_RECV_BUFFER_SIZE: usize = 8192;

/// Paramètres utilisés pour construire et envoyer des messages SSDP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsdpConfig {
    /// Version placée dans la ligne de départ des messages émis
    pub version: String,

    /// Portée multicast cible
    pub scope: MulticastScope,

    pub port: u16,

    /// Délai de réponse maximal annoncé dans les M-SEARCH (secondes)
    pub mx: u32,

    /// Valeur `ST` des M-SEARCH
    pub search_target: String,

    /// Valeur `SERVER` des annonces
    pub server: String,

    /// Durée de validité des annonces (secondes)
    pub max_age: u32,

    pub recv_buffer_size: usize,
}

impl Default for SsdpConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            scope: MulticastScope::default(),
            port: NetworkConstants::PORT,
            mx: DEFAULT_MX,
            search_target: DEFAULT_SEARCH_TARGET.to_string(),
            server: DEFAULT_SERVER.to_string(),
            max_age: DEFAULT_MAX_AGE,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
        }
    }
}

impl SsdpConfig {
    /// Charge la configuration depuis `path` (optionnel) et l'environnement
    /// du processus.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, env::vars())
    }

    /// Charge la configuration avec un jeu de variables d'environnement
    /// explicite.
    ///
    /// Un fichier absent n'est pas une erreur : la configuration intégrée est
    /// alors utilisée seule.
    pub fn from_sources<I>(path: Option<&Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        if let Some(path) = path {
            match fs::read(path) {
                Ok(data) => {
                    info!(config_file=%path.display(), "Loaded SSDP config file");
                    let external: Value = serde_yaml::from_slice(&data)
                        .with_context(|| format!("Invalid YAML in {}", path.display()))?;
                    if external.is_null() {
                        info!(config_file=%path.display(), "Config file is empty, keeping default embedded config");
                    } else {
                        overlay(&mut config_value, lower_keys_value(external));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    info!(config_file=%path.display(), "Config file not found, using default embedded config");
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Cannot read {}", path.display()));
                }
            }
        }

        apply_env_overrides(&mut config_value, vars);

        let config = serde_yaml::from_value(config_value).context("Invalid SSDP configuration")?;
        Ok(config)
    }

    /// Destination multicast `groupe:port` de la portée configurée
    pub fn target(&self) -> SocketAddr {
        self.scope.socket_addr(self.port)
    }

    /// M-SEARCH construit à partir de la configuration
    pub fn m_search(&self) -> SsdpRequest {
        SsdpRequest::m_search(self.target(), &self.search_target, self.mx)
            .with_version(self.version.as_str())
    }

    /// NOTIFY `ssdp:alive` pour un device exposé à `location`
    pub fn notify_alive(&self, nt: &str, usn: &str, location: &str) -> SsdpRequest {
        SsdpRequest::notify_alive(self.target(), nt, usn, location, &self.server, self.max_age)
            .with_version(self.version.as_str())
    }

    pub fn notify_byebye(&self, nt: &str, usn: &str) -> SsdpRequest {
        SsdpRequest::notify_byebye(self.target(), nt, usn).with_version(self.version.as_str())
    }
}

fn apply_env_overrides<I>(config: &mut Value, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        if let Some(key) = key.strip_prefix(ENV_PREFIX) {
            let key_path = key.split("__").collect::<Vec<_>>();
            if let Err(e) = set_value_internal(config, &key_path, convert_env_value(&value)) {
                warn!(env_var=%key, "⚠️ Ignoring config override: {}", e);
            }
        }
    }
}

fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
    if path.is_empty() {
        *data = value;
        return Ok(());
    }
    if let Value::Mapping(map) = data {
        let key_value = Value::String(path[0].to_lowercase());
        if path.len() == 1 {
            map.insert(key_value, value);
        } else {
            let entry = map
                .entry(key_value)
                .or_insert(Value::Mapping(Mapping::new()));
            set_value_internal(entry, &path[1..], value)?;
        }
        Ok(())
    } else {
        Err(anyhow!("Current node is not a map"))
    }
}

fn convert_env_value(value: &str) -> Value {
    serde_yaml::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut new_map = Mapping::new();
            for (k, v) in map {
                let k = match k {
                    Value::String(s) => Value::String(s.to_lowercase()),
                    other => other,
                };
                new_map.insert(k, lower_keys_value(v));
            }
            Value::Mapping(new_map)
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}

/// Superpose `external` à `base` : les tables sont fusionnées clé par clé,
/// toute autre valeur remplace celle de `base`.
fn overlay(base: &mut Value, external: Value) {
    match (base, external) {
        (Value::Mapping(table), Value::Mapping(entries)) => {
            for (key, value) in entries {
                if let Some(current) = table.get_mut(&key) {
                    overlay(current, value);
                } else {
                    table.insert(key, value);
                }
            }
        }
        (base, external) => *base = external,
    }
}
