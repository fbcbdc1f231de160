use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use miette::Diagnostic;
use serde::Deserialize;
use url::Url;

use crate::{
    logger::Logger,
    target::{Target, Token},
};

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub default_target: Option<String>,
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TargetConfig {
    pub api: Url,
    #[serde(default = "default_team")]
    pub team: String,
    #[serde(default)]
    pub token: Option<Token>,
    #[serde(default)]
    pub insecure: bool,
}

fn default_team() -> String {
    "main".into()
}

#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("no target specified")]
#[diagnostic(
    code(hangar::config::no_target),
    help("pass -t <name> or set default_target in the config file")
)]
pub struct NoTarget;

#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("unknown target {name}")]
#[diagnostic(code(hangar::config::unknown_target))]
pub struct UnknownTarget {
    pub name: String,
    #[help]
    pub known: Option<String>,
}

pub fn config_file() -> PathBuf {
    match std::env::var("HANGAR_CONFIG") {
        Ok(config_file) => Path::new(&config_file).to_path_buf(),
        Err(_) => dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hangar.toml"),
    }
}

pub fn load() -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed("HANGAR_").split("__"))
        .join(Toml::file(config_file()))
        .extract()
}

impl Config {
    pub fn target(&self, logger: &Logger, name: Option<&str>) -> miette::Result<Target> {
        let name = name
            .or(self.default_target.as_deref())
            .ok_or(NoTarget)?;
        let target = self.targets.get(name).ok_or_else(|| UnknownTarget {
            name: name.to_string(),
            known: (!self.targets.is_empty()).then(|| {
                let names = self.targets.keys().cloned().collect::<Vec<_>>();
                format!("configured targets: {}", names.join(", "))
            }),
        })?;
        logger.trace(format!("Using target {name} ({})", target.api));

        Ok(Target {
            name: name.to_string(),
            api: target.api.clone(),
            team: target.team.clone(),
            token: target.token.clone(),
            insecure: target.insecure,
        })
    }
}
