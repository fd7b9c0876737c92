#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AssistantName,
    ConfigFile,
    HealthCheckTimeout,
    RequestTimeout,
    ServerURL,
    Username,
}

impl ConfigKey {
    /// Keys holding a duration in milliseconds.
    pub fn is_millis(&self) -> bool {
        return matches!(
            self,
            ConfigKey::HealthCheckTimeout | ConfigKey::RequestTimeout
        );
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn get_millis(key: ConfigKey) -> Result<u64> {
        let val = Config::get(key);
        if let Ok(millis) = val.parse::<u64>() {
            return Ok(millis);
        }

        bail!(format!(
            "{key} must be a whole number of milliseconds, got '{val}'"
        ));
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        if key == ConfigKey::ConfigFile {
            let config_dir = dirs::config_dir().unwrap_or_else(|| return path::PathBuf::from("."));
            return config_dir
                .join("parley/config.toml")
                .to_string_lossy()
                .to_string();
        }

        let res = match key {
            ConfigKey::AssistantName => "Assistant",
            ConfigKey::HealthCheckTimeout => "1000",
            ConfigKey::RequestTimeout => "30000",
            ConfigKey::ServerURL => "http://localhost:8000",

            // Handled above.
            ConfigKey::ConfigFile => "",
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                let val = match doc.get(&key.to_string()) {
                    Some(val) => val,
                    None => continue,
                };

                if let Some(val_int) = val.as_integer() {
                    Config::set(key, &val_int.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    Config::set(key, val_str);
                } else {
                    bail!(format!(
                        "{} has an invalid value for key '{key}'",
                        config_path.to_string_lossy()
                    ));
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        // Checked once every layer is applied so flags can fix a bad file value.
        for key in ConfigKey::iter().filter(|key| return key.is_millis()) {
            Config::get_millis(key)?;
        }

        tracing::debug!(
            server_url = Config::get(ConfigKey::ServerURL),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            health_check_timeout = Config::get(ConfigKey::HealthCheckTimeout),
            username = Config::get(ConfigKey::Username),
            assistant_name = Config::get(ConfigKey::AssistantName),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your name, displayed on your chat bubbles. Defaults to $USER.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|arg| return arg.get_id().as_str() == key.to_string())?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if key.is_millis() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
