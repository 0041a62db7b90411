//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static LOCAL_CONFIG_FILE: &str = "orderpad.toml";

/// Layered configuration loaded from defaults, user config, a local file,
/// and environment overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub keybindings: Keybindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "Defaults::default_currency")]
    pub currency: String,
    #[serde(default = "Defaults::default_output_dir")]
    pub output_dir: String,
    #[serde(default = "Defaults::default_ingredient_placeholder")]
    pub ingredient_placeholder: String,
    #[serde(default = "Defaults::default_order_placeholder")]
    pub order_placeholder: String,
}

impl Defaults {
    fn default_currency() -> String {
        "$".into()
    }

    fn default_output_dir() -> String {
        "submissions".into()
    }

    fn default_ingredient_placeholder() -> String {
        "No ingredients selected yet.".into()
    }

    fn default_order_placeholder() -> String {
        "No items added to this order yet.".into()
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            output_dir: Self::default_output_dir(),
            ingredient_placeholder: Self::default_ingredient_placeholder(),
            order_placeholder: Self::default_order_placeholder(),
        }
    }
}

/// Key labels shown in the hint bar. Purely informational; the handlers bind
/// the actual keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybindings {
    #[serde(default = "Keybindings::default_add")]
    pub add: String,
    #[serde(default = "Keybindings::default_remove")]
    pub remove: String,
    #[serde(default = "Keybindings::default_edit")]
    pub edit: String,
    #[serde(default = "Keybindings::default_submit")]
    pub submit: String,
    #[serde(default = "Keybindings::default_switch")]
    pub switch: String,
}

impl Keybindings {
    fn default_add() -> String {
        "enter".into()
    }

    fn default_remove() -> String {
        "d".into()
    }

    fn default_edit() -> String {
        "e".into()
    }

    fn default_submit() -> String {
        "ctrl+s".into()
    }

    fn default_switch() -> String {
        "tab".into()
    }
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            add: Self::default_add(),
            remove: Self::default_remove(),
            edit: Self::default_edit(),
            submit: Self::default_submit(),
            switch: Self::default_switch(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    currency: Option<String>,
    output_dir: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            currency: env::var("ORDERPAD_CURRENCY").ok(),
            output_dir: env::var("ORDERPAD_OUTPUT_DIR").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(currency: &str, output_dir: &str) -> Self {
        Self {
            currency: Some(currency.to_owned()),
            output_dir: Some(output_dir.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the user config, the local file,
    /// and environment overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let user = user_config_path();
        let local = local_config_path()?;
        Self::load_with_layers(user, local, env)
    }

    fn load_with_layers(
        user: Option<PathBuf>,
        local: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(user_path) = user.filter(|path| path.exists()) {
            layers.push(Self::from_file(&user_path)?);
        }

        if let Some(local_path) = local.filter(|path| path.exists()) {
            layers.push(Self::from_file(&local_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            keybindings: merge_keybindings(self.keybindings, other.keybindings),
        }
    }
}

fn merge_defaults(base: Defaults, overlay: Defaults) -> Defaults {
    Defaults {
        currency: choose(base.currency, overlay.currency, Defaults::default_currency),
        output_dir: choose(
            base.output_dir,
            overlay.output_dir,
            Defaults::default_output_dir,
        ),
        ingredient_placeholder: choose(
            base.ingredient_placeholder,
            overlay.ingredient_placeholder,
            Defaults::default_ingredient_placeholder,
        ),
        order_placeholder: choose(
            base.order_placeholder,
            overlay.order_placeholder,
            Defaults::default_order_placeholder,
        ),
    }
}

fn merge_keybindings(base: Keybindings, overlay: Keybindings) -> Keybindings {
    Keybindings {
        add: choose(base.add, overlay.add, Keybindings::default_add),
        remove: choose(base.remove, overlay.remove, Keybindings::default_remove),
        edit: choose(base.edit, overlay.edit, Keybindings::default_edit),
        submit: choose(base.submit, overlay.submit, Keybindings::default_submit),
        switch: choose(base.switch, overlay.switch, Keybindings::default_switch),
    }
}

fn choose(base: String, overlay: String, default_fn: fn() -> String) -> String {
    if overlay != default_fn() { overlay } else { base }
}

fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("orderpad/config.toml"))
}

fn local_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    Ok(Some(cwd.join(LOCAL_CONFIG_FILE)))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(currency) = env.currency {
        config.defaults.currency = currency;
    }
    if let Some(output_dir) = env.output_dir {
        config.defaults.output_dir = output_dir;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.defaults.currency, "$");
        assert_eq!(config.defaults.output_dir, "submissions");
        assert_eq!(config.keybindings.submit, "ctrl+s");
    }

    #[test]
    fn merge_user_and_local_layers() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let user = temp.path().join("config.toml");
        fs::write(
            &user,
            r#"
[defaults]
currency = "EUR "
"#,
        )?;

        let local = temp.path().join(LOCAL_CONFIG_FILE);
        fs::write(
            &local,
            r#"
[defaults]
output_dir = "out/forms"
[keybindings]
submit = "ctrl+enter"
"#,
        )?;

        let config = Config::load_with_layers(Some(user), Some(local), EnvOverrides::default())?;

        assert_eq!(config.defaults.currency, "EUR ");
        assert_eq!(config.defaults.output_dir, "out/forms");
        assert_eq!(config.keybindings.submit, "ctrl+enter");
        assert_eq!(config.keybindings.remove, "d");
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("£", "elsewhere");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.defaults.currency, "£");
        assert_eq!(config.defaults.output_dir, "elsewhere");
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
