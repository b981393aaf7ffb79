//! Settings loading

use super::{Settings, ENV_PREFIX, MAX_INDENT};
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::Path;

/// Load settings from defaults, an optional settings file and `CONFIG_MERGE_*`
/// environment variables, in increasing order of precedence.
///
/// A settings file that was named explicitly must exist and parse; there is no
/// soft fallback to defaults.
pub fn load_settings(settings_path: Option<&Path>) -> Result<Settings> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    if let Some(path) = settings_path {
        // figment treats missing files as empty, so check up front
        if !path.is_file() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        figment = match ext.as_str() {
            "toml" => figment.merge(Toml::file(path)),
            "yaml" | "yml" => figment.merge(Yaml::file(path)),
            other => anyhow::bail!(
                "Unsupported settings extension '.{}' for file {}",
                other,
                path.display()
            ),
        };
    }

    let settings: Settings = figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Invalid settings")?;

    let settings = normalize(settings)?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

fn normalize(mut settings: Settings) -> Result<Settings> {
    settings.key_field = settings.key_field.trim().to_string();
    settings.extension = settings.extension.trim().trim_start_matches('.').to_string();
    settings.output_file = settings.output_file.trim().to_string();

    if settings.key_field.is_empty() {
        anyhow::bail!("Invalid settings: key_field cannot be empty");
    }
    if settings.extension.is_empty() {
        anyhow::bail!("Invalid settings: extension cannot be empty");
    }
    if settings.output_file.is_empty() {
        anyhow::bail!("Invalid settings: output_file cannot be empty");
    }
    if settings.indent > MAX_INDENT {
        anyhow::bail!(
            "Invalid settings: indent {} exceeds the maximum of {}",
            settings.indent,
            MAX_INDENT
        );
    }

    Ok(settings)
}
