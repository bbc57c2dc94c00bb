use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use serde::{Deserialize, Serialize};

use stepsight_imaging::client::DEFAULT_BASE_URL;

/// Schema version written by this build. Files declaring a higher version
/// are refused rather than silently truncated on the next save.
pub const CONFIG_VERSION: u32 = 1;

/// Overrides `api_base_url` from the file when set.
pub const API_URL_ENV: &str = "STEPSIGHT_API_URL";

fn current_version() -> u32 {
    CONFIG_VERSION
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Settings persisted between runs. Keys left out of the file take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepsightConfig {
    #[serde(default = "current_version")]
    pub config_version: u32,
    /// Analysis service root.
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    /// Where reports are written when a command is not given `--report-dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<PathBuf>,
}

impl Default for StepsightConfig {
    fn default() -> Self {
        Self {
            config_version: CONFIG_VERSION,
            api_base_url: default_api_url(),
            report_dir: None,
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.stepsight.cli").join("config.json"))
}

/// Load the config at `path`, or the defaults when no file exists yet.
pub fn load_config(path: &Path) -> eyre::Result<StepsightConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(StepsightConfig::default());
        }
        Err(e) => {
            return Err(e).wrap_err_with(|| format!("failed to read {}", path.display()));
        }
    };

    let config: StepsightConfig = serde_json::from_str(&contents).wrap_err_with(|| {
        format!(
            "{} is not a valid StepSight config; fix it or run `stepsight config reset`",
            path.display()
        )
    })?;
    if config.config_version > CONFIG_VERSION {
        eyre::bail!(
            "{} has config_version {}, but this build only understands up to {CONFIG_VERSION}",
            path.display(),
            config.config_version
        );
    }
    Ok(config)
}

/// Write `config` next to its final location, then move it into place so a
/// crash never leaves a half-written file. The file is private to the user
/// on Unix.
pub fn save_config(path: &Path, config: &StepsightConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;

    let stored = StepsightConfig {
        config_version: CONFIG_VERSION,
        ..config.clone()
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut staged, &stored)?;
    staged.write_all(b"\n")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    staged
        .persist(path)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Remove the config file. Its contents are never read, so a corrupt file
/// can always be cleared.
pub fn delete_config(path: &Path) -> eyre::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "config deleted");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).wrap_err_with(|| format!("failed to delete {}", path.display())),
    }
}

/// The service URL to use: a non-empty override, else the file's value.
pub fn resolve_api_url(config: &StepsightConfig, env_override: Option<&str>) -> String {
    env_override
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(&config.api_base_url)
        .to_string()
}

/// [`resolve_api_url`] against the process environment.
pub fn effective_api_url(config: &StepsightConfig) -> String {
    let env_value = std::env::var(API_URL_ENV).ok();
    resolve_api_url(config, env_value.as_deref())
}

/// Reject anything that is not an absolute http(s) URL; strips trailing `/`.
pub fn normalize_api_url(url: &str) -> eyre::Result<String> {
    let url = url.trim().trim_end_matches('/');
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| eyre::eyre!("api url must start with http:// or https://: {url}"))?;
    if rest.is_empty() {
        return Err(eyre::eyre!("api url has no host: {url}"));
    }
    Ok(url.to_string())
}
