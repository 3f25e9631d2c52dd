//! Chef credentials discovery.
//!
//! Reads the TOML `credentials` file used by the Chef tooling, selects a
//! profile and merges it with command-line overrides. Resolution happens once
//! at startup; everything downstream receives an immutable [`ServerCredentials`].

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::shared::error::ReportError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_KEY_FILE_SIZE};
use crate::shared::Result;

pub const DEFAULT_PROFILE: &str = "default";

/// Environment variable selecting the profile when `--profile` is absent
pub const PROFILE_ENV_VAR: &str = "CHEF_PROFILE";

const PEM_PREFIX: &str = "-----BEGIN";

/// One profile table of the credentials file
#[derive(Debug, Clone, Default, Deserialize)]
struct CredentialsProfile {
    client_name: Option<String>,
    client_key: Option<String>,
    chef_server_url: Option<String>,
}

/// Values given on the command line, which win over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialOverrides {
    pub client_name: Option<String>,
    pub client_key: Option<String>,
    pub chef_server_url: Option<String>,
}

impl CredentialOverrides {
    fn is_complete(&self) -> bool {
        self.client_name.is_some() && self.client_key.is_some() && self.chef_server_url.is_some()
    }
}

/// Fully resolved connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct ServerCredentials {
    pub client_name: String,
    pub client_key_pem: String,
    /// Where the key came from, for error messages
    pub key_source: String,
    pub server_url: String,
}

impl std::fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerCredentials")
            .field("client_name", &self.client_name)
            .field("key_source", &self.key_source)
            .field("server_url", &self.server_url)
            .finish_non_exhaustive()
    }
}

/// `$HOME/.chef/credentials`
pub fn default_credentials_path(home: Option<&Path>) -> Option<PathBuf> {
    home.map(|h| h.join(".chef").join("credentials"))
}

/// Profile precedence: `--profile`, then `CHEF_PROFILE`, then `default`
pub fn resolve_profile(cli_profile: Option<&str>, env_profile: Option<&str>) -> String {
    cli_profile
        .or(env_profile)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PROFILE)
        .to_string()
}

/// Resolves credentials from the file and command-line overrides
///
/// The file is only optional when all three overrides are given.
pub fn load_credentials(
    path: Option<&Path>,
    profile: &str,
    overrides: &CredentialOverrides,
    home: Option<&Path>,
) -> Result<ServerCredentials> {
    let (file_profile, key_base) = if overrides.is_complete() {
        (CredentialsProfile::default(), None)
    } else {
        let path = path.ok_or_else(|| ReportError::CredentialsNotFound {
            path: PathBuf::from("~/.chef/credentials"),
            suggestion: "Set HOME or pass --config with the path to your credentials file"
                .to_string(),
        })?;
        let profile_entry = read_profile(path, profile)?;
        (profile_entry, path.parent().map(Path::to_path_buf))
    };

    let client_name = required(
        overrides.client_name.clone().or(file_profile.client_name),
        "client_name",
        profile,
    )?;
    let server_url = required(
        overrides.chef_server_url.clone().or(file_profile.chef_server_url),
        "chef_server_url",
        profile,
    )?;

    // A key from the command line is relative to the working directory,
    // one from the file is relative to the file
    let (client_key, base) = match overrides.client_key.clone() {
        Some(key) => (Some(key), None),
        None => (file_profile.client_key, key_base),
    };
    let client_key = required(client_key, "client_key", profile)?;
    let (client_key_pem, key_source) = load_client_key(&client_key, base.as_deref(), home)?;

    Ok(ServerCredentials {
        client_name,
        client_key_pem,
        key_source,
        server_url,
    })
}

fn read_profile(path: &Path, profile: &str) -> Result<CredentialsProfile> {
    if !path.exists() {
        return Err(ReportError::CredentialsNotFound {
            path: path.to_path_buf(),
            suggestion: "Create it with `knife configure`, or pass --client-name, --client-key and --chef-server-url".to_string(),
        }
        .into());
    }
    validate_regular_file(path, "credentials file")?;
    let metadata = std::fs::metadata(path)?;
    validate_file_size(metadata.len(), path, MAX_KEY_FILE_SIZE)?;

    let content = std::fs::read_to_string(path)?;
    let mut profiles: BTreeMap<String, CredentialsProfile> =
        toml::from_str(&content).map_err(|e| ReportError::InvalidCredentials {
            reason: format!("{} is not valid TOML: {}", path.display(), e),
            hint: "Each profile is a table such as [default] with client_name, client_key and chef_server_url".to_string(),
        })?;

    let available: Vec<String> = profiles.keys().cloned().collect();
    profiles.remove(profile).ok_or_else(|| {
        ReportError::InvalidCredentials {
            reason: format!("profile '{}' not found in {}", profile, path.display()),
            hint: format!("Available profiles: {}", available.join(", ")),
        }
        .into()
    })
}

fn required(value: Option<String>, field: &str, profile: &str) -> Result<String> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        ReportError::InvalidCredentials {
            reason: format!("'{}' is missing for profile '{}'", field, profile),
            hint: format!(
                "Add {} to the profile or pass --{}",
                field,
                field.replace('_', "-")
            ),
        }
        .into()
    })
}

/// Expands a leading `~` against the home directory
fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => home.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}

/// Returns the PEM text and a description of where it came from
fn load_client_key(
    client_key: &str,
    base: Option<&Path>,
    home: Option<&Path>,
) -> Result<(String, String)> {
    if client_key.starts_with(PEM_PREFIX) {
        return Ok((client_key.to_string(), "inline client_key".to_string()));
    }

    let mut path = expand_home(client_key, home);
    if path.is_relative() {
        if let Some(base) = base {
            path = base.join(path);
        }
    }
    let source_name = path.display().to_string();
    let key_error = |details: String| ReportError::ClientKeyError {
        source_name: source_name.clone(),
        details,
    };

    validate_regular_file(&path, "client key").map_err(|e| key_error(e.to_string()))?;
    let metadata = std::fs::metadata(&path).map_err(|e| key_error(e.to_string()))?;
    validate_file_size(metadata.len(), &path, MAX_KEY_FILE_SIZE)
        .map_err(|e| key_error(e.to_string()))?;
    let pem = std::fs::read_to_string(&path).map_err(|e| key_error(e.to_string()))?;

    Ok((pem, source_name))
}
