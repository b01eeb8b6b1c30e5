use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::scoring::ExamPolicies;

/// Get the config directory path (~/.config/marksheet/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("marksheet")
}

/// Get the default policy file path (~/.config/marksheet/policy.yaml)
pub fn get_policy_path() -> PathBuf {
    get_config_dir().join("policy.yaml")
}

/// Load the scoring policies from a YAML file.
///
/// With an explicit path the file must exist. Without one, the default
/// path is used if a file is there, otherwise the built-in policy set
/// applies.
pub fn load_policies(path: Option<PathBuf>) -> Result<ExamPolicies> {
    let (policy_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_policy_path(), false),
    };

    if !policy_path.exists() {
        if explicit {
            anyhow::bail!("Policy file not found at {}", policy_path.display());
        }
        return Ok(ExamPolicies::default());
    }

    let content = fs::read_to_string(&policy_path)
        .with_context(|| format!("Failed to read policy file at {}", policy_path.display()))?;

    let policies: ExamPolicies = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse policy: invalid YAML in {}", policy_path.display()))?;

    Ok(policies)
}

/// Write the built-in default policy set to the given path (or the
/// default path), creating the config directory as needed. Refuses to
/// overwrite an existing file unless `force` is set.
pub fn write_default_policy(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let policy_path = path.unwrap_or_else(get_policy_path);

    if policy_path.exists() && !force {
        anyhow::bail!(
            "Policy file already exists at {} (use --force to overwrite)",
            policy_path.display()
        );
    }

    if let Some(parent) = policy_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let yaml = serde_saphyr::to_string(&ExamPolicies::default())
        .context("Failed to serialize default policy")?;
    fs::write(&policy_path, yaml)
        .with_context(|| format!("Failed to write policy file at {}", policy_path.display()))?;

    Ok(policy_path)
}
