use crate::errors::{Error, IoContext, Result};
use derive_new::new;
use regex::Regex;
use std::path::{Path, PathBuf};

const AUTHOR_NAME_VAR: &str = "GIT_AUTHOR_NAME";
const AUTHOR_EMAIL_VAR: &str = "GIT_AUTHOR_EMAIL";
const CONFIG_FILE_NAME: &str = ".gitconfig";

const NAME_REGEX: &str = r"(?m)^\s*name\s*=\s*(.+?)\s*$";
const EMAIL_REGEX: &str = r"(?m)^\s*email\s*=\s*(.+?)\s*$";

/// Name and email recorded on commits
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

pub trait IdentityProvider {
    fn resolve_identity(&self) -> Result<Identity>;
}

/// Always answers with the same identity
#[derive(Debug, Clone, new)]
pub struct FixedIdentity {
    identity: Identity,
}

impl IdentityProvider for FixedIdentity {
    fn resolve_identity(&self) -> Result<Identity> {
        Ok(self.identity.clone())
    }
}

/// Reads `name = ` and `email = ` lines from a gitconfig-style file
///
/// A missing file, or one lacking either key, is fatal.
#[derive(Debug, Clone, new)]
pub struct ConfigFileIdentity {
    path: PathBuf,
}

impl ConfigFileIdentity {
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn capture(content: &str, pattern: &str) -> Option<String> {
        Regex::new(pattern)
            .ok()?
            .captures(content)
            .map(|captures| captures[1].to_string())
    }
}

impl IdentityProvider for ConfigFileIdentity {
    fn resolve_identity(&self) -> Result<Identity> {
        if !self.path.exists() {
            return Err(Error::MissingIdentity(format!(
                "config file {} does not exist",
                self.path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.path).at_path("read config file", &self.path)?;

        let name = Self::capture(&content, NAME_REGEX).ok_or_else(|| {
            Error::MissingIdentity(format!("no user name in {}", self.path.display()))
        })?;
        let email = Self::capture(&content, EMAIL_REGEX).ok_or_else(|| {
            Error::MissingIdentity(format!("no user email in {}", self.path.display()))
        })?;

        Ok(Identity::new(name, email))
    }
}

/// `GIT_AUTHOR_NAME`/`GIT_AUTHOR_EMAIL` when both are set, otherwise `$HOME/.gitconfig`
#[derive(Debug, Clone, Default)]
pub struct StandardIdentity {
    env_identity: Option<Identity>,
    config: Option<ConfigFileIdentity>,
}

impl StandardIdentity {
    pub fn from_env() -> Self {
        let env_identity = match (
            std::env::var(AUTHOR_NAME_VAR),
            std::env::var(AUTHOR_EMAIL_VAR),
        ) {
            (Ok(name), Ok(email)) => Some(Identity::new(name, email)),
            _ => None,
        };
        let config = std::env::var_os("HOME")
            .map(|home| ConfigFileIdentity::new(PathBuf::from(home).join(CONFIG_FILE_NAME)));

        StandardIdentity {
            env_identity,
            config,
        }
    }
}

impl IdentityProvider for StandardIdentity {
    fn resolve_identity(&self) -> Result<Identity> {
        if let Some(identity) = &self.env_identity {
            return Ok(identity.clone());
        }

        match &self.config {
            Some(config) => config.resolve_identity(),
            None => Err(Error::MissingIdentity(format!(
                "{} and {} are unset and HOME is unknown",
                AUTHOR_NAME_VAR, AUTHOR_EMAIL_VAR
            ))),
        }
    }
}
