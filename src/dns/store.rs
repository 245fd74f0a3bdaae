use crate::dns::types::{DnsProfile, ProfileList};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Profile name is required")]
    EmptyName,
    #[error("Invalid {0} DNS address")]
    InvalidAddress(&'static str),
    #[error("A profile named \"{0}\" already exists")]
    DuplicateName(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Whole-list persistence of DNS profiles in a single JSON file.
#[derive(Clone, PartialEq, Debug)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the store. A missing, unreadable or malformed file yields an
    /// empty list.
    pub fn load(&self) -> ProfileList {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "profile store not found, starting empty");
            return ProfileList::new();
        }

        match self.try_load() {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable profile store");
                ProfileList::new()
            }
        }
    }

    fn try_load(&self) -> Result<ProfileList> {
        let content = fs::read_to_string(&self.path)?;
        let stripped = json_comments::StripComments::new(content.as_bytes());
        let profiles: ProfileList = serde_json::from_reader(stripped)?;
        Ok(profiles)
    }

    /// Replaces the whole store. The file is written next to the target and
    /// renamed over it, so readers never see a partial list.
    pub fn save(&self, profiles: &[DnsProfile]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let json = to_pretty_json(profiles)?;
        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(&json)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), count = profiles.len(), "profile store saved");
        Ok(())
    }
}

fn to_pretty_json(profiles: &[DnsProfile]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    profiles.serialize(&mut serializer)?;
    Ok(buf)
}

/// Appends without checking for an existing profile of the same name.
pub fn add_profile(profiles: &[DnsProfile], profile: DnsProfile) -> ProfileList {
    let mut next = profiles.to_vec();
    next.push(profile);
    next
}

/// Removes every profile called `name`.
pub fn delete_profile(profiles: &[DnsProfile], name: &str) -> ProfileList {
    profiles
        .iter()
        .filter(|p| p.name != name)
        .cloned()
        .collect()
}

/// First profile called `name`.
pub fn find_profile<'a>(profiles: &'a [DnsProfile], name: &str) -> Option<&'a DnsProfile> {
    profiles.iter().find(|p| p.name == name)
}
