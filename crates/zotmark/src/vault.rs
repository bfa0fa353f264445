//! Writing converted notes into an Obsidian vault.
//!
//! Notes live at `<root>/<notes_dir>/<citekey>.md`. By default an existing
//! note is never replaced; the caller decides whether to overwrite.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Result};

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("valid regex"));

/// What to do when the note file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Leave the existing file alone and report [`WriteOutcome::Exists`]
    #[default]
    CreateNew,
    /// Replace the existing file
    Overwrite,
}

/// Result of a note write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Exists,
}

/// An Obsidian vault and the folder literature notes go into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    root: PathBuf,
    notes_dir: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>, notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            notes_dir: notes_dir.into(),
        }
    }

    /// Vault name as Obsidian knows it: the last component of the root path
    pub fn default_name(&self) -> Option<String> {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Directory holding the notes on disk
    pub fn notes_path(&self) -> PathBuf {
        self.root.join(&self.notes_dir)
    }

    /// Path of a note relative to the vault root, with `/` separators
    pub fn note_path_in_vault(&self, citekey: &str) -> Result<String> {
        let file_name = note_file_name(citekey)?;
        let dir = self.notes_dir.to_string_lossy().replace('\\', "/");
        let dir = dir.trim_matches('/');
        Ok(if dir.is_empty() {
            file_name
        } else {
            format!("{dir}/{file_name}")
        })
    }

    /// Path of a note on disk
    pub fn note_path(&self, citekey: &str) -> Result<PathBuf> {
        Ok(self.notes_path().join(note_file_name(citekey)?))
    }

    pub fn note_exists(&self, citekey: &str) -> Result<bool> {
        Ok(self.note_path(citekey)?.is_file())
    }

    /// Create the notes directory and its parents
    pub fn ensure_notes_dir(&self) -> Result<()> {
        let path = self.notes_path();
        if !path.is_dir() {
            info!("creating notes directory {}", path.display());
        }
        fs::create_dir_all(&path).map_err(|source| Error::Io { path, source })
    }

    /// Write a note for `citekey`.
    ///
    /// With [`WritePolicy::CreateNew`] the file is created exclusively, so a
    /// note that appeared concurrently is never clobbered.
    pub fn write_note(&self, citekey: &str, markdown: &str, policy: WritePolicy) -> Result<WriteOutcome> {
        self.ensure_notes_dir()?;
        let path = self.note_path(citekey)?;

        let outcome = match policy {
            WritePolicy::CreateNew => {
                let file = OpenOptions::new().write(true).create_new(true).open(&path);
                match file {
                    Ok(mut file) => {
                        file.write_all(markdown.as_bytes())
                            .map_err(|source| Error::Io { path: path.clone(), source })?;
                        WriteOutcome::Created
                    }
                    Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                        debug!("note already exists: {}", path.display());
                        return Ok(WriteOutcome::Exists);
                    }
                    Err(source) => return Err(Error::Io { path, source }),
                }
            }
            WritePolicy::Overwrite => {
                let existed = path.is_file();
                fs::write(&path, markdown).map_err(|source| Error::Io { path: path.clone(), source })?;
                if existed {
                    WriteOutcome::Overwritten
                } else {
                    WriteOutcome::Created
                }
            }
        };

        info!("{outcome:?} note {}", path.display());
        Ok(outcome)
    }
}

/// `<citekey>.md`, with characters that are unsafe in file names replaced
fn note_file_name(citekey: &str) -> Result<String> {
    let stem = UNSAFE_FILENAME_CHARS.replace_all(citekey.trim(), "_");
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        return Err(Error::InvalidCitekey(citekey.to_string()));
    }
    Ok(format!("{stem}.md"))
}
