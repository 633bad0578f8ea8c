//! Maps a raw image source (embed link, vault path or external reference) to a loadable
//! resource reference.

use std::collections::BTreeSet;

use tracing::debug;

pub trait SourceResolver {
    /// `context` is the path of the document the source appears in; it disambiguates
    /// links that match several files.
    fn resolve(&self, raw: &str, context: &str) -> String;
}

/// Set of files known to a vault, served under a resource root such as `app://vault`.
#[derive(Debug, Clone)]
pub struct VaultIndex {
    resource_root: String,
    files: BTreeSet<String>,
}

impl VaultIndex {
    pub fn new(resource_root: impl Into<String>) -> Self {
        Self {
            resource_root: resource_root.into().trim_end_matches('/').to_string(),
            files: BTreeSet::new(),
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for file in files {
            self.insert(file);
        }
        self
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.files.insert(normalize_path(&path).to_string());
    }

    pub fn resource_path(&self, file: &str) -> String {
        format!("{}/{}", self.resource_root, file)
    }

    fn file_by_path(&self, path: &str) -> Option<&str> {
        self.files.get(normalize_path(path)).map(String::as_str)
    }

    /// Exact path first, then a file whose name matches the link, preferring one in the
    /// context document's folder.
    fn first_link_destination(&self, link: &str, context: &str) -> Option<&str> {
        if let Some(file) = self.file_by_path(link) {
            return Some(file);
        }
        let suffix = format!("/{}", normalize_path(link));
        let folder = parent_folder(context);
        let mut candidates = self
            .files
            .iter()
            .filter(|file| file.ends_with(&suffix))
            .map(String::as_str);
        let first = candidates.next()?;
        if parent_folder(first) == folder {
            return Some(first);
        }
        Some(
            candidates
                .find(|file| parent_folder(file) == folder)
                .unwrap_or(first),
        )
    }
}

impl SourceResolver for VaultIndex {
    fn resolve(&self, raw: &str, context: &str) -> String {
        let trimmed = raw.trim();
        if let Some(link) = embed_link_text(trimmed) {
            if let Some(file) = self.first_link_destination(link, context) {
                debug!(link, file, "resolved embed link");
                return self.resource_path(file);
            }
        } else if let Some(file) = self.file_by_path(trimmed) {
            debug!(path = trimmed, "resolved vault path");
            return self.resource_path(file);
        }
        raw.to_string()
    }
}

/// Link text of an `![[...]]` embed, without any `|alias` suffix.
fn embed_link_text(raw: &str) -> Option<&str> {
    let inner = raw.strip_prefix("![[")?.strip_suffix("]]")?;
    let link = inner.split('|').next().unwrap_or(inner).trim();
    (!link.is_empty()).then_some(link)
}

fn normalize_path(path: &str) -> &str {
    path.trim().trim_start_matches('/')
}

fn parent_folder(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(folder, _)| folder)
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
