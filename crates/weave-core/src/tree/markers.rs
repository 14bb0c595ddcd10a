//! Opaque metadata attached to tree nodes
//!
//! Markers travel with a node through every rewrite but never influence how it
//! prints or formats. The only marker modelled here is [`GitProvenance`], the
//! version-control origin of a compilation unit. Reading it out of a working
//! copy is left to the caller.

use serde::{Deserialize, Serialize};

/// Ordered metadata attached to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    entries: Vec<Marker>,
}

impl Markers {
    pub const EMPTY: Markers = Markers {
        entries: Vec::new(),
    };

    pub fn new(entries: Vec<Marker>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.entries.iter()
    }

    /// Add a marker, replacing any marker of the same kind
    pub fn with(&self, marker: Marker) -> Self {
        let mut entries: Vec<Marker> = self
            .entries
            .iter()
            .filter(|existing| std::mem::discriminant(*existing) != std::mem::discriminant(&marker))
            .cloned()
            .collect();
        entries.push(marker);
        Self { entries }
    }

    pub fn git_provenance(&self) -> Option<&GitProvenance> {
        self.entries.iter().find_map(|marker| match marker {
            Marker::GitProvenance(provenance) => Some(provenance),
        })
    }
}

/// A single piece of node metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Marker {
    GitProvenance(GitProvenance),
}

/// Line ending conversion configured for a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoCrlf {
    False,
    True,
    Input,
}

/// Line ending style configured for a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eol {
    Crlf,
    Lf,
    Native,
}

/// Version-control origin of a compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitProvenance {
    /// Remote `origin` URL, in URL or scp-like (`git@host:org/repo.git`) form
    pub origin: Option<String>,
    pub branch: Option<String>,
    /// Commit the unit was read at
    pub change: Option<String>,
    pub autocrlf: Option<AutoCrlf>,
    pub eol: Option<Eol>,
}

impl GitProvenance {
    pub fn new(origin: Option<String>, branch: Option<String>, change: Option<String>) -> Self {
        Self {
            origin,
            branch,
            change,
            autocrlf: None,
            eol: None,
        }
    }

    /// Repository name, the last path segment of the origin without `.git`
    pub fn repository_name(&self) -> Option<String> {
        let path = origin_path(self.origin.as_deref()?);
        let name = path.rsplit('/').next().unwrap_or(path);
        Some(name.strip_suffix(".git").unwrap_or(name).to_string())
    }

    /// Organization name guessed from the segment before the repository name.
    ///
    /// Hosting services nest organizations differently; prefer
    /// [`GitProvenance::organization_name_under`] when the base URL is known.
    pub fn organization_name(&self) -> Option<String> {
        let path = origin_path(self.origin.as_deref()?);
        let Some(last_slash) = path.rfind('/') else {
            return Some(String::new());
        };
        let owner = &path[..last_slash];
        Some(owner.rsplit('/').next().unwrap_or(owner).to_string())
    }

    /// Organization path (including sub-organizations) following `base_url`
    /// in the origin
    pub fn organization_name_under(&self, base_url: &str) -> Option<String> {
        let origin = self.origin.as_deref()?;
        let mut base = base_url;
        if let Some(scheme_end) = base.find("://") {
            base = &base[scheme_end + 3..];
        }
        let base = base.strip_prefix("git@").unwrap_or(base);
        let start = origin.find(base)? + base.len();
        let remainder = &origin[start..];
        let remainder = remainder.trim_start_matches([':', '/']);
        let last_slash = remainder.rfind('/')?;
        Some(remainder[..last_slash].to_string())
    }

    /// Origin with any password removed from http(s) user info
    pub fn redacted_origin(&self) -> Option<String> {
        let origin = self.origin.as_deref()?;
        let Some(scheme_end) = origin.find("://") else {
            return Some(origin.to_string());
        };
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Some(origin.to_string());
        }
        let authority_start = scheme_end + 3;
        let authority_end = origin[authority_start..]
            .find('/')
            .map_or(origin.len(), |i| authority_start + i);
        let authority = &origin[authority_start..authority_end];
        let Some(at) = authority.rfind('@') else {
            return Some(origin.to_string());
        };
        let user = authority[..at].split(':').next().unwrap_or_default();
        Some(format!(
            "{}{}{}",
            &origin[..authority_start],
            user,
            &origin[authority_start + at..]
        ))
    }
}

/// Path part of an origin, without a leading slash
fn origin_path(origin: &str) -> &str {
    if let Some(scheme_end) = origin.find("://") {
        let after_scheme = &origin[scheme_end + 3..];
        let path = after_scheme
            .find('/')
            .map_or("", |slash| &after_scheme[slash + 1..]);
        return path.split(['?', '#']).next().unwrap_or(path);
    }
    // scp-like syntax: [user@]host:path
    match origin.find(':') {
        Some(colon) => origin[colon + 1..].trim_start_matches('/'),
        None => origin,
    }
}
