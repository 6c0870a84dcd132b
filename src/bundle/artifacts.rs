//! Artifact naming, versioning, and atomic writes
//!
//! Exact-version artifacts are `v{X.Y.Z}.js` / `v{X.Y.Z}.css`; the alias
//! `v{X}.js` always mirrors the highest published version sharing major
//! `X`, so integrators can pin exactly or opt into minor/patch updates.

use crate::bundle::BundleOutput;
use crate::error::{Result, WidgetError};
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of the artifacts one build produced
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenArtifacts {
    /// Exact-version script, `v{X.Y.Z}.js`
    pub script: PathBuf,

    /// Exact-version stylesheet, `v{X.Y.Z}.css`
    pub stylesheet: PathBuf,

    /// Major-version alias, `v{X}.js`; `None` when a higher version with
    /// the same major is already published
    pub alias: Option<PathBuf>,
}

impl BundleOutput {
    /// Write this bundle's artifacts into `out_dir`
    ///
    /// Every output is staged to a temporary file before any is renamed
    /// into place, so a failure part-way through publishes nothing. The
    /// alias is skipped (not clobbered) when rebuilding a version lower
    /// than the highest already published for its major.
    pub fn write(&self, out_dir: &Path) -> Result<WrittenArtifacts> {
        fs::create_dir_all(out_dir).map_err(|e| WidgetError::ArtifactWrite {
            path: out_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let script_path = out_dir.join(format!("v{}.js", self.version));
        let stylesheet_path = out_dir.join(format!("v{}.css", self.version));
        let alias_path = out_dir.join(format!("v{}.js", self.version.major));

        let update_alias = match highest_published(out_dir, self.version.major)? {
            Some(existing) => self.version >= existing,
            None => true,
        };
        if !update_alias {
            log::debug!(
                "alias v{}.js kept at a higher published version; not overwriting with {}",
                self.version.major,
                self.version
            );
        }

        let mut outputs: Vec<(&Path, &str)> = vec![
            (script_path.as_path(), self.script.as_str()),
            (stylesheet_path.as_path(), self.stylesheet.as_str()),
        ];
        if update_alias {
            outputs.push((alias_path.as_path(), self.script.as_str()));
        }
        publish(&outputs)?;

        Ok(WrittenArtifacts {
            script: script_path,
            stylesheet: stylesheet_path,
            alias: update_alias.then_some(alias_path),
        })
    }
}

/// Highest exact-version script already published for `major` in `dir`
///
/// Alias files (`v1.js`) do not parse as semver and are skipped naturally.
pub fn highest_published(dir: &Path, major: u64) -> Result<Option<Version>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(None),
    };

    let mut highest: Option<Version> = None;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(version) = name.strip_prefix('v').and_then(|n| n.strip_suffix(".js")) else {
            continue;
        };
        let Ok(version) = Version::parse(version) else { continue };
        if version.major != major {
            continue;
        }
        if highest.as_ref().is_none_or(|h| version > *h) {
            highest = Some(version);
        }
    }
    Ok(highest)
}

/// Stage every output to a sibling temp file, then rename all into place
///
/// No destination path is touched until every staging write has succeeded;
/// on failure the staged temp files are removed.
fn publish(outputs: &[(&Path, &str)]) -> Result<()> {
    let mut staged: Vec<PathBuf> = Vec::with_capacity(outputs.len());

    for (path, contents) in outputs {
        let tmp = PathBuf::from(format!("{}.tmp", path.display()));
        if let Err(e) = fs::write(&tmp, contents) {
            discard(&staged);
            return Err(WidgetError::ArtifactWrite {
                path: tmp.display().to_string(),
                reason: e.to_string(),
            });
        }
        staged.push(tmp);
    }

    for (tmp, (path, _)) in staged.iter().zip(outputs) {
        if let Err(e) = fs::rename(tmp, path) {
            discard(&staged);
            return Err(WidgetError::ArtifactWrite {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }
    }
    Ok(())
}

fn discard(staged: &[PathBuf]) {
    for tmp in staged {
        let _ = fs::remove_file(tmp);
    }
}
