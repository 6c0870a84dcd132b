//! Build/packaging pipeline
//!
//! Turns the widget's source assets into versioned, self-contained
//! artifacts:
//! - `v{X.Y.Z}.css` — the processed stylesheet
//! - `v{X.Y.Z}.js`  — the bundled script with the stylesheet inlined, so no
//!   runtime stylesheet fetch is needed
//! - `v{X}.js`      — alias mirroring the highest published version with
//!   major `X`
//!
//! The build is deterministic: module order is the sorted entry list, the
//! whitespace normalization settings are fixed, and the banner carries only
//! the version. Same source + version yields byte-identical output.

pub mod artifacts;
pub mod css;

pub use artifacts::WrittenArtifacts;

use crate::error::{Result, WidgetError};
use semver::Version;
use std::fs;
use std::path::Path;

/// Filename of the widget stylesheet inside the asset directory
pub const STYLESHEET_ASSET: &str = "widget.css";

/// One script module fed to the bundler
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptModule {
    /// Module name (the asset filename), kept in the bundle as a marker
    pub name: String,

    /// Module source text
    pub contents: String,
}

/// The source tree of one bundle build
#[derive(Debug, Clone)]
pub struct BundleSource {
    /// Version being published
    pub version: Version,

    /// Script modules in bundling order
    pub modules: Vec<ScriptModule>,

    /// Raw widget stylesheet
    pub stylesheet: String,
}

impl BundleSource {
    /// Load the source tree from an asset directory
    ///
    /// The stylesheet is read from [`STYLESHEET_ASSET`]; every `*.js` file
    /// in the directory becomes a module, ordered by filename so the bundle
    /// is independent of directory iteration order. Any read failure is
    /// fatal.
    pub fn load(asset_dir: &Path, version: Version) -> Result<Self> {
        let stylesheet_path = asset_dir.join(STYLESHEET_ASSET);
        let stylesheet = read_asset(&stylesheet_path)?;

        let mut modules = Vec::new();
        let entries = fs::read_dir(asset_dir).map_err(|e| WidgetError::AssetRead {
            path: asset_dir.display().to_string(),
            reason: e.to_string(),
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| WidgetError::AssetRead {
                path: asset_dir.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("js") {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            modules.push(ScriptModule { name, contents: read_asset(&path)? });
        }
        modules.sort_by(|a, b| a.name.cmp(&b.name));

        if modules.is_empty() {
            return Err(WidgetError::AssetRead {
                path: asset_dir.display().to_string(),
                reason: "no script modules (*.js) found".to_string(),
            });
        }

        Ok(Self { version, modules, stylesheet })
    }

    /// Run the pipeline over this source tree
    pub fn build(&self) -> Result<BundleOutput> {
        let stylesheet = css::inline_property_rules(&normalize(&self.stylesheet));

        let inlined = serde_json::to_string(&stylesheet).map_err(|e| WidgetError::AssetRead {
            path: STYLESHEET_ASSET.to_string(),
            reason: format!("failed to inline stylesheet: {}", e),
        })?;

        let mut script = String::new();
        script.push_str(&format!("// ask-widget v{}\n", self.version));
        script.push_str(&format!("window.__askWidgetCSS = {};\n", inlined));
        script.push_str(&format!("window.__askWidgetVersion = \"{}\";\n", self.version));
        for module in &self.modules {
            script.push_str(&format!("// module: {}\n", module.name));
            script.push_str(&normalize(&module.contents));
        }

        Ok(BundleOutput {
            version: self.version.clone(),
            script,
            stylesheet,
        })
    }
}

/// A finished bundle, ready to be written as artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct BundleOutput {
    /// Version being published
    pub version: Version,

    /// Self-contained script artifact contents
    pub script: String,

    /// Stylesheet artifact contents
    pub stylesheet: String,
}

/// Fixed whitespace normalization: trailing whitespace stripped per line,
/// runs of blank lines collapsed to one, exactly one trailing newline
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = false;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run = true;
            continue;
        }
        if blank_run && !out.is_empty() {
            out.push('\n');
        }
        blank_run = false;
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn read_asset(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| WidgetError::AssetRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
