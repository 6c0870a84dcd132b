//! Widget bundler CLI
//!
//! Builds the versioned widget artifacts: the processed stylesheet, the
//! self-contained script with the stylesheet inlined, and the major-version
//! alias script. Any asset or write failure aborts with a non-zero exit and
//! leaves no partial artifacts.

use ask_widget::WidgetError;
use ask_widget::bundle::BundleSource;
use clap::Parser;
use semver::Version;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "widget-bundle", version, about = "Bundle the widget into versioned, self-contained artifacts")]
struct Args {
    /// Directory holding widget.css and the *.js script modules
    #[arg(long, default_value = "assets/widget")]
    assets: PathBuf,

    /// Directory the artifacts are written to
    #[arg(long, default_value = "public")]
    out: PathBuf,

    /// Version to publish (defaults to the crate version)
    #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
    version: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let version = Version::parse(&args.version).map_err(|e| WidgetError::InvalidVersion {
        version: args.version.clone(),
        reason: e.to_string(),
    })?;

    let source = BundleSource::load(&args.assets, version)?;
    let output = source.build()?;
    let written = output.write(&args.out)?;

    println!("Build complete!");
    println!("  script:     {} ({:.2} KB)", written.script.display(), kb(output.script.len()));
    println!("  stylesheet: {} ({:.2} KB)", written.stylesheet.display(), kb(output.stylesheet.len()));
    match written.alias {
        Some(alias) => println!("  alias:      {}", alias.display()),
        None => println!("  alias:      unchanged (higher version already published)"),
    }
    println!("  modules bundled: {}", source.modules.len());

    Ok(())
}

fn kb(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}
