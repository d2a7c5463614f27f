//! Command line front end for the collision report generator.
//!
//! The `cartlab` binary reads one experiment record as JSON, runs it through
//! [`cl_report::ReportGenerator`] and writes the `.xlsx` into a directory.

pub mod exit_codes;
pub mod logging;

pub use exit_codes::ExitCode;
pub use logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};

use cl_report::{ReportConfig, ReportGenerator, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything `cartlab generate` needs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Record JSON file, or `-` for stdin.
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Optional report configuration file.
    pub config: Option<PathBuf>,
    /// Render charts one at a time.
    pub sequential: bool,
}

/// Resolve the report configuration for a request.
pub fn load_config(request: &GenerateRequest) -> Result<ReportConfig> {
    let config = match &request.config {
        Some(path) => {
            debug!(path = %path.display(), "loading report config");
            ReportConfig::from_path(path)?
        }
        None => ReportConfig::default(),
    };
    if request.sequential {
        Ok(config.with_concurrent_render(false))
    } else {
        Ok(config)
    }
}

/// Read the record JSON from a file or from stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json)?;
        Ok(json)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Generate the report and write it. Returns the written path.
pub async fn generate(request: &GenerateRequest) -> Result<PathBuf> {
    let config = load_config(request)?;
    let json = read_input(&request.input)?;
    let generator = ReportGenerator::standard(config);
    let artifact = generator.generate_from_json(&json).await?;
    let path = artifact.write_to(&request.output_dir)?;
    info!(
        path = %path.display(),
        sha256 = %artifact.sha256,
        "report saved"
    );
    Ok(path)
}
