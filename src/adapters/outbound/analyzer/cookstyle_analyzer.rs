use crate::cookbook_analysis::domain::{FileOffenses, Offense};
use crate::ports::outbound::StaticAnalyzer;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Analyzer program used when none is configured
pub const DEFAULT_ANALYZER: &str = "cookstyle";

#[derive(Debug, Deserialize)]
struct CookstyleReport {
    #[serde(default)]
    files: Vec<CookstyleFile>,
}

#[derive(Debug, Deserialize)]
struct CookstyleFile {
    path: String,
    #[serde(default)]
    offenses: Vec<CookstyleOffense>,
}

#[derive(Debug, Deserialize)]
struct CookstyleOffense {
    cop_name: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    correctable: bool,
}

impl From<CookstyleFile> for FileOffenses {
    fn from(file: CookstyleFile) -> Self {
        let offenses = file
            .offenses
            .into_iter()
            .map(|o| Offense::new(o.cop_name, o.message, o.correctable))
            .collect();
        FileOffenses::new(file.path, offenses)
    }
}

/// CookstyleAnalyzer adapter running cookstyle against a cookbook directory
///
/// The JSON report on stdout is authoritative: cookstyle exits non-zero
/// whenever it finds offenses, so the exit status only matters when stdout
/// can't be parsed.
pub struct CookstyleAnalyzer {
    program: String,
}

impl CookstyleAnalyzer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn parse_report(stdout: &[u8]) -> Result<Vec<FileOffenses>> {
        let report: CookstyleReport = serde_json::from_slice(stdout)?;
        Ok(report.files.into_iter().map(FileOffenses::from).collect())
    }

    fn interpret(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Result<Vec<FileOffenses>> {
        match Self::parse_report(stdout) {
            Ok(files) => Ok(files),
            Err(parse_error) if status.success() => {
                Err(parse_error.context("cookstyle produced malformed output"))
            }
            Err(_) => {
                let stderr = String::from_utf8_lossy(stderr);
                let first_line = stderr
                    .lines()
                    .map(str::trim)
                    .find(|line| !line.is_empty())
                    .unwrap_or("no diagnostic output");
                anyhow::bail!("cookstyle failed ({}): {}", status, first_line)
            }
        }
    }
}

impl Default for CookstyleAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYZER)
    }
}

#[async_trait]
impl StaticAnalyzer for CookstyleAnalyzer {
    async fn analyze(&self, cookbook_path: &Path) -> Result<Vec<FileOffenses>> {
        let output = Command::new(&self.program)
            .args(["--format", "json", "."])
            .current_dir(cookbook_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.program))?;

        Self::interpret(output.status, &output.stdout, &output.stderr)
    }
}
