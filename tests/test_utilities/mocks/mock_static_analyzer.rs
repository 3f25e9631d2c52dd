use async_trait::async_trait;
use cookbook_audit::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Mock StaticAnalyzer keyed by the staging directory name (`name/version`)
#[derive(Clone, Default)]
pub struct MockStaticAnalyzer {
    results: HashMap<String, Vec<FileOffenses>>,
    errors: HashMap<String, String>,
}

impl MockStaticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `offenses` as `(rule_id, auto_correctable)` pairs in one file
    pub fn with_offenses(
        mut self,
        staging_dir: &str,
        path: &str,
        offenses: &[(&str, bool)],
    ) -> Self {
        let offenses = offenses
            .iter()
            .map(|(rule, correctable)| {
                Offense::new(
                    rule.to_string(),
                    format!("{} violated", rule),
                    *correctable,
                )
            })
            .collect();
        self.results
            .entry(staging_dir.to_string())
            .or_default()
            .push(FileOffenses::new(path.to_string(), offenses));
        self
    }

    pub fn with_error(mut self, staging_dir: &str, message: &str) -> Self {
        self.errors
            .insert(staging_dir.to_string(), message.to_string());
        self
    }
}

#[async_trait]
impl StaticAnalyzer for MockStaticAnalyzer {
    async fn analyze(&self, cookbook_path: &Path) -> Result<Vec<FileOffenses>> {
        let key = staging_key(cookbook_path);
        if let Some(message) = self.errors.get(&key) {
            anyhow::bail!("{}", message);
        }
        Ok(self.results.get(&key).cloned().unwrap_or_default())
    }
}

/// `name/version` from the last two components of a staging path
fn staging_key(path: &Path) -> String {
    let segment = |p: Option<&Path>| {
        p.and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    };
    format!("{}/{}", segment(path.parent()), segment(Some(path)))
}
