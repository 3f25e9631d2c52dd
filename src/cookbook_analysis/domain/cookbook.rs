use crate::shared::Result;
use std::path::PathBuf;

/// Maximum length for cookbook names (security limit)
const MAX_COOKBOOK_NAME_LENGTH: usize = 255;

/// Maximum length for cookbook versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// NewType wrapper for cookbook name with validation
///
/// Names are interpolated into API paths and search queries, so the
/// character set is restricted to what the Chef server itself accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookbookName(String);

impl CookbookName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Cookbook name cannot be empty");
        }

        if name.len() > MAX_COOKBOOK_NAME_LENGTH {
            anyhow::bail!(
                "Cookbook name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_COOKBOOK_NAME_LENGTH
            );
        }

        if name.chars().all(|c| c == '.') {
            anyhow::bail!("Cookbook name '{}' is not a valid path segment", name);
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Cookbook name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores, and dots are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CookbookName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for cookbook version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookbookVersion(String);

impl CookbookVersion {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Cookbook version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Cookbook version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if version.chars().all(|c| c == '.') {
            anyhow::bail!("Cookbook version '{}' is not a valid path segment", version);
        }

        if !version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '+')
        {
            anyhow::bail!(
                "Cookbook version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, and plus are allowed.",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CookbookVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one cookbook version known to the catalog
///
/// Ordering is by name, then version string, which is the order
/// records are reported in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookbookVersionRef {
    name: CookbookName,
    version: CookbookVersion,
}

impl CookbookVersionRef {
    pub fn new(name: String, version: String) -> Result<Self> {
        Ok(Self {
            name: CookbookName::new(name)?,
            version: CookbookVersion::new(version)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Relative directory used when staging this version's files locally
    ///
    /// `name/version`: neither part may contain `/`, so distinct refs never share a directory.
    pub fn staging_path(&self) -> PathBuf {
        PathBuf::from(self.name.as_str()).join(self.version.as_str())
    }
}

/// A cookbook version exactly as the catalog listed it, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub version: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn into_ref(self) -> Result<CookbookVersionRef> {
        CookbookVersionRef::new(self.name, self.version)
    }
}

impl std::fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

impl std::fmt::Display for CookbookVersionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookbook_name_new_valid() {
        let name = CookbookName::new("apache2".to_string()).unwrap();
        assert_eq!(name.as_str(), "apache2");

        assert!(CookbookName::new("chef-client".to_string()).is_ok());
        assert!(CookbookName::new("my_company.base".to_string()).is_ok());
    }

    #[test]
    fn test_cookbook_name_new_empty() {
        assert!(CookbookName::new("".to_string()).is_err());
    }

    #[test]
    fn test_cookbook_name_rejects_query_characters() {
        let result = CookbookName::new("apache2 OR name:*".to_string());
        assert!(result.is_err());
        assert!(CookbookName::new("a/b".to_string()).is_err());
    }

    #[test]
    fn test_cookbook_name_too_long() {
        let result = CookbookName::new("a".repeat(MAX_COOKBOOK_NAME_LENGTH + 1));
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_version_new_valid() {
        let version = CookbookVersion::new("1.0.0".to_string()).unwrap();
        assert_eq!(version.as_str(), "1.0.0");
    }

    #[test]
    fn test_version_new_empty() {
        assert!(CookbookVersion::new("".to_string()).is_err());
    }

    #[test]
    fn test_version_rejects_wildcards() {
        assert!(CookbookVersion::new("1.*".to_string()).is_err());
    }

    #[test]
    fn test_ref_accessors_and_display() {
        let cookbook = CookbookVersionRef::new("apache2".to_string(), "1.0.0".to_string()).unwrap();
        assert_eq!(cookbook.name(), "apache2");
        assert_eq!(cookbook.version(), "1.0.0");
        assert_eq!(cookbook.to_string(), "apache2 (1.0.0)");
        assert_eq!(cookbook.staging_path(), PathBuf::from("apache2").join("1.0.0"));
    }

    #[test]
    fn test_staging_paths_of_distinct_refs_differ() {
        // Both would flatten to "foo-1-2.0"
        let a = CookbookVersionRef::new("foo-1".to_string(), "2.0".to_string()).unwrap();
        let b = CookbookVersionRef::new("foo".to_string(), "1-2.0".to_string()).unwrap();
        assert_ne!(a.staging_path(), b.staging_path());
    }

    #[test]
    fn test_catalog_entry_into_ref() {
        let cookbook = CatalogEntry::new("ntp", "3.1.0").into_ref().unwrap();
        assert_eq!(cookbook.to_string(), "ntp (3.1.0)");

        let invalid = CatalogEntry::new("bad name", "1.0.0");
        assert_eq!(invalid.to_string(), "bad name (1.0.0)");
        assert!(invalid.into_ref().is_err());
    }

    #[test]
    fn test_dot_segments_rejected() {
        assert!(CookbookName::new("..".to_string()).is_err());
        assert!(CookbookName::new(".".to_string()).is_err());
        assert!(CookbookVersion::new("..".to_string()).is_err());
        assert!(CookbookName::new("..base".to_string()).is_ok());
    }

    #[test]
    fn test_ref_ordering_name_then_version() {
        let mut refs = vec![
            CookbookVersionRef::new("nginx".to_string(), "2.0.0".to_string()).unwrap(),
            CookbookVersionRef::new("apache2".to_string(), "1.1.0".to_string()).unwrap(),
            CookbookVersionRef::new("apache2".to_string(), "1.0.0".to_string()).unwrap(),
        ];
        refs.sort();

        let rendered: Vec<String> = refs.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["apache2 (1.0.0)", "apache2 (1.1.0)", "nginx (2.0.0)"]
        );
    }
}
