use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Placeholder used by SPDX when a value is unknown
pub const NO_ASSERTION: &str = "NOASSERTION";

/// A named license classification, e.g. "MIT"
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LicenseKind {
    /// Name of the license kind
    #[serde(default)]
    pub name: Option<String>,
}

/// License information attached to a single package
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LicenseEntry {
    /// Name of the package the license applies to
    #[serde(default)]
    pub package_name: Option<String>,
    /// License kinds in the order they were declared
    #[serde(default)]
    pub license_kinds: Option<Vec<LicenseKind>>,
    /// Copyright statement provided by the author(s)
    #[serde(default)]
    pub copyright_notice: Option<String>,
    /// Version of the package
    #[serde(default)]
    pub package_version: Option<String>,
    /// Homepage of the package
    #[serde(default)]
    pub package_url: Option<String>,
    /// License text, or a reference to it
    #[serde(default)]
    pub license_text: Option<String>,
}

/// Aggregated license information of one build target
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Target {
    /// Licenses of everything the target depends on
    #[serde(default)]
    pub licenses: Option<Vec<LicenseEntry>>,
}

impl Target {
    /// License entries of the target, empty when the target carries no license info
    pub fn entries(&self) -> impl Iterator<Item = &LicenseEntry> {
        self.licenses.iter().flatten()
    }
}

impl LicenseEntry {
    fn kinds(&self) -> impl Iterator<Item = &LicenseKind> {
        self.license_kinds.iter().flatten()
    }

    /// The license type used for grouping: the first kind that has a name
    pub fn license_type(&self) -> &str {
        self.kinds()
            .find_map(|kind| kind.name.as_deref())
            .unwrap_or("Unknown")
    }

    /// Names of all license kinds in declaration order without duplicates.
    ///
    /// A kind without a name is reported as [`NO_ASSERTION`].
    pub fn license_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for kind in self.kinds() {
            let name = kind.name.as_deref().unwrap_or(NO_ASSERTION);
            if !names.iter().any(|x| x == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

/// Returns the value if it is present and not empty
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|x| !x.is_empty())
}

/// Read a license report, a JSON array of targets
pub fn read_report(path: &Path) -> Result<Vec<Target>, anyhow::Error> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("unable to open {}", path.display()))?;
    let targets: Vec<Target> = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("unable to parse license report {}", path.display()))?;
    log::debug!("read {} target(s) from {}", targets.len(), path.display());
    Ok(targets)
}
