use crate::report::Target;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Group package names by license type.
///
/// Both the license types and the package names are sorted and unique.
pub fn group_by_license(targets: &[Target]) -> BTreeMap<String, BTreeSet<String>> {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in targets.iter().flat_map(|target| target.entries()) {
        let package = entry.package_name.as_deref().unwrap_or("Unknown");
        groups
            .entry(entry.license_type().to_string())
            .or_default()
            .insert(package.to_string());
    }
    groups
}

/// Write a human readable license summary of the targets
pub fn write_summary<W>(targets: &[Target], mut w: W) -> std::io::Result<()>
where
    W: std::io::Write,
{
    writeln!(w, "LICENSE SUMMARY")?;
    writeln!(w, "{}", "=".repeat(50))?;
    writeln!(w)?;

    if targets.is_empty() {
        writeln!(w, "No license information found.")?;
        return Ok(());
    }

    // a package listed under several license types is counted once per type
    let mut total = 0;
    for (license, packages) in group_by_license(targets) {
        total += packages.len();
        writeln!(w, "{} ({} packages):", license, packages.len())?;
        for package in packages.iter() {
            writeln!(w, "  - {}", package)?;
        }
        writeln!(w)?;
    }

    writeln!(w, "Total packages with license info: {}", total)?;

    Ok(())
}

fn render(input: &Path) -> Result<Vec<u8>, anyhow::Error> {
    let targets = crate::report::read_report(input)?;
    let mut text = Vec::new();
    write_summary(&targets, &mut text)?;
    Ok(text)
}

/// Generate a license summary file from a license report.
///
/// Failing to read the report still produces an output file containing a single error line.
/// Only a failure to write the output file is returned.
pub fn create_summary(input: &Path, output: &Path) -> Result<(), anyhow::Error> {
    let text = match render(input) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("unable to summarize {}: {:#}", input.display(), err);
            format!("Error creating license summary: {:#}\n", err).into_bytes()
        }
    };

    std::fs::write(output, text)?;
    log::info!("wrote license summary to {}", output.display());
    Ok(())
}
