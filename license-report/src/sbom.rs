use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::{non_empty, Target, NO_ASSERTION};

/// SPDX version written into every document
pub const SPDX_VERSION: &str = "SPDX-2.3";
/// License of the document data itself
pub const DATA_LICENSE: &str = "CC0-1.0";
/// SPDX identifier of the document
pub const DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";
/// Namespace of the generated documents
pub const DOCUMENT_NAMESPACE: &str = "https://spdx.org/spdxdocs/bazel-project";
/// Tool recorded as the creator of the document
pub const CREATOR: &str = "Tool: bazel-sbom-generator";
/// Version of the SPDX license list the license identifiers refer to
pub const LICENSE_LIST_VERSION: &str = "3.21";
/// Prefix of every package identifier
pub const PACKAGE_REF_PREFIX: &str = "SPDXRef-Package-";

/// Who created the document and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationInfo {
    /// ISO-8601 UTC timestamp of the creation
    pub created: String,
    /// Tools and people that created the document
    pub creators: Vec<String>,
    /// Absent in error documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_list_version: Option<String>,
}

impl CreationInfo {
    fn new(created: DateTime<Utc>) -> Self {
        Self {
            created: created.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            creators: vec![CREATOR.to_string()],
            license_list_version: Some(LICENSE_LIST_VERSION.to_string()),
        }
    }
}

/// A package described by the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// "SPDXRef-Package-" followed by the package name
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    /// Package name
    pub name: String,
    /// Always NOASSERTION
    pub download_location: String,
    /// Always false, no files are analyzed
    pub files_analyzed: bool,
    /// License expression joining all license kinds with AND
    pub license_concluded: String,
    /// Same as the concluded license
    pub license_declared: String,
    /// Copyright notice or NOASSERTION
    pub copyright_text: String,
    /// License names, only present when the package ships a license text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_info_from_files: Option<Vec<String>>,
    /// Package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_info: Option<String>,
    /// Package url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// Relationship between the document and a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Always the document
    pub spdx_element_id: String,
    /// Identifier of the package
    pub related_spdx_element: String,
    /// Always DESCRIBES
    pub relationship_type: String,
}

impl Relationship {
    fn describes(package_ref: &str) -> Self {
        Self {
            spdx_element_id: DOCUMENT_ID.to_string(),
            related_spdx_element: package_ref.to_string(),
            relationship_type: "DESCRIBES".to_string(),
        }
    }
}

/// SPDX 2.3 document listing the packages of a license report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Always SPDX-2.3
    pub spdx_version: String,
    /// Always CC0-1.0
    pub data_license: String,
    /// Always SPDXRef-DOCUMENT
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    /// Document name
    pub name: String,
    /// Document namespace
    pub document_namespace: String,
    /// Creation information
    pub creation_info: CreationInfo,
    /// Packages sorted by name
    pub packages: Vec<Package>,
    /// Relationships sorted by the related package
    pub relationships: Vec<Relationship>,
    /// Errors that prevented the generation, only present in error documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl Document {
    fn new(name: &str, creation_info: CreationInfo) -> Self {
        Self {
            spdx_version: SPDX_VERSION.to_string(),
            data_license: DATA_LICENSE.to_string(),
            spdx_id: DOCUMENT_ID.to_string(),
            name: name.to_string(),
            document_namespace: DOCUMENT_NAMESPACE.to_string(),
            creation_info,
            packages: Vec::new(),
            relationships: Vec::new(),
            errors: None,
        }
    }
}

/// Create an SBOM describing every package in the license report.
///
/// Packages are identified by name, the first entry for a name wins.
pub fn create_sbom(targets: &[Target], created: DateTime<Utc>) -> Document {
    let mut doc = Document::new("Project License SBOM", CreationInfo::new(created));
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for entry in targets.iter().flat_map(|target| target.entries()) {
        let name = entry.package_name.as_deref().unwrap_or("unknown");
        let package_ref = format!("{}{}", PACKAGE_REF_PREFIX, name);
        if !seen.insert(package_ref.clone()) {
            continue;
        }

        let licenses = entry.license_names();
        let license_concluded = if licenses.is_empty() {
            NO_ASSERTION.to_string()
        } else {
            licenses.join(" AND ")
        };

        let license_info_from_files = non_empty(&entry.license_text).map(|_| {
            if licenses.is_empty() {
                vec![NO_ASSERTION.to_string()]
            } else {
                licenses.clone()
            }
        });

        doc.packages.push(Package {
            spdx_id: package_ref.clone(),
            name: name.to_string(),
            download_location: NO_ASSERTION.to_string(),
            files_analyzed: false,
            license_declared: license_concluded.clone(),
            license_concluded,
            copyright_text: non_empty(&entry.copyright_notice)
                .unwrap_or(NO_ASSERTION)
                .to_string(),
            license_info_from_files,
            version_info: non_empty(&entry.package_version).map(str::to_string),
            homepage: non_empty(&entry.package_url).map(str::to_string),
        });
        doc.relationships.push(Relationship::describes(&package_ref));
    }

    doc.packages.sort_by(|a, b| a.name.cmp(&b.name));
    doc.relationships
        .sort_by(|a, b| a.related_spdx_element.cmp(&b.related_spdx_element));

    log::debug!("sbom describes {} package(s)", doc.packages.len());
    doc
}

/// Create the document written in place of the SBOM when generation fails
pub fn error_document(message: String, created: DateTime<Utc>) -> Document {
    let mut info = CreationInfo::new(created);
    info.license_list_version = None;
    let mut doc = Document::new("Error SBOM", info);
    doc.errors = Some(vec![message]);
    doc
}

/// Generate an SBOM file from a license report.
///
/// Failing to read the report still produces an output file, the error document.
/// Only a failure to write the output file is returned.
pub fn generate_sbom(input: &Path, output: &Path) -> Result<(), anyhow::Error> {
    let doc = match crate::report::read_report(input) {
        Ok(targets) => create_sbom(&targets, Utc::now()),
        Err(err) => {
            log::warn!("unable to generate sbom for {}: {:#}", input.display(), err);
            error_document(format!("{:#}", err), Utc::now())
        }
    };

    let mut writer = std::io::BufWriter::new(std::fs::File::create(output)?);
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    std::io::Write::flush(&mut writer)?;
    log::info!("wrote sbom to {}", output.display());
    Ok(())
}
