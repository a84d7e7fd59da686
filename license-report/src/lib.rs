/// json model of the license report produced by the build
pub mod report;
/// SPDX bill of materials generated from a license report
pub mod sbom;
/// routines for generating human readable license summaries
pub mod summary;
