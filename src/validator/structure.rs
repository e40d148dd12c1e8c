use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::container::{names, Container, EntryStorage};
use crate::format::{ChromatogramFormat, FormatRegistry};
use crate::model::Chromatogram;

use super::{CheckCategory, ValidationCheck, ValidationError, ValidationReport};

const CATEGORY: CheckCategory = CheckCategory::Structure;

/// Container that passed the structure checks, with its resolved format
pub(crate) struct CheckedContainer {
    pub container: Container,
    pub format: Arc<dyn ChromatogramFormat>,
}

/// Step 1: archive layout and entry storage
///
/// Returns `Ok(None)` when a failure makes further checks pointless; the
/// failure is already recorded in the report.
pub(crate) fn check_structure(
    path: &Path,
    registry: &FormatRegistry,
    report: &mut ValidationReport,
) -> Result<Option<CheckedContainer>> {
    if !path.is_file() {
        report.add_check(ValidationCheck::failed(
            CATEGORY,
            "File exists",
            format!("Not a file: {}", path.display()),
        ));
        anyhow::bail!(ValidationError::StructureError(format!(
            "{} is not a file",
            path.display()
        )));
    }
    report.add_check(ValidationCheck::ok(CATEGORY, "File exists"));

    let mut container = match Container::open(path) {
        Ok(container) => container,
        Err(e) => {
            report.add_check(ValidationCheck::failed(CATEGORY, "ZIP archive opens", e.to_string()));
            return Ok(None);
        }
    };
    report.add_check(ValidationCheck::ok(CATEGORY, "ZIP archive opens"));

    let entry_names = container.entry_names();
    match entry_names.first() {
        Some(first) if first == names::VERSION => {
            report.add_check(ValidationCheck::ok(CATEGORY, "Version marker is the first entry"));
        }
        Some(first) => report.add_check(ValidationCheck::warning(
            CATEGORY,
            "Version marker is the first entry",
            format!("first entry is '{}'", first),
        )),
        None => {
            report.add_check(ValidationCheck::failed(
                CATEGORY,
                "Version marker is the first entry",
                "archive is empty",
            ));
            return Ok(None);
        }
    }

    let version = match container.read_version_marker() {
        Ok(version) => version,
        Err(e) => {
            report.add_check(ValidationCheck::failed(CATEGORY, "Version marker readable", e.to_string()));
            return Ok(None);
        }
    };
    report.version = Some(version.clone());
    let Some(format) = registry.get(&version) else {
        report.add_check(ValidationCheck::failed(
            CATEGORY,
            "Version supported",
            format!(
                "'{}' is not one of the registered versions ({})",
                version,
                registry.versions().join(", ")
            ),
        ));
        return Ok(None);
    };
    report.add_check(ValidationCheck::ok(CATEGORY, format!("Version supported ({})", version)));

    let required = required_streams(format.as_ref())?;
    let present: BTreeSet<String> = entry_names.iter().cloned().collect();
    let missing: Vec<&str> = required
        .iter()
        .filter(|name| !present.contains(*name))
        .map(String::as_str)
        .collect();
    if missing.is_empty() {
        report.add_check(ValidationCheck::ok(
            CATEGORY,
            format!("All {} streams present", required.len()),
        ));
    } else {
        report.add_check(ValidationCheck::failed(
            CATEGORY,
            "All streams present",
            format!("missing: {}", missing.join(", ")),
        ));
    }

    let unexpected: Vec<&str> = present
        .iter()
        .filter(|name| !required.contains(*name))
        .map(String::as_str)
        .collect();
    if !unexpected.is_empty() {
        report.add_check(ValidationCheck::warning(
            CATEGORY,
            "No unexpected entries",
            format!("ignored entries: {}", unexpected.join(", ")),
        ));
    }

    if container.contains(names::SCANS) {
        match container.entry_storage(names::SCANS)? {
            EntryStorage::Stored => report.add_check(ValidationCheck::ok(CATEGORY, "Scans stream is stored")),
            EntryStorage::Deflated => report.add_check(ValidationCheck::failed(
                CATEGORY,
                "Scans stream is stored",
                "scans stream is compressed, scan proxies cannot seek into it",
            )),
        }
    }

    if !missing.is_empty() {
        return Ok(None);
    }
    Ok(Some(CheckedContainer { container, format }))
}

/// Entries an empty chromatogram encodes to, i.e. the streams every container of `format` carries
fn required_streams(format: &dyn ChromatogramFormat) -> Result<BTreeSet<String>> {
    let encoded = format
        .encode(&Chromatogram::default())
        .map_err(|e| ValidationError::StructureError(format!("cannot derive stream list: {}", e)))?;
    Ok(encoded.entries().iter().map(|e| e.name.clone()).collect())
}
