use std::collections::BTreeSet;

use serde::Serialize;

/// Library metadata of an identified compound
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryInformation {
    /// Compound name
    pub name: String,
    /// CAS registry number
    pub cas_number: String,
    /// Free-text comments
    pub comments: String,
    /// Identifier of the reference record in its library
    pub reference_identifier: String,
    /// Miscellaneous library data
    pub miscellaneous: String,
    /// Library/database name
    pub database: String,
    /// Contributor of the library record
    pub contributor: String,
    /// Synonyms (stored sorted, without duplicates)
    pub synonyms: BTreeSet<String>,
    /// Molecular formula
    pub formula: String,
    /// SMILES notation
    pub smiles: String,
    /// InChI notation
    pub inchi: String,
    /// Molecular weight
    pub molecular_weight: f64,
}

impl LibraryInformation {
    /// Library record for the named compound
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Scores of a library comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Forward match factor
    pub match_factor: f32,
    /// Forward match factor before penalties
    pub match_factor_direct: f32,
    /// Reverse match factor
    pub reverse_match_factor: f32,
    /// Reverse match factor before penalties
    pub reverse_match_factor_direct: f32,
    /// Match probability
    pub probability: f32,
    /// Whether the comparison was accepted as a match
    pub is_match: bool,
}

/// A library match attached to a chromatogram, peak or scan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdentificationTarget {
    /// Identifier of the algorithm that produced the match
    pub identifier: String,
    /// Set when a user confirmed the match
    pub manually_verified: bool,
    /// Library record
    pub library: LibraryInformation,
    /// Comparison scores
    pub comparison: ComparisonResult,
}

impl IdentificationTarget {
    /// Create a target from its library record and scores
    pub fn new(
        identifier: impl Into<String>,
        library: LibraryInformation,
        comparison: ComparisonResult,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            manually_verified: false,
            library,
            comparison,
        }
    }

    /// The target with the highest match factor
    pub fn best(targets: &[IdentificationTarget]) -> Option<&IdentificationTarget> {
        targets.iter().max_by(|a, b| {
            a.comparison
                .match_factor
                .total_cmp(&b.comparison.match_factor)
        })
    }
}
