use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{IdentificationTarget, Ion};

/// Column class a retention index was calibrated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetentionIndexType {
    /// Semi-standard non-polar column
    SemiStandardNonPolar,
    /// Standard non-polar column
    StandardNonPolar,
    /// Semi-standard polar column
    SemiStandardPolar,
    /// Standard polar column
    StandardPolar,
}

impl RetentionIndexType {
    /// Name as stored in the container
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionIndexType::SemiStandardNonPolar => "SEMI_STANDARD_NON_POLAR",
            RetentionIndexType::StandardNonPolar => "STANDARD_NON_POLAR",
            RetentionIndexType::SemiStandardPolar => "SEMI_STANDARD_POLAR",
            RetentionIndexType::StandardPolar => "STANDARD_POLAR",
        }
    }
}

impl fmt::Display for RetentionIndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetentionIndexType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SEMI_STANDARD_NON_POLAR" => Ok(RetentionIndexType::SemiStandardNonPolar),
            "STANDARD_NON_POLAR" => Ok(RetentionIndexType::StandardNonPolar),
            "SEMI_STANDARD_POLAR" => Ok(RetentionIndexType::SemiStandardPolar),
            "STANDARD_POLAR" => Ok(RetentionIndexType::StandardPolar),
            other => Err(format!("unknown retention index type '{}'", other)),
        }
    }
}

/// One spectral observation at a retention time
///
/// Retention times are integer milliseconds. The secondary and tertiary
/// coordinates are used by multi-dimensional separations and are 0 otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scan {
    /// Mass spectrometer level (1 for MS1)
    pub mass_spectrometer: i16,
    /// Spectrum type (0 = profile/unknown, 1 = centroid)
    pub mass_spectrum_type: i16,
    /// Selected precursor, 0 for MS1 data
    pub precursor_ion: f64,
    /// Retention time in milliseconds
    pub retention_time: i32,
    /// Retention time on the first column of a 2D separation
    pub retention_time_column1: i32,
    /// Retention time on the second column of a 2D separation
    pub retention_time_column2: i32,
    /// Primary retention index
    pub retention_index: f32,
    /// Retention indices for other column classes, absent when never recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_retention_indices: Option<Vec<(RetentionIndexType, f32)>>,
    /// Time segment id
    pub time_segment_id: i32,
    /// Cycle number
    pub cycle_number: i32,
    /// Ions in acquisition order
    pub ions: Vec<Ion>,
    /// Library matches of this spectrum
    pub targets: Vec<IdentificationTarget>,
}

impl Default for Scan {
    fn default() -> Self {
        Self {
            mass_spectrometer: 1,
            mass_spectrum_type: 0,
            precursor_ion: 0.0,
            retention_time: 0,
            retention_time_column1: 0,
            retention_time_column2: 0,
            retention_index: 0.0,
            additional_retention_indices: None,
            time_segment_id: 1,
            cycle_number: 1,
            ions: Vec::new(),
            targets: Vec::new(),
        }
    }
}

impl Scan {
    /// Empty MS1 scan at `retention_time`
    pub fn new(retention_time: i32) -> Self {
        Self {
            retention_time,
            ..Default::default()
        }
    }

    /// Builder-style helper appending a plain ion
    pub fn with_ion(mut self, mz: f64, abundance: f32) -> Self {
        self.ions.push(Ion::new(mz, abundance));
        self
    }

    /// Number of ions
    pub fn ion_count(&self) -> usize {
        self.ions.len()
    }

    /// Sum of all ion abundances
    pub fn total_signal(&self) -> f32 {
        self.ions.iter().map(|ion| ion.abundance).sum()
    }

    /// Ion with the highest abundance
    pub fn base_peak(&self) -> Option<&Ion> {
        self.ions
            .iter()
            .max_by(|a, b| a.abundance.total_cmp(&b.abundance))
    }

    /// Retention index recorded for `index_type`, if any
    pub fn retention_index_for(&self, index_type: RetentionIndexType) -> Option<f32> {
        self.additional_retention_indices
            .as_ref()?
            .iter()
            .find(|(t, _)| *t == index_type)
            .map(|(_, value)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_signal_and_base_peak() {
        let scan = Scan::new(1500)
            .with_ion(43.0, 100.0)
            .with_ion(57.0, 250.0)
            .with_ion(71.0, 50.0);
        assert_eq!(scan.ion_count(), 3);
        assert_eq!(scan.total_signal(), 400.0);
        assert_eq!(scan.base_peak().map(|ion| ion.mz), Some(57.0));
    }

    #[test]
    fn test_retention_index_type_names_roundtrip() {
        for t in [
            RetentionIndexType::SemiStandardNonPolar,
            RetentionIndexType::StandardNonPolar,
            RetentionIndexType::SemiStandardPolar,
            RetentionIndexType::StandardPolar,
        ] {
            assert_eq!(t.as_str().parse::<RetentionIndexType>(), Ok(t));
        }
        assert!("POLARISH".parse::<RetentionIndexType>().is_err());
    }

    #[test]
    fn test_additional_retention_index_lookup() {
        let mut scan = Scan::new(0);
        assert_eq!(scan.retention_index_for(RetentionIndexType::StandardPolar), None);
        scan.additional_retention_indices =
            Some(vec![(RetentionIndexType::StandardPolar, 1432.5)]);
        assert_eq!(
            scan.retention_index_for(RetentionIndexType::StandardPolar),
            Some(1432.5)
        );
    }
}
