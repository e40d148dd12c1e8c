use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{IdentificationTarget, IntegrationEntry, InternalStandard, QuantitationEntry, Scan};

/// Baseline/valley classification of a peak's start and end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeakType {
    /// Unclassified
    #[default]
    Default,
    /// Baseline to baseline
    BB,
    /// Baseline to valley
    BV,
    /// Valley to baseline
    VB,
    /// Valley to valley
    VV,
    /// Baseline to perpendicular drop
    BP,
    /// Perpendicular drop to baseline
    PB,
    /// Perpendicular drop to valley
    PV,
    /// Valley to perpendicular drop
    VP,
    /// Perpendicular drop on both sides
    PP,
}

impl PeakType {
    /// Name as stored in the container
    pub fn as_str(&self) -> &'static str {
        match self {
            PeakType::Default => "DEFAULT",
            PeakType::BB => "BB",
            PeakType::BV => "BV",
            PeakType::VB => "VB",
            PeakType::VV => "VV",
            PeakType::BP => "BP",
            PeakType::PB => "PB",
            PeakType::PV => "PV",
            PeakType::VP => "VP",
            PeakType::PP => "PP",
        }
    }
}

impl fmt::Display for PeakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeakType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEFAULT" => Ok(PeakType::Default),
            "BB" => Ok(PeakType::BB),
            "BV" => Ok(PeakType::BV),
            "VB" => Ok(PeakType::VB),
            "VV" => Ok(PeakType::VV),
            "BP" => Ok(PeakType::BP),
            "PB" => Ok(PeakType::PB),
            "PV" => Ok(PeakType::PV),
            "VP" => Ok(PeakType::VP),
            "PP" => Ok(PeakType::PP),
            other => Err(format!("unknown peak type '{}'", other)),
        }
    }
}

/// Relative intensity profile of a peak, keyed by retention time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeakIntensityValues {
    values: BTreeMap<i32, f32>,
}

impl PeakIntensityValues {
    /// Value the largest intensity is scaled to by [`normalize`](Self::normalize)
    pub const NORMALIZATION_CEILING: f32 = 1000.0;

    /// Empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intensity at `retention_time`, replacing any previous value
    pub fn add(&mut self, retention_time: i32, intensity: f32) {
        self.values.insert(retention_time, intensity);
    }

    /// Intensity at `retention_time`
    pub fn get(&self, retention_time: i32) -> Option<f32> {
        self.values.get(&retention_time).copied()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the profile has no points
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Points ordered by retention time
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (i32, f32)> + '_ {
        self.values.iter().map(|(rt, v)| (*rt, *v))
    }

    /// Largest intensity
    pub fn max_intensity(&self) -> Option<f32> {
        self.values.values().copied().max_by(f32::total_cmp)
    }

    /// Retention time of the largest intensity (earliest on ties)
    pub fn retention_time_at_maximum(&self) -> Option<i32> {
        let mut best: Option<(i32, f32)> = None;
        for (rt, v) in self.iter() {
            if best.map_or(true, |(_, b)| v > b) {
                best = Some((rt, v));
            }
        }
        best.map(|(rt, _)| rt)
    }

    /// Scale the profile so that its maximum equals [`NORMALIZATION_CEILING`](Self::NORMALIZATION_CEILING)
    ///
    /// Curves whose maximum is not a positive finite number are left as they
    /// are. The maximum is pinned to the ceiling exactly, so normalizing an
    /// already normalized curve does not change any value.
    pub fn normalize(&mut self) {
        let Some(max) = self.max_intensity() else {
            return;
        };
        if !(max.is_finite() && max > 0.0) || max == Self::NORMALIZATION_CEILING {
            return;
        }
        let factor = f64::from(Self::NORMALIZATION_CEILING) / f64::from(max);
        for value in self.values.values_mut() {
            *value = if *value == max {
                Self::NORMALIZATION_CEILING
            } else {
                ((f64::from(*value) * factor) as f32).min(Self::NORMALIZATION_CEILING)
            };
        }
    }

    /// True if the maximum is exactly the ceiling, or the curve cannot be normalized
    pub fn is_normalized(&self) -> bool {
        match self.max_intensity() {
            Some(max) if max.is_finite() && max > 0.0 => max == Self::NORMALIZATION_CEILING,
            _ => true,
        }
    }
}

impl FromIterator<(i32, f32)> for PeakIntensityValues {
    fn from_iter<T: IntoIterator<Item = (i32, f32)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A detected chromatographic peak
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Peak {
    /// Detector that found the peak
    pub detector_description: String,
    /// Quantifier that processed the peak
    pub quantifier_description: String,
    /// Whether the peak takes part in further analysis
    pub active_for_analysis: bool,
    /// Integrator that computed the areas
    pub integrator_description: String,
    /// Description of the peak model
    pub model_description: String,
    /// Start/end classification
    pub peak_type: PeakType,
    /// Suggested number of co-eluting components
    pub suggested_number_of_components: i32,
    /// Background abundance at the peak start
    pub start_background_abundance: f32,
    /// Background abundance at the peak stop
    pub stop_background_abundance: f32,
    /// Scan at the apex
    pub peak_maximum: Scan,
    /// Deconvoluted spectrum at the apex, if one was computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimized_mass_spectrum: Option<Scan>,
    /// Normalized intensity profile
    pub intensity_values: PeakIntensityValues,
    /// Integrated areas per ion
    pub integration_entries: Vec<IntegrationEntry>,
    /// Library matches
    pub targets: Vec<IdentificationTarget>,
    /// Quantitation results
    pub quantitation_entries: Vec<QuantitationEntry>,
    /// Internal standards
    pub internal_standards: Vec<InternalStandard>,
}

impl Peak {
    /// Active peak with the given apex scan and intensity profile
    pub fn new(peak_maximum: Scan, intensity_values: PeakIntensityValues) -> Self {
        Self {
            active_for_analysis: true,
            peak_maximum,
            intensity_values,
            ..Default::default()
        }
    }

    /// Sum of the integration entries
    pub fn integrated_area(&self) -> f64 {
        self.integration_entries
            .iter()
            .map(|e| e.integrated_area)
            .sum()
    }

    /// Apex retention time from the intensity profile, else from the apex scan
    pub fn retention_time_at_maximum(&self) -> i32 {
        self.intensity_values
            .retention_time_at_maximum()
            .unwrap_or(self.peak_maximum.retention_time)
    }

    /// Target with the highest match factor
    pub fn best_target(&self) -> Option<&IdentificationTarget> {
        IdentificationTarget::best(&self.targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn curve(values: &[f32]) -> PeakIntensityValues {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as i32 * 100, *v))
            .collect()
    }

    #[test]
    fn test_normalize_scales_to_ceiling() {
        let mut values = curve(&[0.0, 50.0, 100.0, 50.0, 0.0]);
        values.normalize();
        let normalized: Vec<f32> = values.iter().map(|(_, v)| v).collect();
        assert_eq!(normalized, vec![0.0, 500.0, 1000.0, 500.0, 0.0]);
        assert_eq!(values.retention_time_at_maximum(), Some(200));
    }

    #[test]
    fn test_zero_curve_is_untouched() {
        let mut values = curve(&[0.0, 0.0, 0.0]);
        values.normalize();
        assert!(values.iter().all(|(_, v)| v == 0.0));
        assert!(values.is_normalized());
    }

    #[test]
    fn test_peak_type_names_roundtrip() {
        for t in [
            PeakType::Default,
            PeakType::BB,
            PeakType::BV,
            PeakType::VB,
            PeakType::VV,
            PeakType::BP,
            PeakType::PB,
            PeakType::PV,
            PeakType::VP,
            PeakType::PP,
        ] {
            assert_eq!(t.to_string().parse::<PeakType>(), Ok(t));
        }
        assert!("XX".parse::<PeakType>().is_err());
    }

    #[test]
    fn test_integrated_area_sums_entries() {
        let mut peak = Peak::new(Scan::new(1000), PeakIntensityValues::new());
        peak.integration_entries = vec![
            IntegrationEntry::new(0.0, 1200.0),
            IntegrationEntry::new(57.0, 300.5),
        ];
        assert_eq!(peak.integrated_area(), 1500.5);
        assert_eq!(peak.retention_time_at_maximum(), 1000);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(values in prop::collection::vec(0.0f32..1.0e7, 1..64)) {
            let mut once = curve(&values);
            once.normalize();
            let mut twice = once.clone();
            twice.normalize();
            let a: Vec<u32> = once.iter().map(|(_, v)| v.to_bits()).collect();
            let b: Vec<u32> = twice.iter().map(|(_, v)| v.to_bits()).collect();
            prop_assert_eq!(a, b);
            prop_assert!(once.iter().all(|(_, v)| v <= PeakIntensityValues::NORMALIZATION_CEILING));
            prop_assert!(once.is_normalized());
        }
    }
}
