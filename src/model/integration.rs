use serde::Serialize;

/// Area integrated for one ion (or the total signal)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IntegrationEntry {
    /// Ion m/z, 0 for the total ion signal
    pub ion: f64,
    /// Integrated area
    pub integrated_area: f64,
}

impl IntegrationEntry {
    /// New entry
    pub fn new(ion: f64, integrated_area: f64) -> Self {
        Self {
            ion,
            integrated_area,
        }
    }
}

/// Integration result of a chromatogram or of its background
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntegratedArea {
    /// Description of the integrator that produced the entries
    pub integrator_description: String,
    /// Per-ion entries
    pub entries: Vec<IntegrationEntry>,
}

impl IntegratedArea {
    /// Sum of all entries
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.integrated_area).sum()
    }
}

/// Quantitation result attached to a peak
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuantitationEntry {
    /// Quantified compound
    pub name: String,
    /// Chemical class of the compound
    pub chemical_class: String,
    /// Concentration
    pub concentration: f64,
    /// Concentration unit
    pub concentration_unit: String,
    /// Area used for quantitation
    pub area: f64,
    /// Calibration method
    pub calibration_method: String,
    /// Whether the calibration curve was forced through zero
    pub used_cross_zero: bool,
    /// Free-text description
    pub description: String,
    /// Quantitation ion, present only for mass-selective quantitation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ion: Option<f64>,
}

/// Internal standard assigned to a peak
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InternalStandard {
    /// Standard name
    pub name: String,
    /// Concentration
    pub concentration: f64,
    /// Concentration unit
    pub concentration_unit: String,
    /// Response factor
    pub response_factor: f64,
    /// Chemical class
    pub chemical_class: String,
}
