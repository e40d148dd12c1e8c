use serde::Serialize;

/// Acquisition parameters of a chromatographic run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Method {
    /// Instrument name, e.g. "GC-MS"
    pub instrument_name: String,
    /// Ion source description
    pub ion_source: String,
    /// Sampling rate in Hz
    pub sampling_rate: f64,
    /// Solvent delay in milliseconds
    pub solvent_delay: i32,
    /// Source heater temperature
    pub source_heater: f64,
    /// Stop mode description
    pub stop_mode: String,
    /// Stop time in milliseconds
    pub stop_time: i32,
    /// Time filter peak width
    pub time_filter_peak_width: i32,
}

impl Method {
    /// Create a method for the named instrument with all other parameters unset
    pub fn new(instrument_name: impl Into<String>) -> Self {
        Self {
            instrument_name: instrument_name.into(),
            ..Default::default()
        }
    }
}
