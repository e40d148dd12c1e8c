use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    BaselineModel, EditInformation, IdentificationTarget, IntegratedArea, Method, Peak, ScanStore,
};

/// One chromatographic run with everything derived from it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Chromatogram {
    /// Acquisition method
    pub method: Method,
    /// Scans in acquisition order
    pub scans: ScanStore,
    /// Background model
    pub baseline: BaselineModel,
    /// Detected peaks
    pub peaks: Vec<Peak>,
    /// Integration of the whole chromatogram
    pub chromatogram_area: IntegratedArea,
    /// Integration of the background
    pub background_area: IntegratedArea,
    /// Chromatogram-level library matches
    pub targets: Vec<IdentificationTarget>,
    /// Edits applied to the run
    pub edit_history: Vec<EditInformation>,
    /// Acquisition date
    pub date: DateTime<Utc>,
    /// Free-text information
    pub misc_info: String,
    /// Free-text information split into separated fields
    pub misc_info_separated: String,
    /// Data/sample name
    pub data_name: String,
    /// Operator
    pub operator: String,
}

impl Chromatogram {
    /// Number of scans
    pub fn number_of_scans(&self) -> usize {
        self.scans.len()
    }

    /// Retention time of the first scan, 0 when empty
    pub fn start_retention_time(&self) -> i32 {
        self.scans.retention_times().first().copied().unwrap_or(0)
    }

    /// Retention time of the last scan, 0 when empty
    pub fn stop_retention_time(&self) -> i32 {
        self.scans.retention_times().last().copied().unwrap_or(0)
    }

    /// Delay before the first scan
    pub fn scan_delay(&self) -> i32 {
        self.start_retention_time()
    }

    /// Mean scan interval as stop retention time over the number of scans
    pub fn scan_interval(&self) -> i32 {
        match i32::try_from(self.number_of_scans()) {
            Ok(n) if n > 0 => self.stop_retention_time() / n,
            _ => 0,
        }
    }

    /// Total ion chromatogram of the scans
    pub fn overview(&self) -> ChromatogramOverview {
        ChromatogramOverview::new(self.scans.total_signals())
    }

    /// Chromatogram-level target with the highest match factor
    pub fn best_target(&self) -> Option<&IdentificationTarget> {
        IdentificationTarget::best(&self.targets)
    }
}

/// Retention time and total signal of every scan, without ion detail
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChromatogramOverview {
    /// (retention time, total signal) in scan order
    pub points: Vec<(i32, f32)>,
}

impl ChromatogramOverview {
    /// Overview from its points
    pub fn new(points: Vec<(i32, f32)>) -> Self {
        Self { points }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Retention time of the first point
    pub fn start_retention_time(&self) -> Option<i32> {
        self.points.first().map(|(rt, _)| *rt)
    }

    /// Retention time of the last point
    pub fn stop_retention_time(&self) -> Option<i32> {
        self.points.last().map(|(rt, _)| *rt)
    }

    /// Point with the highest total signal
    pub fn max_signal(&self) -> Option<(i32, f32)> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scan;

    #[test]
    fn test_derived_timing() {
        let chromatogram = Chromatogram {
            scans: ScanStore::from(vec![
                Scan::new(1000).with_ion(50.0, 10.0),
                Scan::new(2000).with_ion(50.0, 30.0),
                Scan::new(3000).with_ion(50.0, 20.0),
            ]),
            ..Default::default()
        };
        assert_eq!(chromatogram.number_of_scans(), 3);
        assert_eq!(chromatogram.start_retention_time(), 1000);
        assert_eq!(chromatogram.stop_retention_time(), 3000);
        assert_eq!(chromatogram.scan_delay(), 1000);
        assert_eq!(chromatogram.scan_interval(), 1000);

        let overview = chromatogram.overview();
        assert_eq!(overview.len(), 3);
        assert_eq!(overview.max_signal(), Some((2000, 30.0)));
    }

    #[test]
    fn test_empty_chromatogram_has_zero_interval() {
        let chromatogram = Chromatogram::default();
        assert_eq!(chromatogram.scan_interval(), 0);
        assert_eq!(chromatogram.start_retention_time(), 0);
        assert!(chromatogram.overview().is_empty());
    }
}
