//! # Chromatogram Data Model
//!
//! Plain owned values for one chromatographic run: the acquisition method,
//! scans and their ions, the baseline, peaks with their integration and
//! identification results, and run-level metadata.
//!
//! Nothing here knows about the container layout; the `format` module maps
//! these types to and from stream records.

mod baseline;
mod chromatogram;
mod history;
mod identification;
mod integration;
mod ion;
mod method;
mod peak;
mod scan;
mod scan_store;

pub use baseline::{BaselineError, BaselineModel, BaselineSegment};
pub use chromatogram::{Chromatogram, ChromatogramOverview};
pub use history::EditInformation;
pub use identification::{ComparisonResult, IdentificationTarget, LibraryInformation};
pub use integration::{IntegratedArea, IntegrationEntry, InternalStandard, QuantitationEntry};
pub use ion::{Ion, IonTransition, IonTransitionSettings, TransitionAssignment};
pub use method::Method;
pub use peak::{Peak, PeakIntensityValues, PeakType};
pub use scan::{RetentionIndexType, Scan};
pub use scan_store::ScanStore;
