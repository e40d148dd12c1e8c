use log::{debug, warn};

use super::records::{Layout, RecordContext};
use super::{streams, ChromatogramFormat, EncodedContainer, V1009};
use crate::container::{names, Container, EntryStorage};
use crate::model::{Chromatogram, ChromatogramOverview, Scan, ScanStore};
use crate::reader::{DecodeError, ReaderConfig};
use crate::writer::EncodeError;

/// Legacy container version `1.0.0.9`
///
/// Scan bodies carry no additional retention indices, peaks have no
/// active-for-analysis flag and no internal standards, and there is no
/// scan-proxies stream. Proxy mode therefore decodes scans eagerly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatV1009;

impl FormatV1009 {
    /// Record layout of this version
    pub const LAYOUT: Layout = Layout::V1009;
}

impl ChromatogramFormat for FormatV1009 {
    fn version(&self) -> &str {
        V1009
    }

    fn decode(&self, container: &mut Container, config: &ReaderConfig) -> Result<Chromatogram, DecodeError> {
        let transitions = config.transition_registry();
        let ctx = RecordContext::new(Self::LAYOUT, &transitions);

        let method = streams::decode_method(container)?;
        if config.use_scan_proxies {
            warn!("Version {} has no scan proxies, decoding scans eagerly", V1009);
        }
        let scans = ScanStore::Eager(streams::decode_scans(container, &ctx)?);
        let baseline = streams::decode_baseline(container, config.validate_baseline)?;
        let peaks = streams::decode_peaks(container, &ctx)?;
        let (chromatogram_area, background_area) = streams::decode_area(container)?;
        let targets = streams::decode_identification(container)?;
        let edit_history = streams::decode_history(container)?;
        let misc = streams::decode_misc(container)?;

        debug!("Decoded {} container", V1009);
        Ok(Chromatogram {
            method,
            scans,
            baseline,
            peaks,
            chromatogram_area,
            background_area,
            targets,
            edit_history,
            date: misc.date,
            misc_info: misc.misc_info,
            misc_info_separated: misc.misc_info_separated,
            data_name: misc.data_name,
            operator: misc.operator,
        })
    }

    fn decode_overview(&self, container: &mut Container) -> Result<ChromatogramOverview, DecodeError> {
        streams::decode_tic(container)
    }

    fn encode(&self, chromatogram: &Chromatogram) -> Result<EncodedContainer, EncodeError> {
        let scans = chromatogram.scans.materialize()?;
        warn_on_dropped_fields(chromatogram, &scans);
        let encoded_scans = streams::encode_scans(&scans, Self::LAYOUT)?;

        let mut container = EncodedContainer::new();
        container.push(names::VERSION, streams::encode_version(V1009)?, EntryStorage::Stored);
        container.push(names::METHOD, streams::encode_method(&chromatogram.method)?, EntryStorage::Deflated);
        container.push(names::SCANS, encoded_scans.scans, EntryStorage::Stored);
        container.push(names::TIC, encoded_scans.tic, EntryStorage::Deflated);
        container.push(names::BASELINE, streams::encode_baseline(&chromatogram.baseline)?, EntryStorage::Deflated);
        container.push(
            names::PEAKS,
            streams::encode_peaks(&chromatogram.peaks, Self::LAYOUT)?,
            EntryStorage::Deflated,
        );
        container.push(names::AREA, streams::encode_area(chromatogram)?, EntryStorage::Deflated);
        container.push(
            names::IDENTIFICATION,
            streams::encode_identification(&chromatogram.targets)?,
            EntryStorage::Deflated,
        );
        container.push(
            names::HISTORY,
            streams::encode_history(&chromatogram.edit_history)?,
            EntryStorage::Deflated,
        );
        container.push(names::MISC, streams::encode_misc(chromatogram)?, EntryStorage::Deflated);
        Ok(container)
    }
    fn layout(&self) -> Option<Layout> {
        Some(Self::LAYOUT)
    }
}

fn warn_on_dropped_fields(chromatogram: &Chromatogram, scans: &[Scan]) {
    let indexed_scans = scans
        .iter()
        .filter(|s| s.additional_retention_indices.is_some())
        .count();
    if indexed_scans > 0 {
        warn!(
            "{} scans carry additional retention indices that {} cannot store",
            indexed_scans, V1009
        );
    }
    let peaks_with_extras = chromatogram
        .peaks
        .iter()
        .filter(|p| !p.active_for_analysis || !p.internal_standards.is_empty())
        .count();
    if peaks_with_extras > 0 {
        warn!(
            "{} peaks carry an inactive flag or internal standards that {} cannot store",
            peaks_with_extras, V1009
        );
    }
}
