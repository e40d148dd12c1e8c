use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use super::records::{Layout, RecordContext};
use super::{streams, ChromatogramFormat, EncodedContainer, V1100};
use crate::container::{names, Container, EntryStorage};
use crate::model::{Chromatogram, ChromatogramOverview, ScanStore};
use crate::proxy::ProxySource;
use crate::reader::{DecodeError, ReaderConfig};
use crate::writer::EncodeError;

/// Current container version `1.1.0.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatV1100;

impl FormatV1100 {
    /// Record layout of this version
    pub const LAYOUT: Layout = Layout::V1100;
}

impl ChromatogramFormat for FormatV1100 {
    fn version(&self) -> &str {
        V1100
    }

    fn decode(&self, container: &mut Container, config: &ReaderConfig) -> Result<Chromatogram, DecodeError> {
        let transitions = config.transition_registry();
        let ctx = RecordContext::new(Self::LAYOUT, &transitions);

        let method = streams::decode_method(container)?;
        let path = container.path().map(Path::to_path_buf);
        let scans = match (config.use_scan_proxies, path) {
            (true, Some(path)) => {
                let source = Arc::new(ProxySource::new(
                    path,
                    names::SCANS,
                    Self::LAYOUT,
                    Arc::clone(&transitions),
                ));
                ScanStore::Proxied(streams::decode_scan_proxies(container, source)?)
            }
            (true, None) => {
                warn!("Scan proxies need a file-backed container, decoding scans eagerly");
                ScanStore::Eager(streams::decode_scans(container, &ctx)?)
            }
            (false, _) => ScanStore::Eager(streams::decode_scans(container, &ctx)?),
        };
        let baseline = streams::decode_baseline(container, config.validate_baseline)?;
        let peaks = streams::decode_peaks(container, &ctx)?;
        let (chromatogram_area, background_area) = streams::decode_area(container)?;
        let targets = streams::decode_identification(container)?;
        let edit_history = streams::decode_history(container)?;
        let misc = streams::decode_misc(container)?;

        debug!("Decoded {} container", V1100);
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
        let encoded_scans = streams::encode_scans(&scans, Self::LAYOUT)?;

        let mut container = EncodedContainer::new();
        container.push(names::VERSION, streams::encode_version(V1100)?, EntryStorage::Stored);
        container.push(names::METHOD, streams::encode_method(&chromatogram.method)?, EntryStorage::Deflated);
        container.push(names::SCANS, encoded_scans.scans, EntryStorage::Stored);
        container.push(names::SCAN_PROXIES, encoded_scans.proxies, EntryStorage::Deflated);
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
