//! Stream-level decoders and encoders
//!
//! Each function reads or writes one whole container stream using the
//! record codecs. Decoders require that every byte of the stream is consumed.

use std::io::Cursor;
use std::sync::Arc;

use log::debug;

use super::records::{self, Layout, MiscRecord, ProxyRecord, RecordContext};
use crate::codec::{ByteReader, ByteWriter, CodecError};
use crate::container::{names, Container};
use crate::model::{
    BaselineModel, Chromatogram, ChromatogramOverview, EditInformation, IdentificationTarget,
    IntegratedArea, Method, Peak, PeakIntensityValues, Scan,
};
use crate::proxy::{ProxySource, ScanProxy};
use crate::reader::DecodeError;
use crate::writer::EncodeError;

type StreamBytes = ByteReader<Cursor<Vec<u8>>>;

/// Open `name`, decode it with `read` and check nothing is left over
pub fn read_stream<T, F>(container: &mut Container, name: &str, read: F) -> Result<T, DecodeError>
where
    F: FnOnce(&mut StreamBytes) -> Result<T, CodecError>,
{
    let mut stream = container.stream(name)?;
    let value = stream.decode(read)?;
    stream.finish()?;
    Ok(value)
}

/// Decode the method stream
pub fn decode_method(container: &mut Container) -> Result<Method, DecodeError> {
    read_stream(container, names::METHOD, records::read_method)
}

/// Decode every full scan record
pub fn decode_scans(container: &mut Container, ctx: &RecordContext<'_>) -> Result<Vec<Scan>, DecodeError> {
    let scans = read_stream(container, names::SCANS, |r| r.read_list(|r| records::read_scan(r, ctx)))?;
    debug!("Decoded {} scans", scans.len());
    Ok(scans)
}

/// Decode the scan-proxies stream into proxies backed by `source`
pub fn decode_scan_proxies(
    container: &mut Container,
    source: Arc<ProxySource>,
) -> Result<Vec<ScanProxy>, DecodeError> {
    let summaries = read_stream(container, names::SCAN_PROXIES, |r| {
        r.read_list(records::read_proxy_record)
    })?;
    let proxies = summaries
        .into_iter()
        .map(|record| {
            let offset = u64::try_from(record.offset).map_err(|_| {
                DecodeError::corrupt(
                    names::SCAN_PROXIES,
                    format!("negative scan offset {}", record.offset),
                )
            })?;
            let mut proxy = ScanProxy::new(offset, Arc::clone(&source));
            proxy.retention_time = record.retention_time;
            proxy.number_of_ions = record.number_of_ions;
            proxy.total_signal = record.total_signal;
            proxy.retention_index = record.retention_index;
            proxy.time_segment_id = record.time_segment_id;
            proxy.cycle_number = record.cycle_number;
            Ok(proxy)
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;
    debug!("Decoded {} scan proxies", proxies.len());
    Ok(proxies)
}

/// Decode the TIC overview stream
pub fn decode_tic(container: &mut Container) -> Result<ChromatogramOverview, DecodeError> {
    let points = read_stream(container, names::TIC, |r| r.read_list(records::read_point))?;
    debug!("Decoded {} TIC points", points.len());
    Ok(ChromatogramOverview::new(points))
}

/// Decode the baseline anchors into a segment model
pub fn decode_baseline(container: &mut Container, validate: bool) -> Result<BaselineModel, DecodeError> {
    let anchors = read_stream(container, names::BASELINE, |r| r.read_list(records::read_point))?;
    let baseline = BaselineModel::from_anchors(&anchors, validate)
        .map_err(|e| DecodeError::corrupt(names::BASELINE, e.to_string()))?;
    debug!("Decoded {} baseline segments", baseline.len());
    Ok(baseline)
}

/// Decode every peak
pub fn decode_peaks(container: &mut Container, ctx: &RecordContext<'_>) -> Result<Vec<Peak>, DecodeError> {
    let peaks = read_stream(container, names::PEAKS, |r| r.read_list(|r| records::read_peak(r, ctx)))?;
    debug!("Decoded {} peaks", peaks.len());
    Ok(peaks)
}

/// Decode the intensity profile of every peak without normalizing it
pub fn decode_stored_peak_curves(
    container: &mut Container,
    ctx: &RecordContext<'_>,
) -> Result<Vec<PeakIntensityValues>, DecodeError> {
    let peaks = read_stream(container, names::PEAKS, |r| {
        r.read_list(|r| records::read_stored_peak(r, ctx))
    })?;
    Ok(peaks.into_iter().map(|peak| peak.intensity_values).collect())
}

/// Decode the chromatogram and background areas
pub fn decode_area(container: &mut Container) -> Result<(IntegratedArea, IntegratedArea), DecodeError> {
    read_stream(container, names::AREA, |r| {
        Ok((records::read_integrated_area(r)?, records::read_integrated_area(r)?))
    })
}

/// Decode chromatogram-level identification targets
pub fn decode_identification(container: &mut Container) -> Result<Vec<IdentificationTarget>, DecodeError> {
    let targets = read_stream(container, names::IDENTIFICATION, |r| r.read_list(records::read_target))?;
    debug!("Decoded {} chromatogram targets", targets.len());
    Ok(targets)
}

/// Decode the edit history
pub fn decode_history(container: &mut Container) -> Result<Vec<EditInformation>, DecodeError> {
    read_stream(container, names::HISTORY, |r| r.read_list(records::read_edit))
}

/// Decode the misc record
pub fn decode_misc(container: &mut Container) -> Result<MiscRecord, DecodeError> {
    read_stream(container, names::MISC, records::read_misc)
}

/// Encode a stream into a fresh buffer
pub fn encode_stream<F>(write: F) -> Result<Vec<u8>, EncodeError>
where
    F: FnOnce(&mut ByteWriter<Vec<u8>>) -> Result<(), CodecError>,
{
    let mut w = ByteWriter::new(Vec::new());
    write(&mut w)?;
    Ok(w.into_inner())
}

/// Encoded scans stream plus the proxy summaries pointing into it
pub struct EncodedScans {
    /// Bytes of the scans stream
    pub scans: Vec<u8>,
    /// Bytes of the scan-proxies stream
    pub proxies: Vec<u8>,
    /// Bytes of the TIC stream
    pub tic: Vec<u8>,
}

/// Encode scans, recording the offset of every record for the proxies stream
pub fn encode_scans(scans: &[Scan], layout: Layout) -> Result<EncodedScans, EncodeError> {
    let mut w = ByteWriter::new(Vec::new());
    let mut summaries = Vec::with_capacity(scans.len());
    w.write_count(scans.len())?;
    for scan in scans {
        let offset = i32::try_from(w.position()).map_err(|_| {
            EncodeError::InvalidData(format!(
                "scan offset {} does not fit the proxy record",
                w.position()
            ))
        })?;
        summaries.push(ProxyRecord::for_scan(offset, scan)?);
        records::write_scan(&mut w, layout, scan)?;
    }
    let proxies = encode_stream(|w| w.write_list(&summaries, records::write_proxy_record))?;
    let tic = encode_stream(|w| {
        records::write_points(w, summaries.iter().map(|s| (s.retention_time, s.total_signal)))
    })?;
    Ok(EncodedScans {
        scans: w.into_inner(),
        proxies,
        tic,
    })
}

/// Encode the baseline as the anchors of its contiguous segments
pub fn encode_baseline(baseline: &BaselineModel) -> Result<Vec<u8>, EncodeError> {
    let anchors = baseline
        .anchors()
        .map_err(|e| EncodeError::InvalidData(format!("baseline: {}", e)))?;
    encode_stream(|w| records::write_points(w, anchors.into_iter()))
}

/// Encode every peak
pub fn encode_peaks(peaks: &[Peak], layout: Layout) -> Result<Vec<u8>, EncodeError> {
    encode_stream(|w| w.write_list(peaks, |w, peak| records::write_peak(w, layout, peak)))
}

/// Encode the method stream
pub fn encode_method(method: &Method) -> Result<Vec<u8>, EncodeError> {
    encode_stream(|w| records::write_method(w, method))
}

/// Encode the area stream
pub fn encode_area(chromatogram: &Chromatogram) -> Result<Vec<u8>, EncodeError> {
    encode_stream(|w| {
        records::write_integrated_area(w, &chromatogram.chromatogram_area)?;
        records::write_integrated_area(w, &chromatogram.background_area)
    })
}

/// Encode chromatogram-level targets
pub fn encode_identification(targets: &[IdentificationTarget]) -> Result<Vec<u8>, EncodeError> {
    encode_stream(|w| w.write_list(targets, records::write_target))
}

/// Encode the edit history
pub fn encode_history(history: &[EditInformation]) -> Result<Vec<u8>, EncodeError> {
    encode_stream(|w| w.write_list(history, records::write_edit))
}

/// Encode the misc record of `chromatogram`
pub fn encode_misc(chromatogram: &Chromatogram) -> Result<Vec<u8>, EncodeError> {
    let misc = MiscRecord {
        date: chromatogram.date,
        misc_info: chromatogram.misc_info.clone(),
        misc_info_separated: chromatogram.misc_info_separated.clone(),
        data_name: chromatogram.data_name.clone(),
        operator: chromatogram.operator.clone(),
    };
    encode_stream(|w| records::write_misc(w, &misc))
}

/// Encode the version marker
pub fn encode_version(version: &str) -> Result<Vec<u8>, EncodeError> {
    encode_stream(|w| w.write_string(version))
}
