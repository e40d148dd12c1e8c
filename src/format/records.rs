//! Record codecs shared by every registered container version
//!
//! Versions differ only in which optional record sections they carry; a
//! [`Layout`] switches those sections on or off. Every reader here has a
//! writer that produces exactly the bytes it consumes.

use std::collections::BTreeSet;
use std::io::{Read, Write};

use chrono::{DateTime, Utc};

use crate::codec::{ByteReader, ByteWriter, CodecError};
use crate::model::{
    ComparisonResult, EditInformation, IdentificationTarget, IntegratedArea, IntegrationEntry,
    InternalStandard, Ion, IonTransition, IonTransitionSettings, LibraryInformation, Method, Peak,
    PeakIntensityValues, PeakType, QuantitationEntry, RetentionIndexType, Scan,
};

/// Optional record sections carried by a container version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Spectrum bodies carry a flag plus additional retention indices
    pub additional_retention_indices: bool,
    /// Peaks carry the active-for-analysis flag
    pub peak_active_flag: bool,
    /// Peaks end with a list of internal standards
    pub internal_standards: bool,
    /// The container has a scan-proxies stream
    pub scan_proxies: bool,
}

impl Layout {
    /// Layout of version 1.1.0.0
    pub const V1100: Layout = Layout {
        additional_retention_indices: true,
        peak_active_flag: true,
        internal_standards: true,
        scan_proxies: true,
    };

    /// Layout of version 1.0.0.9
    pub const V1009: Layout = Layout {
        additional_retention_indices: false,
        peak_active_flag: false,
        internal_standards: false,
        scan_proxies: false,
    };
}

/// What record readers need besides the bytes
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    /// Version layout
    pub layout: Layout,
    /// Registry decoded transitions are interned into
    pub transitions: &'a IonTransitionSettings,
}

impl<'a> RecordContext<'a> {
    /// Context for `layout`, interning into `transitions`
    pub fn new(layout: Layout, transitions: &'a IonTransitionSettings) -> Self {
        Self {
            layout,
            transitions,
        }
    }
}

/// Summary record of the scan-proxies stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyRecord {
    /// Offset of the full record in the scans stream
    pub offset: i32,
    /// Retention time
    pub retention_time: i32,
    /// Number of ions
    pub number_of_ions: i32,
    /// Total signal
    pub total_signal: f32,
    /// Retention index
    pub retention_index: f32,
    /// Time segment id
    pub time_segment_id: i32,
    /// Cycle number
    pub cycle_number: i32,
}

impl ProxyRecord {
    /// Summary of `scan` whose full record starts at `offset`
    pub fn for_scan(offset: i32, scan: &Scan) -> Result<Self, CodecError> {
        let number_of_ions = i32::try_from(scan.ion_count())
            .map_err(|_| CodecError::LengthOverflow(scan.ion_count()))?;
        Ok(Self {
            offset,
            retention_time: scan.retention_time,
            number_of_ions,
            total_signal: scan.total_signal(),
            retention_index: scan.retention_index,
            time_segment_id: scan.time_segment_id,
            cycle_number: scan.cycle_number,
        })
    }
}

/// Run-level fields of the misc stream
#[derive(Debug, Clone, PartialEq)]
pub struct MiscRecord {
    /// Acquisition date
    pub date: DateTime<Utc>,
    /// Free-text information
    pub misc_info: String,
    /// Separated free-text information
    pub misc_info_separated: String,
    /// Data name
    pub data_name: String,
    /// Operator
    pub operator: String,
}

fn read_date<R: Read>(r: &mut ByteReader<R>) -> Result<DateTime<Utc>, CodecError> {
    let millis = r.read_i64()?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| CodecError::InvalidValue(format!("timestamp {} out of range", millis)))
}

fn write_date<W: Write>(w: &mut ByteWriter<W>, date: &DateTime<Utc>) -> Result<(), CodecError> {
    w.write_i64(date.timestamp_millis())
}

// --- method ---

/// Read the method record
pub fn read_method<R: Read>(r: &mut ByteReader<R>) -> Result<Method, CodecError> {
    Ok(Method {
        instrument_name: r.read_string()?,
        ion_source: r.read_string()?,
        sampling_rate: r.read_f64()?,
        solvent_delay: r.read_i32()?,
        source_heater: r.read_f64()?,
        stop_mode: r.read_string()?,
        stop_time: r.read_i32()?,
        time_filter_peak_width: r.read_i32()?,
    })
}

/// Write the method record
pub fn write_method<W: Write>(w: &mut ByteWriter<W>, method: &Method) -> Result<(), CodecError> {
    w.write_string(&method.instrument_name)?;
    w.write_string(&method.ion_source)?;
    w.write_f64(method.sampling_rate)?;
    w.write_i32(method.solvent_delay)?;
    w.write_f64(method.source_heater)?;
    w.write_string(&method.stop_mode)?;
    w.write_i32(method.stop_time)?;
    w.write_i32(method.time_filter_peak_width)
}

// --- ions ---

/// Read one ion, interning its transition
pub fn read_ion<R: Read>(r: &mut ByteReader<R>, ctx: &RecordContext<'_>) -> Result<Ion, CodecError> {
    let mz = r.read_f64()?;
    let abundance = r.read_f32()?;
    if r.read_i32()? == 0 {
        return Ok(Ion::new(mz, abundance));
    }
    let transition = IonTransition {
        compound_name: r.read_string()?,
        filter1_first_ion: r.read_f64()?,
        filter1_last_ion: r.read_f64()?,
        filter3_first_ion: r.read_f64()?,
        filter3_last_ion: r.read_f64()?,
        collision_energy: r.read_f64()?,
        filter1_resolution: r.read_f64()?,
        filter3_resolution: r.read_f64()?,
        transition_group: r.read_i32()?,
    };
    let dwell = r.read_i32()?;
    Ok(Ion::with_transition(
        mz,
        abundance,
        ctx.transitions.get_or_insert(transition),
        dwell,
    ))
}

/// Write one ion
pub fn write_ion<W: Write>(w: &mut ByteWriter<W>, ion: &Ion) -> Result<(), CodecError> {
    w.write_f64(ion.mz)?;
    w.write_f32(ion.abundance)?;
    match &ion.transition {
        None => w.write_i32(0),
        Some(assignment) => {
            let t = &assignment.transition;
            w.write_i32(1)?;
            w.write_string(&t.compound_name)?;
            w.write_f64(t.filter1_first_ion)?;
            w.write_f64(t.filter1_last_ion)?;
            w.write_f64(t.filter3_first_ion)?;
            w.write_f64(t.filter3_last_ion)?;
            w.write_f64(t.collision_energy)?;
            w.write_f64(t.filter1_resolution)?;
            w.write_f64(t.filter3_resolution)?;
            w.write_i32(t.transition_group)?;
            w.write_i32(assignment.dwell)
        }
    }
}

// --- identification ---

/// Read one identification target
pub fn read_target<R: Read>(r: &mut ByteReader<R>) -> Result<IdentificationTarget, CodecError> {
    let identifier = r.read_string()?;
    let manually_verified = r.read_bool()?;
    let cas_number = r.read_string()?;
    let comments = r.read_string()?;
    let reference_identifier = r.read_string()?;
    let miscellaneous = r.read_string()?;
    let database = r.read_string()?;
    let contributor = r.read_string()?;
    let name = r.read_string()?;
    let synonyms: BTreeSet<String> = r.read_list(|r| r.read_string())?.into_iter().collect();
    let formula = r.read_string()?;
    let smiles = r.read_string()?;
    let inchi = r.read_string()?;
    let molecular_weight = r.read_f64()?;
    let comparison = ComparisonResult {
        match_factor: r.read_f32()?,
        match_factor_direct: r.read_f32()?,
        reverse_match_factor: r.read_f32()?,
        reverse_match_factor_direct: r.read_f32()?,
        probability: r.read_f32()?,
        is_match: r.read_bool()?,
    };
    Ok(IdentificationTarget {
        identifier,
        manually_verified,
        library: LibraryInformation {
            name,
            cas_number,
            comments,
            reference_identifier,
            miscellaneous,
            database,
            contributor,
            synonyms,
            formula,
            smiles,
            inchi,
            molecular_weight,
        },
        comparison,
    })
}

/// Write one identification target
pub fn write_target<W: Write>(
    w: &mut ByteWriter<W>,
    target: &IdentificationTarget,
) -> Result<(), CodecError> {
    let library = &target.library;
    let comparison = &target.comparison;
    w.write_string(&target.identifier)?;
    w.write_bool(target.manually_verified)?;
    w.write_string(&library.cas_number)?;
    w.write_string(&library.comments)?;
    w.write_string(&library.reference_identifier)?;
    w.write_string(&library.miscellaneous)?;
    w.write_string(&library.database)?;
    w.write_string(&library.contributor)?;
    w.write_string(&library.name)?;
    w.write_list(&library.synonyms, |w, s| w.write_string(s))?;
    w.write_string(&library.formula)?;
    w.write_string(&library.smiles)?;
    w.write_string(&library.inchi)?;
    w.write_f64(library.molecular_weight)?;
    w.write_f32(comparison.match_factor)?;
    w.write_f32(comparison.match_factor_direct)?;
    w.write_f32(comparison.reverse_match_factor)?;
    w.write_f32(comparison.reverse_match_factor_direct)?;
    w.write_f32(comparison.probability)?;
    w.write_bool(comparison.is_match)
}

// --- scans ---

/// Read the spectrum body (everything after the scan header) into `scan`
pub fn read_spectrum_body<R: Read>(
    r: &mut ByteReader<R>,
    ctx: &RecordContext<'_>,
    scan: &mut Scan,
) -> Result<(), CodecError> {
    scan.retention_time = r.read_i32()?;
    scan.retention_time_column1 = r.read_i32()?;
    scan.retention_time_column2 = r.read_i32()?;
    scan.retention_index = r.read_f32()?;
    scan.additional_retention_indices = if ctx.layout.additional_retention_indices && r.read_bool()? {
        Some(r.read_list(|r| {
            let index_type = r
                .read_string()?
                .parse::<RetentionIndexType>()
                .map_err(CodecError::InvalidValue)?;
            Ok((index_type, r.read_f32()?))
        })?)
    } else {
        None
    };
    scan.time_segment_id = r.read_i32()?;
    scan.cycle_number = r.read_i32()?;
    scan.ions = r.read_list(|r| read_ion(r, ctx))?;
    scan.targets = r.read_list(read_target)?;
    Ok(())
}

/// Write the spectrum body of `scan`
///
/// Additional retention indices are dropped when the layout has no room for them.
pub fn write_spectrum_body<W: Write>(
    w: &mut ByteWriter<W>,
    layout: Layout,
    scan: &Scan,
) -> Result<(), CodecError> {
    w.write_i32(scan.retention_time)?;
    w.write_i32(scan.retention_time_column1)?;
    w.write_i32(scan.retention_time_column2)?;
    w.write_f32(scan.retention_index)?;
    if layout.additional_retention_indices {
        match &scan.additional_retention_indices {
            Some(indices) => {
                w.write_bool(true)?;
                w.write_list(indices, |w, (index_type, value)| {
                    w.write_string(index_type.as_str())?;
                    w.write_f32(*value)
                })?;
            }
            None => w.write_bool(false)?,
        }
    }
    w.write_i32(scan.time_segment_id)?;
    w.write_i32(scan.cycle_number)?;
    w.write_list(&scan.ions, write_ion)?;
    w.write_list(&scan.targets, write_target)
}

/// Read a full scan record (header and body)
pub fn read_scan<R: Read>(r: &mut ByteReader<R>, ctx: &RecordContext<'_>) -> Result<Scan, CodecError> {
    let mut scan = Scan {
        mass_spectrometer: r.read_i16()?,
        mass_spectrum_type: r.read_i16()?,
        precursor_ion: r.read_f64()?,
        ..Default::default()
    };
    read_spectrum_body(r, ctx, &mut scan)?;
    Ok(scan)
}

/// Write a full scan record
pub fn write_scan<W: Write>(w: &mut ByteWriter<W>, layout: Layout, scan: &Scan) -> Result<(), CodecError> {
    w.write_i16(scan.mass_spectrometer)?;
    w.write_i16(scan.mass_spectrum_type)?;
    w.write_f64(scan.precursor_ion)?;
    write_spectrum_body(w, layout, scan)
}

/// Read one scan-proxy summary
pub fn read_proxy_record<R: Read>(r: &mut ByteReader<R>) -> Result<ProxyRecord, CodecError> {
    Ok(ProxyRecord {
        offset: r.read_i32()?,
        retention_time: r.read_i32()?,
        number_of_ions: r.read_i32()?,
        total_signal: r.read_f32()?,
        retention_index: r.read_f32()?,
        time_segment_id: r.read_i32()?,
        cycle_number: r.read_i32()?,
    })
}

/// Write one scan-proxy summary
pub fn write_proxy_record<W: Write>(w: &mut ByteWriter<W>, record: &ProxyRecord) -> Result<(), CodecError> {
    w.write_i32(record.offset)?;
    w.write_i32(record.retention_time)?;
    w.write_i32(record.number_of_ions)?;
    w.write_f32(record.total_signal)?;
    w.write_f32(record.retention_index)?;
    w.write_i32(record.time_segment_id)?;
    w.write_i32(record.cycle_number)
}

/// Read a (retention time, value) pair, as used by TIC, baseline and intensity lists
pub fn read_point<R: Read>(r: &mut ByteReader<R>) -> Result<(i32, f32), CodecError> {
    Ok((r.read_i32()?, r.read_f32()?))
}

/// Write a count followed by (retention time, value) pairs
pub fn write_points<W: Write>(
    w: &mut ByteWriter<W>,
    points: impl ExactSizeIterator<Item = (i32, f32)>,
) -> Result<(), CodecError> {
    w.write_count(points.len())?;
    for (retention_time, value) in points {
        w.write_i32(retention_time)?;
        w.write_f32(value)?;
    }
    Ok(())
}

// --- peaks ---

/// Read one integration entry
pub fn read_integration_entry<R: Read>(r: &mut ByteReader<R>) -> Result<IntegrationEntry, CodecError> {
    Ok(IntegrationEntry::new(r.read_f64()?, r.read_f64()?))
}

/// Write one integration entry
pub fn write_integration_entry<W: Write>(
    w: &mut ByteWriter<W>,
    entry: &IntegrationEntry,
) -> Result<(), CodecError> {
    w.write_f64(entry.ion)?;
    w.write_f64(entry.integrated_area)
}

fn read_quantitation_entry<R: Read>(r: &mut ByteReader<R>) -> Result<QuantitationEntry, CodecError> {
    Ok(QuantitationEntry {
        name: r.read_string()?,
        chemical_class: r.read_string()?,
        concentration: r.read_f64()?,
        concentration_unit: r.read_string()?,
        area: r.read_f64()?,
        calibration_method: r.read_string()?,
        used_cross_zero: r.read_bool()?,
        description: r.read_string()?,
        ion: if r.read_bool()? { Some(r.read_f64()?) } else { None },
    })
}

fn write_quantitation_entry<W: Write>(
    w: &mut ByteWriter<W>,
    entry: &QuantitationEntry,
) -> Result<(), CodecError> {
    w.write_string(&entry.name)?;
    w.write_string(&entry.chemical_class)?;
    w.write_f64(entry.concentration)?;
    w.write_string(&entry.concentration_unit)?;
    w.write_f64(entry.area)?;
    w.write_string(&entry.calibration_method)?;
    w.write_bool(entry.used_cross_zero)?;
    w.write_string(&entry.description)?;
    match entry.ion {
        Some(ion) => {
            w.write_bool(true)?;
            w.write_f64(ion)
        }
        None => w.write_bool(false),
    }
}

fn read_internal_standard<R: Read>(r: &mut ByteReader<R>) -> Result<InternalStandard, CodecError> {
    Ok(InternalStandard {
        name: r.read_string()?,
        concentration: r.read_f64()?,
        concentration_unit: r.read_string()?,
        response_factor: r.read_f64()?,
        chemical_class: r.read_string()?,
    })
}

fn write_internal_standard<W: Write>(
    w: &mut ByteWriter<W>,
    standard: &InternalStandard,
) -> Result<(), CodecError> {
    w.write_string(&standard.name)?;
    w.write_f64(standard.concentration)?;
    w.write_string(&standard.concentration_unit)?;
    w.write_f64(standard.response_factor)?;
    w.write_string(&standard.chemical_class)
}

/// Read one peak record; the intensity profile is normalized once after reading
pub fn read_peak<R: Read>(r: &mut ByteReader<R>, ctx: &RecordContext<'_>) -> Result<Peak, CodecError> {
    let mut peak = read_stored_peak(r, ctx)?;
    peak.intensity_values.normalize();
    Ok(peak)
}

/// Read one peak record keeping the intensity profile as stored
pub fn read_stored_peak<R: Read>(r: &mut ByteReader<R>, ctx: &RecordContext<'_>) -> Result<Peak, CodecError> {
    let detector_description = r.read_string()?;
    let quantifier_description = r.read_string()?;
    let active_for_analysis = if ctx.layout.peak_active_flag {
        r.read_bool()?
    } else {
        true
    };
    let integrator_description = r.read_string()?;
    let model_description = r.read_string()?;
    let peak_type = r
        .read_string()?
        .parse::<PeakType>()
        .map_err(CodecError::InvalidValue)?;
    let suggested_number_of_components = r.read_i32()?;
    let start_background_abundance = r.read_f32()?;
    let stop_background_abundance = r.read_f32()?;
    let peak_maximum = read_scan(r, ctx)?;

    let intensity_values: PeakIntensityValues = r.read_list(read_point)?.into_iter().collect();

    let integration_entries = r.read_list(read_integration_entry)?;
    let targets = r.read_list(read_target)?;
    let quantitation_entries = r.read_list(read_quantitation_entry)?;
    let optimized_mass_spectrum = if r.read_bool()? {
        let mut spectrum = Scan::default();
        read_spectrum_body(r, ctx, &mut spectrum)?;
        Some(spectrum)
    } else {
        None
    };
    let internal_standards = if ctx.layout.internal_standards {
        r.read_list(read_internal_standard)?
    } else {
        Vec::new()
    };

    Ok(Peak {
        detector_description,
        quantifier_description,
        active_for_analysis,
        integrator_description,
        model_description,
        peak_type,
        suggested_number_of_components,
        start_background_abundance,
        stop_background_abundance,
        peak_maximum,
        optimized_mass_spectrum,
        intensity_values,
        integration_entries,
        targets,
        quantitation_entries,
        internal_standards,
    })
}

/// Write one peak record
pub fn write_peak<W: Write>(w: &mut ByteWriter<W>, layout: Layout, peak: &Peak) -> Result<(), CodecError> {
    w.write_string(&peak.detector_description)?;
    w.write_string(&peak.quantifier_description)?;
    if layout.peak_active_flag {
        w.write_bool(peak.active_for_analysis)?;
    }
    w.write_string(&peak.integrator_description)?;
    w.write_string(&peak.model_description)?;
    w.write_string(peak.peak_type.as_str())?;
    w.write_i32(peak.suggested_number_of_components)?;
    w.write_f32(peak.start_background_abundance)?;
    w.write_f32(peak.stop_background_abundance)?;
    write_scan(w, layout, &peak.peak_maximum)?;
    write_points(w, peak.intensity_values.iter())?;
    w.write_list(&peak.integration_entries, write_integration_entry)?;
    w.write_list(&peak.targets, write_target)?;
    w.write_list(&peak.quantitation_entries, write_quantitation_entry)?;
    match &peak.optimized_mass_spectrum {
        Some(spectrum) => {
            w.write_bool(true)?;
            write_spectrum_body(w, layout, spectrum)?;
        }
        None => w.write_bool(false)?,
    }
    if layout.internal_standards {
        w.write_list(&peak.internal_standards, write_internal_standard)?;
    }
    Ok(())
}

// --- area, history, misc ---

/// Read one integrated area (integrator description and entries)
pub fn read_integrated_area<R: Read>(r: &mut ByteReader<R>) -> Result<IntegratedArea, CodecError> {
    Ok(IntegratedArea {
        integrator_description: r.read_string()?,
        entries: r.read_list(read_integration_entry)?,
    })
}

/// Write one integrated area
pub fn write_integrated_area<W: Write>(
    w: &mut ByteWriter<W>,
    area: &IntegratedArea,
) -> Result<(), CodecError> {
    w.write_string(&area.integrator_description)?;
    w.write_list(&area.entries, write_integration_entry)
}

/// Read one edit-history entry
pub fn read_edit<R: Read>(r: &mut ByteReader<R>) -> Result<EditInformation, CodecError> {
    let date = read_date(r)?;
    Ok(EditInformation::new(date, r.read_string()?))
}

/// Write one edit-history entry
pub fn write_edit<W: Write>(w: &mut ByteWriter<W>, edit: &EditInformation) -> Result<(), CodecError> {
    write_date(w, &edit.date)?;
    w.write_string(&edit.description)
}

/// Read the misc record
pub fn read_misc<R: Read>(r: &mut ByteReader<R>) -> Result<MiscRecord, CodecError> {
    Ok(MiscRecord {
        date: read_date(r)?,
        misc_info: r.read_string()?,
        misc_info_separated: r.read_string()?,
        data_name: r.read_string()?,
        operator: r.read_string()?,
    })
}

/// Write the misc record
pub fn write_misc<W: Write>(w: &mut ByteWriter<W>, misc: &MiscRecord) -> Result<(), CodecError> {
    write_date(w, &misc.date)?;
    w.write_string(&misc.misc_info)?;
    w.write_string(&misc.misc_info_separated)?;
    w.write_string(&misc.data_name)?;
    w.write_string(&misc.operator)
}
