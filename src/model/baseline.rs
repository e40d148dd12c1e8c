use serde::Serialize;

/// Errors raised when building or flattening a baseline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BaselineError {
    /// Segment ends before it starts
    #[error("segment {start}..{stop} is reversed")]
    Reversed {
        /// Start retention time
        start: i32,
        /// Stop retention time
        stop: i32,
    },

    /// Segment overlaps one already in the model
    #[error("segment {start}..{stop} overlaps existing segment {existing_start}..{existing_stop}")]
    Overlap {
        /// Start of the rejected segment
        start: i32,
        /// Stop of the rejected segment
        stop: i32,
        /// Start of the existing segment
        existing_start: i32,
        /// Stop of the existing segment
        existing_stop: i32,
    },

    /// Anchors are not strictly increasing in retention time
    #[error("anchor at {current} does not follow anchor at {previous}")]
    Unordered {
        /// Retention time of the earlier anchor
        previous: i32,
        /// Retention time of the offending anchor
        current: i32,
    },

    /// Consecutive segments do not share an endpoint
    #[error("baseline is not contiguous at segment {index}")]
    Discontinuous {
        /// Index of the segment that does not start where its predecessor stops
        index: usize,
    },
}

/// Linear background between two (retention time, abundance) endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaselineSegment {
    /// Start retention time
    pub start_retention_time: i32,
    /// Stop retention time
    pub stop_retention_time: i32,
    /// Background abundance at the start
    pub start_background_abundance: f32,
    /// Background abundance at the stop
    pub stop_background_abundance: f32,
}

impl BaselineSegment {
    /// New segment
    pub fn new(
        start_retention_time: i32,
        stop_retention_time: i32,
        start_background_abundance: f32,
        stop_background_abundance: f32,
    ) -> Self {
        Self {
            start_retention_time,
            stop_retention_time,
            start_background_abundance,
            stop_background_abundance,
        }
    }

    /// True if `retention_time` lies within the closed interval
    pub fn contains(&self, retention_time: i32) -> bool {
        self.start_retention_time <= retention_time && retention_time <= self.stop_retention_time
    }

    /// Interpolated background abundance; endpoints are returned exactly
    pub fn abundance_at(&self, retention_time: i32) -> f32 {
        if retention_time == self.start_retention_time {
            return self.start_background_abundance;
        }
        if retention_time == self.stop_retention_time {
            return self.stop_background_abundance;
        }
        let width = f64::from(self.stop_retention_time) - f64::from(self.start_retention_time);
        let fraction = (f64::from(retention_time) - f64::from(self.start_retention_time)) / width;
        let delta = f64::from(self.stop_background_abundance)
            - f64::from(self.start_background_abundance);
        (f64::from(self.start_background_abundance) + delta * fraction) as f32
    }

    fn overlaps(&self, other: &BaselineSegment) -> bool {
        self.start_retention_time < other.stop_retention_time
            && other.start_retention_time < self.stop_retention_time
    }
}

/// Piecewise-linear background model under the chromatographic signal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaselineModel {
    segments: Vec<BaselineSegment>,
}

impl BaselineModel {
    /// Empty baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a baseline from N anchors as N−1 contiguous segments
    ///
    /// Anchors come from a container that was written without overlapping
    /// segments, so they are trusted as-is unless `validate` is set, in which
    /// case they must be strictly increasing in retention time.
    pub fn from_anchors(anchors: &[(i32, f32)], validate: bool) -> Result<Self, BaselineError> {
        let mut model = Self {
            segments: Vec::with_capacity(anchors.len().saturating_sub(1)),
        };
        for pair in anchors.windows(2) {
            let (start, start_abundance) = pair[0];
            let (stop, stop_abundance) = pair[1];
            if validate && stop <= start {
                return Err(BaselineError::Unordered {
                    previous: start,
                    current: stop,
                });
            }
            model.add_segment(
                BaselineSegment::new(start, stop, start_abundance, stop_abundance),
                validate,
            )?;
        }
        Ok(model)
    }

    /// Append a segment
    ///
    /// Without `validate` the segment is appended unchecked. With `validate`
    /// reversed or overlapping segments are rejected.
    pub fn add_segment(&mut self, segment: BaselineSegment, validate: bool) -> Result<(), BaselineError> {
        if validate {
            if segment.stop_retention_time < segment.start_retention_time {
                return Err(BaselineError::Reversed {
                    start: segment.start_retention_time,
                    stop: segment.stop_retention_time,
                });
            }
            if let Some(existing) = self.segments.iter().find(|s| s.overlaps(&segment)) {
                return Err(BaselineError::Overlap {
                    start: segment.start_retention_time,
                    stop: segment.stop_retention_time,
                    existing_start: existing.start_retention_time,
                    existing_stop: existing.stop_retention_time,
                });
            }
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Segments in insertion order
    pub fn segments(&self) -> &[BaselineSegment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if the model has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flatten back into anchors: the first start, then every stop
    pub fn anchors(&self) -> Result<Vec<(i32, f32)>, BaselineError> {
        let Some(first) = self.segments.first() else {
            return Ok(Vec::new());
        };
        let mut anchors = Vec::with_capacity(self.segments.len() + 1);
        anchors.push((first.start_retention_time, first.start_background_abundance));
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                let previous = &self.segments[index - 1];
                if previous.stop_retention_time != segment.start_retention_time
                    || previous.stop_background_abundance.to_bits()
                        != segment.start_background_abundance.to_bits()
                {
                    return Err(BaselineError::Discontinuous { index });
                }
            }
            anchors.push((segment.stop_retention_time, segment.stop_background_abundance));
        }
        Ok(anchors)
    }

    /// True if every segment starts where its predecessor stops
    pub fn is_contiguous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|w| w[0].stop_retention_time == w[1].start_retention_time)
    }

    /// Background abundance at `retention_time`, 0 where no segment covers it
    pub fn background_abundance(&self, retention_time: i32) -> f32 {
        self.segments
            .iter()
            .find(|s| s.contains(retention_time))
            .map(|s| s.abundance_at(retention_time))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_become_contiguous_segments() {
        let anchors = [(100, 5.0), (200, 7.0), (300, 6.0), (400, 6.5)];
        let model = BaselineModel::from_anchors(&anchors, false).unwrap();
        assert_eq!(model.len(), anchors.len() - 1);
        for w in model.segments().windows(2) {
            assert_eq!(w[0].stop_retention_time, w[1].start_retention_time);
        }
        assert_eq!(model.anchors().unwrap(), anchors.to_vec());
    }

    #[test]
    fn test_single_or_no_anchor_gives_empty_model() {
        assert!(BaselineModel::from_anchors(&[], false).unwrap().is_empty());
        assert!(BaselineModel::from_anchors(&[(10, 1.0)], false).unwrap().is_empty());
    }

    #[test]
    fn test_trusting_path_accepts_unordered_anchors() {
        let anchors = [(300, 1.0), (200, 2.0)];
        let model = BaselineModel::from_anchors(&anchors, false).unwrap();
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_validating_path_rejects_unordered_anchors() {
        let anchors = [(100, 1.0), (300, 1.0), (200, 2.0)];
        let err = BaselineModel::from_anchors(&anchors, true).unwrap_err();
        assert_eq!(
            err,
            BaselineError::Unordered {
                previous: 300,
                current: 200
            }
        );
    }

    #[test]
    fn test_validating_add_rejects_overlap() {
        let mut model = BaselineModel::new();
        model
            .add_segment(BaselineSegment::new(0, 100, 1.0, 1.0), true)
            .unwrap();
        let err = model
            .add_segment(BaselineSegment::new(50, 150, 1.0, 1.0), true)
            .unwrap_err();
        assert!(matches!(err, BaselineError::Overlap { .. }));
        // Touching endpoints is not an overlap
        model
            .add_segment(BaselineSegment::new(100, 150, 1.0, 2.0), true)
            .unwrap();
    }

    #[test]
    fn test_gap_cannot_be_flattened() {
        let mut model = BaselineModel::new();
        model
            .add_segment(BaselineSegment::new(0, 100, 1.0, 1.0), false)
            .unwrap();
        model
            .add_segment(BaselineSegment::new(200, 300, 1.0, 1.0), false)
            .unwrap();
        assert!(!model.is_contiguous());
        assert_eq!(
            model.anchors().unwrap_err(),
            BaselineError::Discontinuous { index: 1 }
        );
    }

    #[test]
    fn test_background_interpolation() {
        let model = BaselineModel::from_anchors(&[(0, 0.0), (100, 100.0)], false).unwrap();
        assert_eq!(model.background_abundance(0), 0.0);
        assert_eq!(model.background_abundance(25), 25.0);
        assert_eq!(model.background_abundance(100), 100.0);
        assert_eq!(model.background_abundance(101), 0.0);
    }
}
