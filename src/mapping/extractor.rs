//! Collector Segment Extraction
//!
//! Run-length encodes a located binary curve into maximal runs of one class.
//! Values other than exactly 0 or 1 terminate the current run and are
//! skipped; the number skipped is reported so the caller can surface it.

use crate::types::{
    ClassifiedPoint, CollectorClass, LocatedSample, Point3, Sample, Segment, Trajectory,
};

/// Result of one encoding pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub segments: Vec<Segment>,
    /// Samples skipped because their value was not 0 or 1
    pub malformed: usize,
}

/// Stateless run-length encoder for located curve samples.
pub struct SegmentExtractor;

impl SegmentExtractor {
    /// Interpolate every sample through the trajectory, then encode.
    ///
    /// Fewer than two stations or no samples yields an empty extraction.
    pub fn extract(trajectory: &Trajectory, samples: &[Sample]) -> Extraction {
        if !trajectory.is_usable() {
            return Extraction::default();
        }
        Self::encode(&Self::locate(trajectory, samples))
    }

    /// Attach trajectory positions to samples with the clamping interpolation rule.
    pub fn locate(trajectory: &Trajectory, samples: &[Sample]) -> Vec<LocatedSample> {
        samples
            .iter()
            .filter_map(|s| {
                trajectory.interpolate(s.depth).map(|position| LocatedSample {
                    md: s.depth,
                    value: s.value,
                    position,
                })
            })
            .collect()
    }

    /// Group consecutive samples of equal class into segments.
    ///
    /// Samples are taken in the given order; nothing is sorted.
    pub fn encode(samples: &[LocatedSample]) -> Extraction {
        let mut segments = Vec::new();
        let mut malformed = 0;
        let mut run: Option<Run> = None;

        for sample in samples {
            let Some(class) = CollectorClass::from_value(sample.value) else {
                malformed += 1;
                if let Some(open) = run.take() {
                    segments.push(open.close());
                }
                continue;
            };

            match run.as_mut() {
                Some(open) if open.class == class => open.extend(sample),
                _ => {
                    if let Some(open) = run.replace(Run::start(class, sample)) {
                        segments.push(open.close());
                    }
                }
            }
        }

        if let Some(open) = run {
            segments.push(open.close());
        }

        Extraction {
            segments,
            malformed,
        }
    }

    /// One classified point per well-formed sample, for profile projection.
    pub fn classify(well_id: &str, samples: &[LocatedSample]) -> Vec<ClassifiedPoint> {
        samples
            .iter()
            .filter_map(|s| {
                CollectorClass::from_value(s.value).map(|class| ClassifiedPoint {
                    well_id: well_id.to_string(),
                    position: s.position,
                    class,
                })
            })
            .collect()
    }
}

/// An open run while scanning.
struct Run {
    class: CollectorClass,
    md_start: f64,
    md_end: f64,
    start: Point3,
    end: Point3,
    count: usize,
}

impl Run {
    fn start(class: CollectorClass, sample: &LocatedSample) -> Self {
        Self {
            class,
            md_start: sample.md,
            md_end: sample.md,
            start: sample.position,
            end: sample.position,
            count: 1,
        }
    }

    fn extend(&mut self, sample: &LocatedSample) {
        self.md_end = sample.md;
        self.end = sample.position;
        self.count += 1;
    }

    fn close(self) -> Segment {
        Segment {
            class: self.class,
            md_start: self.md_start,
            md_end: self.md_end,
            start: self.start,
            end: self.end,
            sample_count: self.count,
        }
    }
}
