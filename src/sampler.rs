use log::{info, warn};

/// One decoded frame handed to the sampler: sequential index in the source,
/// presentation timestamp in seconds, and the decoded payload.
#[derive(Debug, Clone)]
pub struct Frame<I> {
    pub index: usize,
    pub timestamp: f64,
    pub image: I,
}

/// Sequential frame supplier with a known native rate and total count.
/// Decoding (and what a "timestamp" means) lives behind this seam, so the
/// sampling loop can be driven by a synthetic source in tests.
pub trait FrameSource {
    type Image;

    fn frame_rate(&self) -> f64;
    fn frame_count(&self) -> usize;
    fn next_frame(&mut self) -> std::io::Result<Option<Frame<Self::Image>>>;
}

/// Outcome of a sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleReport {
    /// Number of frames handed to the sink.
    pub emitted: usize,
    /// Output index of the last emitted frame.
    pub last_index: usize,
    /// `round(original_count / original_rate * target_rate)`.
    pub expected: usize,
}

/// Subsample a frame source down to approximately `target_rate`.
///
/// The first decoded frame is always emitted as output index 0. After that a
/// cursor advances by the fixed step `1/target_rate` on every emission rather
/// than resetting to the frame's timestamp, which bounds cumulative drift
/// instead of letting it accumulate per step. Source exhaustion before the
/// expected count is not an error; the short count is reported.
pub fn sample_frames<S, F>(
    source: &mut S,
    target_rate: f64,
    mut sink: F,
) -> std::io::Result<SampleReport>
where
    S: FrameSource,
    F: FnMut(usize, &S::Image) -> std::io::Result<()>,
{
    let interval = 1.0 / target_rate;
    let expected =
        (source.frame_count() as f64 / source.frame_rate() * target_rate).round() as usize;

    let Some(first) = source.next_frame()? else {
        warn!("frame source was empty, nothing to sample");
        return Ok(SampleReport {
            emitted: 0,
            last_index: 0,
            expected,
        });
    };
    sink(0, &first.image)?;

    let mut next_emit_time = 0.0;
    let mut out_index = 0;
    let mut emitted = 1;

    while let Some(frame) = source.next_frame()? {
        if frame.timestamp - next_emit_time >= interval {
            out_index += 1;
            sink(out_index, &frame.image)?;
            emitted += 1;
            next_emit_time += interval;
        }
    }

    if emitted < expected {
        warn!(
            "frame source exhausted early: emitted {} of {} expected frames",
            emitted, expected
        );
    } else {
        info!("emitted {} frames ({} expected)", emitted, expected);
    }

    Ok(SampleReport {
        emitted,
        last_index: out_index,
        expected,
    })
}

/// Frame source with evenly spaced timestamps, for exercising the sampling
/// loop without a decoder. The payload is the frame's own timestamp, so a
/// sink can observe exactly when each emitted frame was decoded.
pub struct SyntheticSource {
    rate: f64,
    count: usize,
    cursor: usize,
}

impl SyntheticSource {
    pub fn new(rate: f64, count: usize) -> Self {
        Self {
            rate,
            count,
            cursor: 0,
        }
    }
}

impl FrameSource for SyntheticSource {
    type Image = f64;

    fn frame_rate(&self) -> f64 {
        self.rate
    }

    fn frame_count(&self) -> usize {
        self.count
    }

    fn next_frame(&mut self) -> std::io::Result<Option<Frame<f64>>> {
        if self.cursor >= self.count {
            return Ok(None);
        }
        let index = self.cursor;
        self.cursor += 1;
        let timestamp = index as f64 / self.rate;
        Ok(Some(Frame {
            index,
            timestamp,
            image: timestamp,
        }))
    }
}
