use crate::error::{ConvertError, DriftAxis};
use crate::types::{Detection, FrameLabels, Keypoint, Track};

/// Maximum tolerated disagreement between the accumulated interpolation state
/// and a keyframe's actual geometry. Exceeding it means the incremental
/// arithmetic is wrong, not that the input is merely noisy.
pub const DRIFT_TOLERANCE: f64 = 1e-5;

// Accumulated interpolation state in percentage units, center-anchored.
#[derive(Debug, Clone, Copy)]
struct BoxState {
    cx: f64,
    cy: f64,
    width: f64,
    height: f64,
}

impl BoxState {
    // Corner coordinates to center coordinates, once per keypoint pair.
    fn from_keypoint(kp: &Keypoint) -> Self {
        Self {
            cx: kp.x + kp.width / 2.0,
            cy: kp.y + kp.height / 2.0,
            width: kp.width,
            height: kp.height,
        }
    }
}

/// Expand one track's keyframes into one detection per covered frame.
///
/// For each consecutive keypoint pair, geometry is advanced incrementally by
/// per-frame deltas over the half-open frame range `[start, end)`. The center
/// update is `cx += dx + dw/2`: the extra half-delta compensates for the
/// concurrently changing box size, so the accumulated center lands exactly on
/// the next keypoint's center. After each pair the accumulated state is
/// checked against the end keypoint within [`DRIFT_TOLERANCE`]. The final
/// keypoint is never an interpolation source; it is emitted once, from the
/// accumulated state, at its own frame.
pub fn interpolate_track(
    track_index: usize,
    track: &Track,
    labels: &mut FrameLabels,
) -> Result<(), ConvertError> {
    let Some(first) = track.keypoints.first() else {
        return Err(ConvertError::EmptyTrack { track: track_index });
    };

    let mut state = BoxState::from_keypoint(first);
    let mut last_frame = first.frame;

    for (pair, window) in track.keypoints.windows(2).enumerate() {
        let (start, end) = (&window[0], &window[1]);
        state = BoxState::from_keypoint(start);

        let n = (end.frame - start.frame) as f64;
        let dx = (end.x - start.x) / n;
        let dy = (end.y - start.y) / n;
        let dw = (end.width - start.width) / n;
        let dh = (end.height - start.height) / n;

        for frame in start.frame..end.frame {
            emit(labels, frame, track, &state)?;
            state.cx += dx + dw / 2.0;
            state.cy += dy + dh / 2.0;
            state.width += dw;
            state.height += dh;
        }

        check_drift(track_index, pair, &state, end)?;
        last_frame = end.frame;
    }

    // Terminal keyframe: emit the accumulated state at its own frame, no
    // interpolation past it. A single-keypoint track reaches here with the
    // start state untouched and emits exactly one detection set.
    emit(labels, last_frame, track, &state)?;

    Ok(())
}

fn emit(
    labels: &mut FrameLabels,
    frame: usize,
    track: &Track,
    state: &BoxState,
) -> Result<(), ConvertError> {
    for &label_index in &track.label_indices {
        labels.push(
            frame,
            Detection {
                label_index,
                cx: state.cx / 100.0,
                cy: state.cy / 100.0,
                width: state.width / 100.0,
                height: state.height / 100.0,
            },
        )?;
    }
    Ok(())
}

fn check_drift(
    track: usize,
    pair: usize,
    state: &BoxState,
    end: &Keypoint,
) -> Result<(), ConvertError> {
    let checks = [
        (DriftAxis::X, state.cx - (end.x + end.width / 2.0)),
        (DriftAxis::Y, state.cy - (end.y + end.height / 2.0)),
        (DriftAxis::Width, state.width - end.width),
        (DriftAxis::Height, state.height - end.height),
    ];
    for (axis, delta) in checks {
        if delta.abs() > DRIFT_TOLERANCE {
            return Err(ConvertError::GeometryDrift {
                track,
                pair,
                axis,
                delta,
            });
        }
    }
    Ok(())
}

/// Run every track of an annotation through the engine, strictly one at a
/// time, in result order.
pub fn interpolate_tracks(
    tracks: &[Track],
    labels: &mut FrameLabels,
) -> Result<(), ConvertError> {
    for (track_index, track) in tracks.iter().enumerate() {
        interpolate_track(track_index, track, labels)?;
    }
    Ok(())
}
