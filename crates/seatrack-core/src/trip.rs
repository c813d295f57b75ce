use crate::types::Trajectory;

/// Locate the trip window: the inclusive index range from the first
/// point at least `threshold_km` from the colony through the point
/// after the last such crossing, so the first return-leg fix is kept.
/// The trailing index is clamped when the last crossing is the final
/// point. Points inside the range that dip back below the threshold
/// are part of the window (single enclosing span, never segmented
/// into sub-trips).
///
/// Sequences of zero or one point never produce a window.
pub fn find_trip_window(
    distances: &[Option<f64>],
    threshold_km: f64,
) -> Option<(usize, usize)> {
    if distances.len() <= 1 {
        return None;
    }

    let mut first = None;
    let mut last = None;

    for (idx, distance) in distances.iter().enumerate() {
        if let Some(distance) = distance {
            if *distance >= threshold_km {
                if first.is_none() {
                    first = Some(idx);
                }
                last = Some(idx);
            }
        }
    }

    let last = (last? + 1).min(distances.len() - 1);
    Some((first?, last))
}

/// Truncate the trajectory to its trip window, or collapse it to the
/// single all-missing placeholder row when the bird never leaves the
/// threshold radius.
pub fn extract_trip(trajectory: Trajectory, threshold_km: f64) -> Trajectory {
    let distances: Vec<Option<f64>> = trajectory
        .fixes
        .iter()
        .map(|fix| fix.colony_distance_km)
        .collect();

    match find_trip_window(&distances, threshold_km) {
        Some((first, last)) => {
            let fixes = trajectory
                .fixes
                .into_iter()
                .skip(first)
                .take(last - first + 1)
                .collect();
            Trajectory {
                band_id: trajectory.band_id,
                fixes,
            }
        }
        None => Trajectory::placeholder(trajectory.band_id),
    }
}
