use chrono::{DateTime, Utc};

use crate::geodesy;
use crate::types::Trajectory;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Derive per-fix speed and elapsed trip duration over a (possibly
/// truncated) trip window. Everything here is path-local: distances
/// are between consecutive fixes, not from the colony.
///
/// Conventions:
/// - the first fix has speed 0 and duration 0 (no prior point);
/// - a zero or missing time delta makes the speed undefined, which is
///   recorded as missing rather than a silent number;
/// - a placeholder trajectory passes through untouched.
pub fn apply_kinematics(mut trajectory: Trajectory) -> Trajectory {
    if trajectory.is_placeholder() || trajectory.is_empty() {
        return trajectory;
    }

    let len = trajectory.len();

    let timestamps: Vec<Option<DateTime<Utc>>> = trajectory
        .fixes
        .iter()
        .map(|fix| fix.timestamp_utc)
        .collect();
    let latitudes: Vec<Option<f64>> = trajectory.fixes.iter().map(|fix| fix.latitude).collect();
    let longitudes: Vec<Option<f64>> = trajectory.fixes.iter().map(|fix| fix.longitude).collect();

    let step_km = geodesy::step_distances_km(&latitudes, &longitudes);

    let start = timestamps[0];
    let mut speeds: Vec<Option<f64>> = Vec::with_capacity(len);
    let mut durations: Vec<Option<f64>> = Vec::with_capacity(len);

    for idx in 0..len {
        durations.push(match (start, timestamps[idx]) {
            (Some(start), Some(current)) => Some(elapsed_hours(start, current)),
            _ => None,
        });

        if idx == 0 {
            speeds.push(Some(0.0));
            continue;
        }

        let step_h = match (timestamps[idx - 1], timestamps[idx]) {
            (Some(previous), Some(current)) => Some(elapsed_hours(previous, current)),
            _ => None,
        };

        let speed = match (step_km[idx - 1], step_h) {
            (Some(km), Some(hours)) if hours > 0.0 => Some(km / hours),
            _ => None,
        };
        speeds.push(speed);
    }

    for ((fix, speed), duration) in trajectory
        .fixes
        .iter_mut()
        .zip(speeds)
        .zip(durations)
    {
        fix.speed_km_h = speed;
        fix.trip_duration_h = duration;
    }

    trajectory
}

/// Prefix sums of the along-path step distances. Index 0 is zero;
/// once a step is missing every later total is missing too.
pub fn cumulative_path_km(step_km: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut totals = Vec::with_capacity(step_km.len() + 1);
    let mut running = Some(0.0);
    totals.push(running);

    for step in step_km {
        running = match (running, step) {
            (Some(total), Some(step)) => Some(total + step),
            _ => None,
        };
        totals.push(running);
    }

    totals
}

fn elapsed_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::geodesy;
    use crate::types::{Fix, Trajectory};

    fn hourly_fix(hour: u32, lat: f64, lon: f64) -> Fix {
        let ts = NaiveDate::from_ymd_opt(2020, 11, 13)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Fix {
            timestamp_utc: Some(ts.and_utc()),
            latitude: Some(lat),
            longitude: Some(lon),
            longitude_east: Some(lon),
            band_id: Some("90186".to_string()),
            day_of_year: Some(318),
            colony_distance_km: Some(10.0),
            speed_km_h: None,
            trip_duration_h: None,
        }
    }

    fn window(fixes: Vec<Fix>) -> Trajectory {
        Trajectory {
            band_id: "90186".to_string(),
            fixes,
        }
    }

    #[test]
    fn hourly_window_has_unit_duration_steps() {
        let trajectory = window(vec![
            hourly_fix(10, 47.00, -2.0),
            hourly_fix(11, 47.05, -2.0),
            hourly_fix(12, 47.10, -2.0),
        ]);

        let result = apply_kinematics(trajectory);

        let durations: Vec<f64> = result
            .fixes
            .iter()
            .map(|fix| fix.trip_duration_h.unwrap())
            .collect();
        assert_eq!(durations, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn first_fix_speed_is_zero_by_convention() {
        let trajectory = window(vec![hourly_fix(10, 47.0, -2.0), hourly_fix(11, 47.1, -2.0)]);
        let result = apply_kinematics(trajectory);

        assert_eq!(result.fixes[0].speed_km_h, Some(0.0));

        // 0.1 degrees of latitude is roughly 11 km, covered in 1 h.
        let speed = result.fixes[1].speed_km_h.unwrap();
        assert!((speed - 11.1).abs() < 0.2, "speed: {speed} km/h");
    }

    #[test]
    fn duplicate_timestamp_flags_speed_as_missing() {
        let trajectory = window(vec![
            hourly_fix(10, 47.0, -2.0),
            hourly_fix(10, 47.1, -2.0),
            hourly_fix(11, 47.2, -2.0),
        ]);

        let result = apply_kinematics(trajectory);

        assert_eq!(result.fixes[1].speed_km_h, None);
        assert!(result.fixes[2].speed_km_h.is_some());
        // Duration stays defined: the elapsed time is simply zero.
        assert_eq!(result.fixes[1].trip_duration_h, Some(0.0));
    }

    #[test]
    fn single_point_window_is_trivial_not_an_error() {
        let trajectory = window(vec![hourly_fix(10, 47.0, -2.0)]);
        let result = apply_kinematics(trajectory);

        assert_eq!(result.fixes[0].speed_km_h, Some(0.0));
        assert_eq!(result.fixes[0].trip_duration_h, Some(0.0));
    }

    #[test]
    fn placeholder_window_gets_no_kinematics() {
        let trajectory = Trajectory::placeholder("90186");
        let result = apply_kinematics(trajectory);

        assert!(result.is_placeholder());
        assert_eq!(result.fixes[0].speed_km_h, None);
        assert_eq!(result.fixes[0].trip_duration_h, None);
    }

    #[test]
    fn step_sums_reproduce_the_along_path_total() {
        let lats = vec![Some(47.00), Some(47.04), Some(47.09), Some(47.11)];
        let lons = vec![Some(-2.00), Some(-2.03), Some(-2.01), Some(-2.06)];

        let steps = geodesy::step_distances_km(&lats, &lons);
        let totals = cumulative_path_km(&steps);

        let summed: f64 = steps.iter().map(|step| step.unwrap()).sum();
        let last = totals.last().unwrap().unwrap();
        let first = totals.first().unwrap().unwrap();

        assert!((summed - (last - first)).abs() < 1e-9);
    }

    #[test]
    fn missing_step_poisons_later_totals() {
        let steps = vec![Some(1.0), None, Some(2.0)];
        let totals = cumulative_path_km(&steps);

        assert_eq!(totals, vec![Some(0.0), Some(1.0), None, None]);
    }
}
