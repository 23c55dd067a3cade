//! Human-readable labels for route summaries

/// Separator between via place names
pub const VIA_SEPARATOR: &str = " → ";

/// Place name used when a coordinate cannot be named
pub const UNKNOWN_LOCALITY: &str = "Unknown";

/// Format a duration as `"H hr M min"`, or `"M min"` under an hour.
///
/// Hours and minutes are truncated, not rounded. Negative input is
/// treated as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(minutes: f64) -> String {
    let minutes = if minutes.is_finite() { minutes.max(0.0) } else { 0.0 };
    let hours = (minutes / 60.0).floor() as u64;
    let rest = (minutes % 60.0).floor() as u64;

    if hours >= 1 {
        format!("{hours} hr {rest} min")
    } else {
        format!("{rest} min")
    }
}

/// Format a distance with one fraction digit, e.g. `"462.3 km"`
pub fn format_distance(km: f64) -> String {
    format!("{km:.1} km")
}

/// Average speed in km/h, `None` when the duration is zero
pub fn average_speed_kmph(distance_km: f64, duration_minutes: f64) -> Option<f64> {
    (duration_minutes > 0.0).then(|| distance_km * 60.0 / duration_minutes)
}

/// Drop entries equal to their immediate predecessor
pub fn collapse_consecutive_duplicates(names: Vec<String>) -> Vec<String> {
    let mut names = names;
    names.dedup();
    names
}

/// Join place names with an arrow, `None` when there are none
pub fn join_via(names: &[String]) -> Option<String> {
    (!names.is_empty()).then(|| names.join(VIA_SEPARATOR))
}

/// The one-line summary shown above the map
pub fn info_line(distance_label: &str, duration_label: &str, via_label: Option<&str>) -> String {
    let mut line = format!("📏 Distance: {distance_label} | 🕓 Estimated Travel Time: {duration_label}");
    if let Some(via) = via_label {
        line.push_str(&format!(" | 🛣️ Via: {via}"));
    }
    line
}

/// Tooltip attached to the route polyline
pub fn route_tooltip(distance_label: &str, speed_kmph: Option<f64>) -> String {
    match speed_kmph {
        Some(speed) => format!("🛣 {distance_label} | 🚀 {speed:.1} km/h"),
        None => format!("🛣 {distance_label}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_with_hours() {
        assert_eq!(format_duration(125.4), "2 hr 5 min");
        assert_eq!(format_duration(60.0), "1 hr 0 min");
    }

    #[test]
    fn duration_under_an_hour() {
        assert_eq!(format_duration(47.9), "47 min");
        assert_eq!(format_duration(59.99), "59 min");
    }

    #[test]
    fn zero_and_negative_duration() {
        assert_eq!(format_duration(0.0), "0 min");
        assert_eq!(format_duration(-3.0), "0 min");
        assert_eq!(format_duration(f64::NAN), "0 min");
    }

    #[test]
    fn distance_has_one_fraction_digit() {
        assert_eq!(format_distance(462.34), "462.3 km");
        assert_eq!(format_distance(0.0), "0.0 km");
        assert_eq!(format_distance(12.0), "12.0 km");
    }

    #[test]
    fn speed() {
        let speed = average_speed_kmph(120.0, 90.0).unwrap();
        assert!((speed - 80.0).abs() < 1e-9);
        assert!(average_speed_kmph(120.0, 0.0).is_none());
    }

    #[test]
    fn collapse_keeps_non_adjacent_repeats() {
        let names = ["Salem", "Salem", "Erode", "Erode", "Salem"]
            .map(String::from)
            .to_vec();
        assert_eq!(
            collapse_consecutive_duplicates(names),
            vec!["Salem", "Erode", "Salem"]
        );
    }

    #[test]
    fn join() {
        let names = ["Villupuram", "Trichy"].map(String::from);
        assert_eq!(join_via(&names).as_deref(), Some("Villupuram → Trichy"));
        assert!(join_via(&[]).is_none());
    }

    #[test]
    fn info_line_with_and_without_via() {
        assert_eq!(
            info_line("462.3 km", "7 hr 42 min", None),
            "📏 Distance: 462.3 km | 🕓 Estimated Travel Time: 7 hr 42 min"
        );
        assert_eq!(
            info_line("462.3 km", "7 hr 42 min", Some("Trichy")),
            "📏 Distance: 462.3 km | 🕓 Estimated Travel Time: 7 hr 42 min | 🛣️ Via: Trichy"
        );
    }

    #[test]
    fn tooltip() {
        assert_eq!(
            route_tooltip("462.3 km", Some(60.04)),
            "🛣 462.3 km | 🚀 60.0 km/h"
        );
        assert_eq!(route_tooltip("0.0 km", None), "🛣 0.0 km");
    }
}
