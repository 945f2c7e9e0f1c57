//! Tests for the isoline sweep and its filters.

mod common;

use common::{analytic_model, summer_solstice, winter_solstice, AnalyticEphemeris};
use daylen_core::{
    DayLengthModel, DaylenConfig, IsolineScanner, ScanConfig, ScanOutcome, SearchConfig, Season,
    Twilight,
};

fn scanner(model: &DayLengthModel) -> IsolineScanner<'_> {
    IsolineScanner::new(model, SearchConfig::default(), ScanConfig::default())
}

// ============================================================================
// Target sweep tests
// ============================================================================

#[test]
fn test_targets_cover_full_day_in_half_hours() {
    let model = analytic_model(Twilight::Civil);
    let scanner = scanner(&model);

    let down = scanner.targets(Season::LongDayward);
    assert_eq!(down.len(), 49);
    assert_eq!(down[0], 24.0);
    assert_eq!(down[1], 23.5);
    assert_eq!(down[48], 0.0);

    let up = scanner.targets(Season::ShortDayward);
    assert_eq!(up.len(), 49);
    assert_eq!(up[0], 0.0);
    assert_eq!(up[48], 24.0);
}

#[test]
fn test_detailed_scan_attempts_every_target() {
    let model = analytic_model(Twilight::Civil);
    let steps = scanner(&model).scan_detailed(summer_solstice()).unwrap();
    assert_eq!(steps.len(), 49);
    assert_eq!(steps[0].target, 24.0);
}

// ============================================================================
// Summer scan tests
// ============================================================================

#[test]
fn test_summer_first_isoline_is_24h_at_polar_day_edge() {
    let model = analytic_model(Twilight::Civil);
    let isolines = scanner(&model).scan(summer_solstice()).unwrap();

    let first = isolines.first().expect("at least one isoline");
    assert_eq!(first.day_length, 24.0);
    let edge = AnalyticEphemeris::polar_day_edge(summer_solstice(), Twilight::Civil);
    assert!((first.latitude - edge).abs() < 0.1);
    assert_eq!(first.color, ScanConfig::default().end_color);
}

#[test]
fn test_summer_latitudes_descend_with_min_separation() {
    let model = analytic_model(Twilight::Civil);
    let isolines = scanner(&model).scan(summer_solstice()).unwrap();
    assert!(isolines.len() > 3);

    for pair in isolines.windows(2) {
        assert!(pair[1].latitude < pair[0].latitude);
        assert!(pair[0].latitude - pair[1].latitude >= 2.5);
        assert!(pair[1].day_length < pair[0].day_length);
    }
}

#[test]
fn test_summer_short_targets_not_found() {
    let model = analytic_model(Twilight::Civil);
    let steps = scanner(&model).scan_detailed(summer_solstice()).unwrap();

    let zero = steps.last().unwrap();
    assert_eq!(zero.target, 0.0);
    assert_eq!(zero.outcome, ScanOutcome::NotFound);
}

#[test]
fn test_too_close_does_not_move_tracker() {
    let model = analytic_model(Twilight::Civil);
    let steps = scanner(&model).scan_detailed(summer_solstice()).unwrap();

    let mut last_emitted = None;
    for step in &steps {
        match step.outcome {
            ScanOutcome::Emitted(isoline) => last_emitted = Some(isoline.latitude),
            ScanOutcome::TooClose { previous, latitude } => {
                assert_eq!(Some(previous), last_emitted);
                assert!((latitude - previous).abs() < 2.5);
            }
            _ => {}
        }
    }
}

// ============================================================================
// Winter scan tests
// ============================================================================

#[test]
fn test_winter_first_isoline_is_0h_at_polar_night_edge() {
    let model = analytic_model(Twilight::Civil);
    let isolines = scanner(&model).scan(winter_solstice()).unwrap();

    let first = isolines.first().expect("at least one isoline");
    assert_eq!(first.day_length, 0.0);
    let edge = AnalyticEphemeris::polar_night_edge(winter_solstice(), Twilight::Civil);
    assert!((first.latitude - edge).abs() < 0.1);
    assert_eq!(first.color, ScanConfig::default().start_color);

    for pair in isolines.windows(2) {
        assert!(pair[0].latitude - pair[1].latitude >= 2.5);
        assert!(pair[1].day_length > pair[0].day_length);
    }
}

// ============================================================================
// Polar cutoff tests
// ============================================================================

#[test]
fn test_nothing_emitted_beyond_polar_cutoff() {
    let model = analytic_model(Twilight::Civil);
    for date in [summer_solstice(), winter_solstice()] {
        let isolines = scanner(&model).scan(date).unwrap();
        assert!(isolines.iter().all(|i| i.latitude <= 85.0));
    }
}

#[test]
fn test_polar_cutoff_drops_edge_isoline() {
    let model = analytic_model(Twilight::Civil);
    let scan = ScanConfig {
        polar_cutoff: 55.0,
        ..ScanConfig::default()
    };
    let scanner = IsolineScanner::new(&model, SearchConfig::default(), scan);
    let steps = scanner.scan_detailed(summer_solstice()).unwrap();

    assert!(matches!(
        steps[0].outcome,
        ScanOutcome::BeyondPolarCutoff { .. }
    ));
    let isolines = scanner.scan(summer_solstice()).unwrap();
    assert!(isolines.iter().all(|i| i.latitude <= 55.0));
    assert!(!isolines.is_empty());
}

// ============================================================================
// Solar position algorithm scenario
// ============================================================================

#[test]
fn test_spa_summer_scan_starts_with_polar_day_edge() {
    let config = DaylenConfig {
        twilight: Twilight::SunriseSunset,
        ..Default::default()
    };
    let model = DayLengthModel::with_spa(&config);
    let scanner = IsolineScanner::new(&model, config.search, config.scan);

    let isolines = scanner.scan(summer_solstice()).unwrap();
    let first = isolines.first().expect("at least one isoline");
    assert_eq!(first.day_length, 24.0);
    assert!((first.latitude - 66.56).abs() < 1.0, "found {}", first.latitude);

    for pair in isolines.windows(2) {
        assert!(pair[0].latitude - pair[1].latitude >= 2.5);
    }
}
