// libs/visit-cell/tests/time_window_test.rs

use assert_matches::assert_matches;

use shared_utils::FixedClock;
use shared_utils::test_utils::REFERENCE_NOW;
use visit_cell::models::TimeWindowError;
use visit_cell::services::TimeWindow;

fn clock() -> FixedClock {
    FixedClock::new(REFERENCE_NOW)
}

#[test]
fn valid_window_keeps_its_bounds() {
    let window = TimeWindow::new(REFERENCE_NOW + 1, REFERENCE_NOW + 7200, &clock()).unwrap();

    assert_eq!(window.start(), REFERENCE_NOW + 1);
    assert_eq!(window.end(), REFERENCE_NOW + 7200);
    assert!(window.start() < window.end());
}

#[test]
fn equal_bounds_are_always_rejected() {
    for start in [REFERENCE_NOW + 1, REFERENCE_NOW + 3600, 9_999_999_999] {
        assert_matches!(
            TimeWindow::new(start, start, &clock()),
            Err(TimeWindowError::StartNotBeforeEnd { .. })
        );
    }
}

#[test]
fn reversed_bounds_are_rejected() {
    assert_matches!(
        TimeWindow::new(REFERENCE_NOW + 7200, REFERENCE_NOW + 3600, &clock()),
        Err(TimeWindowError::StartNotBeforeEnd { .. })
    );
}

#[test]
fn start_at_now_is_not_future() {
    assert_matches!(
        TimeWindow::new(REFERENCE_NOW, REFERENCE_NOW + 3600, &clock()),
        Err(TimeWindowError::StartNotInFuture { .. })
    );
}

#[test]
fn past_start_is_rejected_even_with_future_end() {
    assert_matches!(
        TimeWindow::new(REFERENCE_NOW - 3600, REFERENCE_NOW + 3600, &clock()),
        Err(TimeWindowError::StartNotInFuture { .. })
    );
}

#[test]
fn millisecond_bounds_are_rejected() {
    let start_ms = (REFERENCE_NOW + 3600) * 1000;
    assert_matches!(
        TimeWindow::new(start_ms, start_ms + 3_600_000, &clock()),
        Err(TimeWindowError::NotEpochSeconds { .. })
    );
}

#[test]
fn eleven_digit_end_is_rejected() {
    assert_matches!(
        TimeWindow::new(REFERENCE_NOW + 3600, 10_000_000_000, &clock()),
        Err(TimeWindowError::NotEpochSeconds { .. })
    );
}

#[test]
fn largest_ten_digit_end_is_accepted() {
    assert!(TimeWindow::new(REFERENCE_NOW + 3600, 9_999_999_999, &clock()).is_ok());
}

#[test]
fn validity_follows_the_injected_clock() {
    let clock = clock();
    let start = REFERENCE_NOW + 60;
    assert!(TimeWindow::new(start, start + 3600, &clock).is_ok());

    clock.advance(60);
    assert_matches!(
        TimeWindow::new(start, start + 3600, &clock),
        Err(TimeWindowError::StartNotInFuture { .. })
    );
}
