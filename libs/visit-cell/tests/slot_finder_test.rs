// libs/visit-cell/tests/slot_finder_test.rs

use uuid::Uuid;

use doctor_cell::Doctor;
use shared_models::{NewVisit, VisitLedger};
use shared_utils::test_utils::TestTime;
use shared_utils::ClinicZone;
use visit_cell::services::{top_hours_between, SlotFinder, TimeWindow};

const HOUR: i64 = 3600;

fn window(time: &TestTime, start: i64, end: i64) -> TimeWindow {
    TimeWindow::new(start, end, time.clock.as_ref()).unwrap()
}

fn booked(doctor: &Doctor, start: i64) -> VisitLedger {
    VisitLedger::new(vec![
        NewVisit::new(doctor.id, Uuid::new_v4(), start).into_visit(Uuid::new_v4()),
    ])
}

#[test]
fn half_past_to_next_day_half_past_yields_23_hours() {
    let time = TestTime::default();
    let monday_1030 = time.next_monday_at(10, 30, 0);
    let tuesday_0930 = monday_1030 + 23 * HOUR;

    let hours: Vec<i64> = top_hours_between(&window(&time, monday_1030, tuesday_0930)).collect();

    assert_eq!(hours.len(), 23);
    assert_eq!(hours.first(), Some(&(monday_1030 + 30 * 60)));
    assert_eq!(hours.last(), Some(&(tuesday_0930 - 30 * 60)));
}

#[test]
fn aligned_start_and_end_are_included() {
    let time = TestTime::default();
    let start = time.next_monday_at(9, 0, 0);

    let hours: Vec<i64> = top_hours_between(&window(&time, start, start + 2 * HOUR)).collect();

    assert_eq!(hours, vec![start, start + HOUR, start + 2 * HOUR]);
}

#[test]
fn window_inside_one_hour_is_empty() {
    let time = TestTime::default();
    let start = time.next_monday_at(9, 10, 0);

    assert_eq!(top_hours_between(&window(&time, start, start + 40 * 60)).count(), 0);
}

#[test]
fn top_hours_are_aligned_contiguous_and_inside_window() {
    let time = TestTime::default();
    let start = time.next_monday_at(3, 17, 41);
    let end = start + 50 * HOUR + 1234;
    let window = window(&time, start, end);

    let hours: Vec<i64> = top_hours_between(&window).collect();

    assert!(!hours.is_empty());
    assert!(hours.iter().all(|t| t % HOUR == 0 && *t >= start && *t <= end));
    assert!(hours.windows(2).all(|pair| pair[1] - pair[0] == HOUR));
    assert!(hours[0] - start < HOUR);
    assert!(end - hours[hours.len() - 1] < HOUR);
}

#[test]
fn default_schedule_offers_nine_through_sixteen() {
    let time = TestTime::default();
    let doctor = Doctor::new("Ada", "Moss");
    let midnight = time.next_monday_at(0, 0, 0);
    let finder = SlotFinder::new(ClinicZone::utc());

    let slots = finder.free_slots(&doctor, &window(&time, midnight, midnight + 24 * HOUR), &VisitLedger::default());

    let expected: Vec<i64> = (9..=16).map(|h| midnight + h * HOUR).collect();
    assert_eq!(slots, expected);
}

#[test]
fn booked_hour_is_skipped_and_neighbours_kept() {
    let time = TestTime::default();
    let doctor = Doctor::new("Ada", "Moss");
    let ten = time.next_monday_at(10, 0, 0);
    let finder = SlotFinder::new(ClinicZone::utc());

    let slots = finder.free_slots(&doctor, &window(&time, ten - HOUR, ten + HOUR), &booked(&doctor, ten));

    assert_eq!(slots, vec![ten - HOUR, ten + HOUR]);
}

#[test]
fn visit_starting_mid_hour_blocks_both_touched_slots() {
    let time = TestTime::default();
    let doctor = Doctor::new("Ada", "Moss");
    let ten = time.next_monday_at(10, 0, 0);
    let finder = SlotFinder::new(ClinicZone::utc());

    // Seeded visit at 10:30 covers the end of the 10:00 slot and the start of 11:00.
    let slots = finder.free_slots(
        &doctor,
        &window(&time, ten - HOUR, ten + 2 * HOUR),
        &booked(&doctor, ten + 30 * 60),
    );

    assert_eq!(slots, vec![ten - HOUR, ten + 2 * HOUR]);
}

#[test]
fn free_hour_always_appears_in_results() {
    let time = TestTime::default();
    let doctor = Doctor::new("Ada", "Moss");
    let finder = SlotFinder::new(ClinicZone::utc());
    let zone = ClinicZone::utc();
    let visits = booked(&doctor, time.next_monday_at(13, 0, 0));
    let slot = time.next_monday_at(14, 0, 0);

    assert!((slot..slot + HOUR).all(|t| doctor.is_available_at(t, &zone, &visits)));

    for (before, after) in [(1, 1), (HOUR, 0), (0, HOUR), (5 * HOUR, 7 * HOUR)] {
        let results = finder.find(
            vec![doctor.clone()],
            &window(&time, slot - before, slot + after),
            &visits,
        );
        assert!(results[0].slots.contains(&slot));
    }
}

#[test]
fn doctors_without_slots_are_omitted_in_roster_order() {
    let time = TestTime::default();
    let first = Doctor::new("Ada", "Moss");
    let mut weekend_only = Doctor::new("Bea", "Lark");
    weekend_only.working_days = [chrono::Weekday::Sun].into_iter().collect();
    let third = Doctor::new("Cy", "Reed");
    let finder = SlotFinder::new(ClinicZone::utc());
    let nine = time.next_monday_at(9, 0, 0);

    let results = finder.find(
        vec![first.clone(), weekend_only, third.clone()],
        &window(&time, nine, nine + 2 * HOUR),
        &VisitLedger::default(),
    );

    let ids: Vec<Uuid> = results.iter().map(|r| r.doctor.id).collect();
    assert_eq!(ids, vec![first.id, third.id]);
    assert!(results.iter().all(|r| r.slots == vec![nine, nine + HOUR, nine + 2 * HOUR]));
}
