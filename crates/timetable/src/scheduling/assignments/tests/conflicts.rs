use super::common::*;
use crate::scheduling::assignments::domain::AssignmentId;
use crate::scheduling::assignments::{
    check_conflict, ConflictChecker, ConflictPolicy, ConflictReason,
};
use crate::scheduling::calendar::{Block, TimeSlot};

fn ids(raw: &[&str]) -> Vec<AssignmentId> {
    raw.iter().map(|id| AssignmentId(id.to_string())).collect()
}

#[test]
fn room_already_booked_in_any_block_is_rejected() {
    let existing = vec![assignment("a1", "l1", Block::One, "501", TimeSlot::Evening)];

    let rejection = check_conflict(
        &proposal("l2", "501", TimeSlot::Evening, Block::Two),
        &existing,
        None,
    )
    .expect_err("room is taken");

    assert_eq!(rejection.reason, ConflictReason::RoomTimeConflict);
    assert_eq!(rejection.conflicting, ids(&["a1"]));
    assert!(rejection.message.contains("501"));
}

#[test]
fn lecturer_teaching_elsewhere_in_the_slot_is_rejected() {
    let existing = vec![assignment("a1", "l1", Block::One, "501", TimeSlot::Evening)];

    let rejection = check_conflict(
        &proposal("l1", "602", TimeSlot::Evening, Block::One),
        &existing,
        None,
    )
    .expect_err("lecturer is busy");

    assert_eq!(rejection.reason, ConflictReason::LecturerTimeConflict);
    assert_eq!(rejection.conflicting, ids(&["a1"]));
}

#[test]
fn fourth_assignment_in_a_block_is_rejected() {
    let existing = full_block_for_l1();

    let rejection = check_conflict(
        &proposal("l1", "504", TimeSlot::WeekendMorning, Block::One),
        &existing,
        None,
    )
    .expect_err("lecturer is at capacity");

    assert_eq!(rejection.reason, ConflictReason::LecturerOverloaded);
    assert_eq!(rejection.conflicting, ids(&["a1", "a2", "a3"]));
}

#[test]
fn other_blocks_do_not_count_toward_the_load() {
    let existing = full_block_for_l1();

    check_conflict(
        &proposal("l1", "504", TimeSlot::WeekendMorning, Block::Two),
        &existing,
        None,
    )
    .expect("block 2 is empty for l1");
}

#[test]
fn editing_the_third_assignment_in_place_is_allowed() {
    let existing = full_block_for_l1();
    let third = AssignmentId("a3".to_string());

    check_conflict(
        &proposal("l1", "701", TimeSlot::Evening, Block::One),
        &existing,
        Some(&third),
    )
    .expect("moving a3 to another room keeps the load at three");
}

#[test]
fn resubmitting_current_values_never_conflicts_with_itself() {
    let existing = full_block_for_l1();

    for record in &existing {
        let unchanged = proposal(
            &record.lecturer.id.0,
            &record.room.to_string(),
            record.time_slot,
            record.block,
        );
        if let Err(rejection) = check_conflict(&unchanged, &existing, Some(&record.id)) {
            panic!("{} conflicted with itself: {rejection}", record.id.0);
        }
    }
}

#[test]
fn room_clash_is_reported_before_lecturer_and_load() {
    let mut existing = full_block_for_l1();
    existing.push(assignment("b1", "l2", Block::One, "601", TimeSlot::WeekendEvening));

    let rejection = check_conflict(
        &proposal("l1", "601", TimeSlot::WeekendEvening, Block::One),
        &existing,
        None,
    )
    .expect_err("all three checks fail");

    assert_eq!(rejection.reason, ConflictReason::RoomTimeConflict);
}

#[test]
fn lecturer_clash_is_reported_before_load() {
    let existing = full_block_for_l1();

    let rejection = check_conflict(
        &proposal("l1", "801", TimeSlot::Evening, Block::One),
        &existing,
        None,
    )
    .expect_err("busy and overloaded");

    assert_eq!(rejection.reason, ConflictReason::LecturerTimeConflict);
}

#[test]
fn cross_listed_siblings_do_not_block_an_unchanged_edit() {
    let existing = vec![
        cross_listed("a1", "s1", "l1", Block::One, "501", TimeSlot::Evening),
        cross_listed("a2", "s1", "l1", Block::One, "501", TimeSlot::Evening),
    ];

    check_conflict(
        &proposal("l1", "501", TimeSlot::Evening, Block::One),
        &existing,
        Some(&AssignmentId("a1".to_string())),
    )
    .expect("sibling a2 is the same meeting");
}

#[test]
fn moving_one_sibling_away_still_clashes_with_the_lecturer_meeting() {
    let existing = vec![
        cross_listed("a1", "s1", "l1", Block::One, "501", TimeSlot::Evening),
        cross_listed("a2", "s1", "l1", Block::One, "501", TimeSlot::Evening),
    ];

    let rejection = check_conflict(
        &proposal("l1", "502", TimeSlot::Evening, Block::One),
        &existing,
        Some(&AssignmentId("a1".to_string())),
    )
    .expect_err("lecturer would be in two rooms at once");

    assert_eq!(rejection.reason, ConflictReason::LecturerTimeConflict);
    assert_eq!(rejection.conflicting, ids(&["a2"]));
}

#[test]
fn multi_code_submission_counts_every_record_against_the_load() {
    let existing = vec![
        assignment("a1", "l1", Block::One, "501", TimeSlot::DayMorning),
        assignment("a2", "l1", Block::One, "502", TimeSlot::DayAfternoon),
    ];

    let single = proposal("l1", "503", TimeSlot::Evening, Block::One);
    check_conflict(&single, &existing, None).expect("one more fits");

    let rejection = check_conflict(&single.clone().with_records(2), &existing, None)
        .expect_err("two more would make four");
    assert_eq!(rejection.reason, ConflictReason::LecturerOverloaded);
}

#[test]
fn unbounded_policy_skips_the_load_check() {
    let checker = ConflictChecker::new(ConflictPolicy::unbounded());

    checker
        .check(
            &proposal("l1", "504", TimeSlot::WeekendMorning, Block::One),
            &full_block_for_l1(),
            None,
        )
        .expect("no block cap");
}

#[test]
fn custom_cap_is_honoured() {
    let checker = ConflictChecker::new(ConflictPolicy::with_max_block_load(1));
    let existing = vec![assignment("a1", "l1", Block::Two, "501", TimeSlot::Evening)];

    let rejection = checker
        .check(
            &proposal("l1", "601", TimeSlot::DayMorning, Block::Two),
            &existing,
            None,
        )
        .expect_err("cap of one");
    assert_eq!(rejection.reason, ConflictReason::LecturerOverloaded);
    assert!(rejection.message.contains("limit 1"));
}

#[test]
fn empty_snapshot_accepts_anything() {
    check_conflict(&proposal("l1", "501", TimeSlot::Evening, Block::One), &[], None)
        .expect("nothing to clash with");
}

#[test]
fn oversized_record_count_is_rejected_instead_of_wrapping() {
    let existing = vec![assignment("a1", "l1", Block::One, "501", TimeSlot::DayMorning)];

    let rejection = check_conflict(
        &proposal("l1", "502", TimeSlot::Evening, Block::One).with_records(usize::MAX),
        &existing,
        None,
    )
    .expect_err("load cannot fit");
    assert_eq!(rejection.reason, ConflictReason::LecturerOverloaded);
}
