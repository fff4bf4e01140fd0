use crate::infra::{parse_block, parse_room, parse_time_slot};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use timetable::config::AppConfig;
use timetable::error::AppError;
use timetable::scheduling::assignments::{
    audit, Assignment, AssignmentCandidate, AssignmentId, AssignmentWriter, ConflictChecker,
    ConflictPolicy, CourseRef, LecturerId, LecturerRef, MemoryAssignmentStore, Proposal,
    SaveOutcome, Violation,
};
use timetable::scheduling::calendar::{Block, Room, TimeSlot};
use timetable::scheduling::cohort::resolve_cohort;
use timetable::scheduling::import::assignments_from_path;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// CSV snapshot of the current assignments
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Lecturer id the assignment is for
    #[arg(long)]
    pub(crate) lecturer: String,
    /// Room token such as 501
    #[arg(long, value_parser = parse_room)]
    pub(crate) room: Room,
    /// Time slot code such as Eve or Wknd-Morn
    #[arg(long, value_parser = parse_time_slot)]
    pub(crate) time_slot: TimeSlot,
    /// Block number or label
    #[arg(long, value_parser = parse_block)]
    pub(crate) block: Block,
    /// Assignment id being edited, excluded from the comparison
    #[arg(long)]
    pub(crate) exclude: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// CSV snapshot of the current assignments
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct CohortArgs {
    /// Registration number, e.g. VU-BCS-2309-0412-DAY
    pub(crate) registration: String,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let snapshot = assignments_from_path(&args.snapshot)?;
    let checker = ConflictChecker::new(config.scheduling.conflict_policy());

    let proposal = Proposal::new(LecturerId(args.lecturer), args.room, args.time_slot, args.block);
    let exclude = args.exclude.map(AssignmentId);
    check_against(&checker, &proposal, &snapshot, exclude.as_ref())
}

/// Print the checker's decision; a rejection is returned so the process exits non-zero.
fn check_against(
    checker: &ConflictChecker,
    proposal: &Proposal,
    snapshot: &[Assignment],
    exclude: Option<&AssignmentId>,
) -> Result<(), AppError> {
    match checker.check(proposal, snapshot, exclude) {
        Ok(()) => {
            println!(
                "OK: {} may take room {} for {} in {}",
                proposal.lecturer.0,
                proposal.room,
                proposal.time_slot.label(),
                proposal.block
            );
            Ok(())
        }
        Err(rejection) => {
            let ids: Vec<&str> = rejection.conflicting.iter().map(|id| id.0.as_str()).collect();
            println!("  conflicting: {}", ids.join(", "));
            Err(rejection.into())
        }
    }
}

pub(crate) fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let snapshot = assignments_from_path(&args.snapshot)?;
    let violations = audit(&snapshot, &config.scheduling.conflict_policy());

    println!(
        "Audited {} assignment(s) with a block cap of {}",
        snapshot.len(),
        config.scheduling.max_block_load
    );
    render_violations(&violations);
    Ok(())
}

pub(crate) fn run_cohort(args: CohortArgs) -> Result<(), AppError> {
    match resolve_cohort(&args.registration) {
        Some(cohort) if !cohort.intake_month.is_empty() => {
            println!("Course:  {}", cohort.course);
            println!("Intake:  {} {}", cohort.intake_month, cohort.intake_year);
            println!("Period:  {}", cohort.period);
            println!("Cohort:  {}", cohort.cohort().label());
        }
        Some(_) => println!("'{}' has an invalid intake month", args.registration),
        None => println!("'{}' is not a registration number", args.registration),
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let store = MemoryAssignmentStore::new();
    let writer = AssignmentWriter::new(Arc::new(store), ConflictPolicy::default());

    println!("Timetable assignment demo");
    println!("\nAmina takes Database Systems (two codes) on Block 1 evenings in room 501");
    let created = report(
        "create",
        writer.save(
            &demo_candidate("l1", &["BCS2101", "BIT2101"], Block::One, "501", TimeSlot::Evening),
            None,
        ),
    );

    println!("\nGrace tries room 501 on Block 2 evenings");
    report(
        "create",
        writer.save(
            &demo_candidate("l2", &["BBA1101"], Block::Two, "501", TimeSlot::Evening),
            None,
        ),
    );

    println!("\nAmina tries room 602 in the same evening slot");
    report(
        "create",
        writer.save(
            &demo_candidate("l1", &["BCS2203"], Block::One, "602", TimeSlot::Evening),
            None,
        ),
    );

    println!("\nAmina picks up a morning class, then tries a fourth Block 1 slot");
    report(
        "create",
        writer.save(
            &demo_candidate("l1", &["BCS2203"], Block::One, "602", TimeSlot::DayMorning),
            None,
        ),
    );
    report(
        "create",
        writer.save(
            &demo_candidate("l1", &["BCS2204"], Block::One, "701", TimeSlot::WeekendMorning),
            None,
        ),
    );

    if let Some(first) = created.first() {
        println!("\n{} is re-saved with its current values", first.course_code);
        report(
            "update",
            writer.save(
                &demo_candidate(
                    "l1",
                    &[first.course_code.as_str()],
                    first.block,
                    &first.room.to_string(),
                    first.time_slot,
                ),
                Some(&first.id),
            ),
        );

        println!(
            "\n{} alone tries room 503 while its cross-listed sibling stays in {}",
            first.course_code, first.room
        );
        report(
            "update",
            writer.save(
                &demo_candidate(
                    "l1",
                    &[first.course_code.as_str()],
                    first.block,
                    "503",
                    first.time_slot,
                ),
                Some(&first.id),
            ),
        );
    }

    println!("\nAudit of the final store");
    render_violations(&writer.audit()?);

    println!("\nCohort lookup for VU-BCS-2309-0412-DAY");
    run_cohort(CohortArgs {
        registration: "VU-BCS-2309-0412-DAY".to_string(),
    })
}

fn demo_candidate(
    lecturer: &str,
    codes: &[&str],
    block: Block,
    room: &str,
    time_slot: TimeSlot,
) -> AssignmentCandidate {
    let name = if lecturer == "l1" { "Amina Nakato" } else { "Grace Atim" };
    AssignmentCandidate {
        lecturer: Some(LecturerRef {
            id: LecturerId(lecturer.to_string()),
            name: name.to_string(),
        }),
        faculty: Some("Computing".to_string()),
        module: Some("Demo Module".to_string()),
        courses: codes
            .iter()
            .map(|code| CourseRef {
                name: String::new(),
                code: code.to_string(),
            })
            .collect(),
        block: Some(block),
        room: room.parse().ok(),
        time_slot: Some(time_slot),
    }
}

fn report<E: std::fmt::Display>(
    action: &str,
    result: Result<SaveOutcome, E>,
) -> Vec<Assignment> {
    match result {
        Ok(outcome) => {
            for record in &outcome.written {
                println!(
                    "  {action} ok: {} {} room {} {} {}",
                    record.id.0,
                    record.course_code,
                    record.room,
                    record.time_slot.label(),
                    record.block
                );
            }
            outcome.written
        }
        Err(error) => {
            println!("  {action} rejected: {error}");
            Vec::new()
        }
    }
}

fn render_violations(violations: &[Violation]) {
    if violations.is_empty() {
        println!("  no violations");
        return;
    }
    for violation in violations {
        let ids: Vec<&str> = violation.assignments.iter().map(|id| id.0.as_str()).collect();
        println!(
            "  {}: {} [{}]",
            violation.reason,
            violation.detail,
            ids.join(", ")
        );
    }
}
