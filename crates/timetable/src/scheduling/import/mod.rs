//! Load an assignment snapshot from a CSV export, for offline checks and audits.
//!
//! Expected headers: `id, lecturer_id, lecturer_name, faculty, course, course_code, block, room,
//! time_slot`, plus an optional `section`. Rows without a section are treated as independent
//! meetings.

mod parser;

use std::io::Read;
use std::path::Path;

use super::assignments::{Assignment, AssignmentId, LecturerId, LecturerRef, SectionId};
use super::calendar::CalendarParseError;
use parser::SnapshotRow;

#[derive(Debug)]
pub enum SnapshotImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row {
        line: usize,
        source: CalendarParseError,
    },
}

impl std::fmt::Display for SnapshotImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotImportError::Io(err) => write!(f, "failed to read snapshot: {}", err),
            SnapshotImportError::Csv(err) => write!(f, "invalid snapshot CSV data: {}", err),
            SnapshotImportError::Row { line, source } => {
                write!(f, "invalid snapshot row {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for SnapshotImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotImportError::Io(err) => Some(err),
            SnapshotImportError::Csv(err) => Some(err),
            SnapshotImportError::Row { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for SnapshotImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SnapshotImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub fn assignments_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Assignment>, SnapshotImportError> {
    let file = std::fs::File::open(path)?;
    assignments_from_reader(file)
}

pub fn assignments_from_reader<R: Read>(reader: R) -> Result<Vec<Assignment>, SnapshotImportError> {
    parser::parse_rows(reader)?
        .into_iter()
        .enumerate()
        // header is line 1
        .map(|(index, row)| {
            into_assignment(row).map_err(|source| SnapshotImportError::Row {
                line: index + 2,
                source,
            })
        })
        .collect()
}

fn into_assignment(row: SnapshotRow) -> Result<Assignment, CalendarParseError> {
    let block = row.block.parse()?;
    let room = row.room.parse()?;
    let time_slot = row.time_slot.parse()?;
    let section = row
        .section
        .unwrap_or_else(|| format!("row-{}", row.id));

    Ok(Assignment {
        id: AssignmentId(row.id),
        section: SectionId(section),
        lecturer: LecturerRef {
            id: LecturerId(row.lecturer_id),
            name: row.lecturer_name,
        },
        faculty: row.faculty,
        course: row.course,
        course_code: row.course_code,
        block,
        room,
        time_slot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::calendar::{Block, TimeSlot};
    use std::io::Cursor;

    const HEADER: &str =
        "id,section,lecturer_id,lecturer_name,faculty,course,course_code,block,room,time_slot\n";

    #[test]
    fn reads_rows_with_and_without_sections() {
        let csv = format!(
            "{HEADER}\
             a1,s1,l1,Amina Nakato,Computing,Databases,BCS2101,Block 1,501,Eve\n\
             a2,s1,l1,Amina Nakato,Computing,Databases,BIT2101,Block 1,501,Eve\n\
             a3, ,l2,Peter Okello,Business,Finance,BBA1101,block 2, 602 ,Wknd-Morn\n"
        );

        let assignments = assignments_from_reader(Cursor::new(csv)).expect("import snapshot");
        assert_eq!(assignments.len(), 3);
        assert_eq!(assignments[0].section, assignments[1].section);
        assert_eq!(assignments[2].section, SectionId("row-a3".to_string()));
        assert_eq!(assignments[2].block, Block::Two);
        assert_eq!(assignments[2].room.to_string(), "602");
        assert_eq!(assignments[2].time_slot, TimeSlot::WeekendMorning);
    }

    #[test]
    fn section_column_is_optional() {
        let csv = "id,lecturer_id,lecturer_name,faculty,course,course_code,block,room,time_slot\n\
                   a1,l1,Amina,Computing,Databases,BCS2101,Block 3,801,Day-Morning\n";

        let assignments = assignments_from_reader(Cursor::new(csv)).expect("import snapshot");
        assert_eq!(assignments[0].section, SectionId("row-a1".to_string()));
    }

    #[test]
    fn reports_line_of_bad_calendar_token() {
        let csv = format!(
            "{HEADER}\
             a1,s1,l1,Amina,Computing,Databases,BCS2101,Block 1,501,Eve\n\
             a2,s2,l1,Amina,Computing,Databases,BCS2101,Block 1,909,Eve\n"
        );

        let error = assignments_from_reader(Cursor::new(csv)).expect_err("bad room");
        match error {
            SnapshotImportError::Row { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(source, CalendarParseError::Room(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = assignments_from_path("/nonexistent/snapshot.csv").expect_err("no file");
        assert!(matches!(error, SnapshotImportError::Io(_)));
    }
}
