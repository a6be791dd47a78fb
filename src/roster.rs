use std::io::Read;

use csv::ReaderBuilder;
use serde::Deserialize;

use crate::error::GatewayError;
use crate::model::SubjectRecord;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(alias = "avgGrade", alias = "grade")]
    avg_grade: f64,
    attendance: f64,
}

/// Reads a `name,avgGrade,attendance` roster with a header row. Rows carry
/// no per-subject breakdown.
pub fn load_roster<R: Read>(reader: R) -> Result<Vec<SubjectRecord>, GatewayError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut students = Vec::new();

    for (line, result) in rdr.deserialize::<RosterRow>().enumerate() {
        let row = result?;
        let student = SubjectRecord {
            name: row.name,
            avg_grade: row.avg_grade,
            attendance: row.attendance,
            subjects: Vec::new(),
        };
        student.validate().map_err(|err| GatewayError::Roster {
            reason: format!("row {}: {err}", line + 2),
        })?;
        students.push(student);
    }

    if students.is_empty() {
        return Err(GatewayError::Roster {
            reason: "no valid student data found".to_string(),
        });
    }

    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_with_whitespace() {
        let csv = "name,avgGrade,attendance\nJohn Doe, 88.5, 92\nJane Smith,64,71.5\n";
        let students = load_roster(csv.as_bytes()).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].avg_grade, 88.5);
        assert_eq!(students[1].name, "Jane Smith");
        assert!(students[1].subjects.is_empty());
    }

    #[test]
    fn rejects_out_of_range_row_with_line_number() {
        let csv = "name,avgGrade,attendance\nJohn,88,92\nJane,140,70\n";
        let err = load_roster(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn rejects_non_numeric_and_empty_input() {
        assert!(load_roster("name,avgGrade,attendance\nJohn,high,92\n".as_bytes()).is_err());
        assert!(load_roster("name,avgGrade,attendance\n".as_bytes()).is_err());
    }
}
