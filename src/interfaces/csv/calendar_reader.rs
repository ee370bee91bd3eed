use crate::domain::installment::Competence;
use crate::error::Result;
use crate::infrastructure::calendar::CalendarTable;
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct CalendarRow {
    competence: Competence,
    payment_date: NaiveDate,
}

/// Loads a disbursement calendar from CSV with header `competence, payment_date`.
/// Any bad row fails the whole load.
pub fn read_calendar<R: Read>(source: R) -> Result<CalendarTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut entries = Vec::new();
    for row in reader.deserialize::<CalendarRow>() {
        let row = row?;
        entries.push((row.competence, row.payment_date));
    }
    CalendarTable::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::DisbursementCalendar;
    use crate::error::FeeError;

    #[test]
    fn test_read_calendar() {
        let data = "competence, payment_date\n01/2024, 2024-02-26\n12/2024, 2025-01-27";
        let table = read_calendar(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.disbursement_date(Competence::new(12, 2024).unwrap()),
            NaiveDate::from_ymd_opt(2025, 1, 27)
        );
    }

    #[test]
    fn test_read_calendar_bad_row_fails() {
        let data = "competence, payment_date\n01/2024, not-a-date";
        assert!(matches!(
            read_calendar(data.as_bytes()),
            Err(FeeError::CsvError(_))
        ));
    }

    #[test]
    fn test_read_calendar_wrong_month_fails() {
        let data = "competence, payment_date\n01/2024, 2024-05-26";
        assert!(matches!(
            read_calendar(data.as_bytes()),
            Err(FeeError::ValidationError(_))
        ));
    }
}
