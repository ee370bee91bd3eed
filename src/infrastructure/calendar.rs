use crate::domain::installment::Competence;
use crate::domain::ports::DisbursementCalendar;
use crate::error::{FeeError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;

/// A disbursement calendar loaded from a fixed table, usually one fiscal year.
///
/// Every entry must fall in the month after its competence.
#[derive(Debug, Default, Clone)]
pub struct CalendarTable {
    entries: HashMap<Competence, NaiveDate>,
}

impl CalendarTable {
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Competence, NaiveDate)>,
    {
        let mut table = HashMap::new();
        for (competence, date) in entries {
            if !competence.is_disbursed_on(date) {
                return Err(FeeError::ValidationError(format!(
                    "disbursement {} for competence {} is not in the following month",
                    date, competence
                )));
            }
            if table.insert(competence, date).is_some() {
                return Err(FeeError::ValidationError(format!(
                    "duplicate calendar entry for competence {}",
                    competence
                )));
            }
        }
        Ok(Self { entries: table })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DisbursementCalendar for CalendarTable {
    fn disbursement_date(&self, competence: Competence) -> Option<NaiveDate> {
        self.entries.get(&competence).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lookup() {
        let jan = Competence::new(1, 2024).unwrap();
        let table = CalendarTable::from_entries(vec![(jan, date(2024, 2, 26))]).unwrap();
        assert_eq!(table.disbursement_date(jan), Some(date(2024, 2, 26)));
        assert_eq!(table.disbursement_date(Competence::new(2, 2024).unwrap()), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rejects_date_outside_following_month() {
        let jan = Competence::new(1, 2024).unwrap();
        assert!(matches!(
            CalendarTable::from_entries(vec![(jan, date(2024, 1, 26))]),
            Err(FeeError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_competence() {
        let dec = Competence::new(12, 2024).unwrap();
        let result = CalendarTable::from_entries(vec![
            (dec, date(2025, 1, 27)),
            (dec, date(2025, 1, 28)),
        ]);
        assert!(matches!(result, Err(FeeError::ValidationError(_))));
    }
}
