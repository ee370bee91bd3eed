use crate::error::FeeError;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The month and year a benefit payment covers, written `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Competence {
    pub year: i32,
    pub month: u32,
}

impl Competence {
    pub fn new(month: u32, year: i32) -> Result<Self, FeeError> {
        if !(1..=12).contains(&month) {
            return Err(FeeError::ValidationError(format!(
                "competence month {} out of range",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The month in which a payment for this competence is disbursed.
    pub fn disbursement_month(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }

    /// Whether `date` falls in the disbursement month of this competence.
    pub fn is_disbursed_on(&self, date: NaiveDate) -> bool {
        (date.year(), date.month()) == self.disbursement_month()
    }
}

impl FromStr for Competence {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FeeError::ValidationError(format!("invalid competence '{}'", s));
        let (month, year) = s.trim().split_once('/').ok_or_else(invalid)?;
        let month = month.trim().parse::<u32>().map_err(|_| invalid())?;
        let year = year.trim().parse::<i32>().map_err(|_| invalid())?;
        Self::new(month, year)
    }
}

impl TryFrom<String> for Competence {
    type Error = FeeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Competence> for String {
    fn from(competence: Competence) -> Self {
        competence.to_string()
    }
}

impl fmt::Display for Competence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InstallmentKind {
    #[default]
    Ordinary,
    #[serde(alias = "thirteenth")]
    ThirteenthSalary,
    Other,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
}

/// One benefit payment line item as extracted from a statement.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Installment {
    pub competence: Competence,
    /// Disbursement date. Missing dates are projected from the calendar table.
    pub payment_date: Option<NaiveDate>,
    #[serde(rename = "gross")]
    pub gross_amount: Decimal,
    #[serde(rename = "net")]
    pub net_amount: Decimal,
    #[serde(default)]
    pub kind: InstallmentKind,
    #[serde(default)]
    pub status: PaymentStatus,
}

impl Installment {
    /// Rejects line items carrying negative amounts.
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.gross_amount < Decimal::ZERO || self.net_amount < Decimal::ZERO {
            return Err(FeeError::InvalidInputError(format!(
                "installment for competence {} has a negative amount",
                self.competence
            )));
        }
        Ok(())
    }
}
