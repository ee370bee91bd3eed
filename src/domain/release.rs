use super::installment::{Competence, PaymentStatus};
use super::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One or more installments sharing a payment date, collapsed into a single
/// payable event.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Release {
    pub date: NaiveDate,
    /// Sum of the member installments' net amounts.
    pub total_net: Money,
    pub total_gross: Money,
    /// `Paid` only when every member installment is paid.
    pub status: PaymentStatus,
    /// Competences of the member installments, in input order.
    pub competences: Vec<Competence>,
}

impl Release {
    pub fn new(date: NaiveDate, total_net: Money, status: PaymentStatus) -> Self {
        Self {
            date,
            total_net,
            total_gross: total_net,
            status,
            competences: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}
