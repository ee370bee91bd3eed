use crate::domain::installment::{Installment, PaymentStatus};
use crate::domain::money::Money;
use crate::domain::ports::DisbursementCalendar;
use crate::domain::release::Release;
use crate::error::{FeeError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Groups installments into releases by payment date.
///
/// Installments sharing a date are summed into one release (a monthly payment and
/// a 13th-salary bonus paid together add up). Installments without a date are
/// projected through `calendar`; when no calendar is given, or it has no entry
/// for the competence, this fails with [`FeeError::MissingScheduleError`].
///
/// Amounts are rounded half-to-even to cents as they are summed. The result is
/// ordered by ascending date.
pub fn normalize(
    installments: &[Installment],
    calendar: Option<&dyn DisbursementCalendar>,
) -> Result<Vec<Release>> {
    let mut releases: BTreeMap<NaiveDate, Release> = BTreeMap::new();

    for installment in installments {
        installment.validate()?;

        let date = match installment.payment_date {
            Some(date) => date,
            None => calendar
                .and_then(|c| c.disbursement_date(installment.competence))
                .ok_or(FeeError::MissingScheduleError(installment.competence))?,
        };

        let release = releases.entry(date).or_insert_with(|| Release {
            date,
            total_net: Money::ZERO,
            total_gross: Money::ZERO,
            status: PaymentStatus::Paid,
            competences: Vec::new(),
        });
        release.total_net += Money::new(installment.net_amount).round_cents();
        release.total_gross += Money::new(installment.gross_amount).round_cents();
        if installment.status == PaymentStatus::Pending {
            release.status = PaymentStatus::Pending;
        }
        release.competences.push(installment.competence);
    }

    debug!(
        installments = installments.len(),
        releases = releases.len(),
        "normalized installments"
    );
    Ok(releases.into_values().collect())
}
