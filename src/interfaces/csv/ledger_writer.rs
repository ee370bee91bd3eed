use crate::application::engine::AllocationOutcome;
use crate::domain::distribution::{DistributionRow, Ledger, LedgerTotals};
use crate::domain::installment::PaymentStatus;
use crate::domain::money::{Money, Rate};
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CsvRow {
    release_date: NaiveDate,
    competences: String,
    status: PaymentStatus,
    installment_amount: Money,
    client_net: Money,
    fee_charged: Money,
    effective_rate: Rate,
    balance_after: Money,
}

impl From<&DistributionRow> for CsvRow {
    fn from(row: &DistributionRow) -> Self {
        let competences = row
            .competences
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(";");
        Self {
            release_date: row.release_date,
            competences,
            status: row.status,
            installment_amount: row.installment_amount,
            client_net: row.client_net,
            fee_charged: row.fee_charged,
            effective_rate: row.effective_rate,
            balance_after: row.balance_after,
        }
    }
}

#[derive(Serialize)]
struct JsonResponse<'a> {
    ok: bool,
    rows: &'a [DistributionRow],
    totals: &'a LedgerTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<&'a str>,
}

/// Writes a computed ledger to any `Write` sink (usually stdout).
pub struct LedgerWriter<W: Write> {
    sink: W,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes one CSV record per distribution row, with a header.
    pub fn write_rows(&mut self, ledger: &Ledger) -> Result<()> {
        let mut writer = csv::Writer::from_writer(&mut self.sink);
        if ledger.rows.is_empty() {
            writer.write_record([
                "release_date",
                "competences",
                "status",
                "installment_amount",
                "client_net",
                "fee_charged",
                "effective_rate",
                "balance_after",
            ])?;
        }
        for row in &ledger.rows {
            writer.serialize(CsvRow::from(row))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the full response (rows, totals and any warning) as pretty JSON.
    pub fn write_json(&mut self, outcome: &AllocationOutcome) -> Result<()> {
        let response = JsonResponse {
            ok: true,
            rows: &outcome.ledger.rows,
            totals: &outcome.ledger.totals,
            warning: outcome.warning.as_deref(),
        };
        serde_json::to_writer_pretty(&mut self.sink, &response)?;
        writeln!(self.sink)?;
        Ok(())
    }
}
