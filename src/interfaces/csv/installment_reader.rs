use crate::domain::installment::Installment;
use crate::error::{FeeError, Result};
use std::io::Read;

/// Reads installments from a CSV source.
///
/// Expected header: `competence, payment_date, gross, net, kind, status`. The
/// date may be left empty to have it projected from the calendar table; `kind`
/// and `status` default to `ordinary` and `pending`.
pub struct InstallmentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> InstallmentReader<R> {
    /// Creates a new `InstallmentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes installments.
    ///
    /// A record that cannot be parsed yields [`FeeError::ValidationError`] naming
    /// its line.
    pub fn installments(self) -> impl Iterator<Item = Result<Installment>> {
        self.reader.into_deserialize().map(|result| {
            result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                FeeError::ValidationError(format!("malformed installment at line {}: {}", line, e))
            })
        })
    }

    /// Reads every installment, failing on the first malformed record.
    pub fn read_all(self) -> Result<Vec<Installment>> {
        self.installments().collect()
    }
}
