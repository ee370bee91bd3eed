#![allow(dead_code)]

use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes `rows` monthly installments starting at competence 01/2000, each paid
/// on the 25th of the following month.
pub fn generate_csv(path: &Path, rows: usize, net: &str) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["competence", "payment_date", "gross", "net", "kind", "status"])?;

    for i in 0..rows {
        let (year, month) = (2000 + (i / 12) as i32, (i % 12) as u32 + 1);
        let (pay_year, pay_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        wtr.write_record([
            format!("{:02}/{}", month, year),
            format!("{}-{:02}-25", pay_year, pay_month),
            net.to_string(),
            net.to_string(),
            "ordinary".to_string(),
            "pending".to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the given `(competence, payment_date, net, status)` rows; gross
/// mirrors net.
pub fn write_installments(path: &Path, rows: &[(&str, &str, &str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["competence", "payment_date", "gross", "net", "kind", "status"])?;
    for (competence, date, net, status) in rows {
        wtr.write_record([*competence, *date, *net, *net, "ordinary", *status])?;
    }
    wtr.flush()?;
    Ok(())
}
