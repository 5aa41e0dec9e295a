//! Payment list reader.
//!
//! Expects a header row naming `type_id`, `valeur_id`, `nom_complet`,
//! `montant` and `devise`, in any order. Rows that cannot be read at all
//! (wrong field count, invalid UTF-8) are skipped with a warning; content
//! problems are left to [`PaymentRow::validate`].

use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::domain::payment::PaymentRow;
use crate::error::Result;

/// Read payment rows from any reader.
///
/// # Errors
///
/// Fails only when the header row itself cannot be read.
pub fn read_payment_rows<R: Read>(reader: R) -> Result<Vec<PaymentRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);
    csv_reader.headers()?;

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<PaymentRow>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => warn!(row = index + 1, error = %err, "Skipping unreadable row"),
        }
    }
    Ok(rows)
}

/// Read payment rows from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or has no readable header.
pub fn read_payment_file<P: AsRef<Path>>(path: P) -> Result<Vec<PaymentRow>> {
    let file = std::fs::File::open(path)?;
    read_payment_rows(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_by_header_name() {
        let data = "\
montant,devise,type_id,valeur_id,nom_complet
5000,XOF,PERSONAL_ID,0123456789,Awa Traore
12.5, XOF ,PERSONAL_ID,0987654321,Kofi Mensah
";
        let rows = read_payment_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].valeur_id, "0123456789");
        assert_eq!(rows[0].montant, "5000");
        assert_eq!(rows[1].devise, "XOF");
        assert_eq!(rows[1].nom_complet, "Kofi Mensah");
    }

    #[test]
    fn skips_rows_with_wrong_field_count() {
        let data = "\
type_id,valeur_id,nom_complet,montant,devise
PERSONAL_ID,0123456789,Awa Traore,5000,XOF
PERSONAL_ID,0123456789
PERSONAL_ID,0987654321,Kofi Mensah,100,XOF
";
        let rows = read_payment_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].nom_complet, "Kofi Mensah");
    }

    #[test]
    fn missing_columns_default_to_empty() {
        let data = "valeur_id,montant\n0123456789,10\n";
        let rows = read_payment_rows(data.as_bytes()).unwrap();

        assert_eq!(rows[0].type_id, "");
        assert!(rows[0].validate(1).is_err());
    }
}
