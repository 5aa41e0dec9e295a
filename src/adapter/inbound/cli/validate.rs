//! Handler for the `validate` command.

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ValidateArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::payment_list::read_payment_file;
use crate::domain::payment::{validate_rows, RejectedRow, ValidatedPayments};
use crate::error::Result;

#[derive(Tabled)]
struct RejectedLine {
    #[tabled(rename = "Row")]
    line: usize,
    #[tabled(rename = "Id")]
    id_value: String,
    #[tabled(rename = "Issues")]
    reason: String,
}

impl From<&RejectedRow> for RejectedLine {
    fn from(row: &RejectedRow) -> Self {
        Self {
            line: row.line,
            id_value: row.id_value.clone(),
            reason: row.reason(),
        }
    }
}

/// Execute the validate command.
pub fn execute(args: &ValidateArgs) -> Result<()> {
    let rows = read_payment_file(&args.file)?;
    let validated = validate_rows(&rows);

    output::header(env!("CARGO_PKG_VERSION"));
    print_report(&args.file.display().to_string(), &validated);

    if output::is_json() {
        output::result("rejected_rows", &validated.rejected)?;
    }
    Ok(())
}

/// Print row counts and, when present, a table of rejected rows.
pub fn print_report(filename: &str, validated: &ValidatedPayments) {
    output::field("File", filename);
    output::field("Rows", validated.total());
    output::field("Accepted", output::positive(validated.accepted.len()));

    if validated.rejected.is_empty() {
        output::field("Rejected", 0);
        output::success("All rows are valid");
        return;
    }

    output::field("Rejected", output::negative(validated.rejected.len()));
    output::section("Rejected rows");
    let lines: Vec<RejectedLine> = validated.rejected.iter().map(RejectedLine::from).collect();
    let table = Table::new(lines).to_string();
    output::table(&table);
}
