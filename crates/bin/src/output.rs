//! Output formatting helpers for human-readable and JSON output.

use shardusers::User;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// The fields of a user that are safe to print.
pub fn user_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "uid": user.uid(),
        "email": user.email(),
    })
}

/// Print a single user.
pub fn print_user(user: &User, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Human => {
            println!("UID:    {}", user.uid());
            println!("Email:  {}", user.email());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&user_json(user))?),
    }
    Ok(())
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Column width is the widest of the header and every cell
    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .take(col_count)
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}
