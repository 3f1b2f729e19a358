//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialRecord;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print stored labels in store order, numbered from 1.
pub fn print_labels_table(labels: &[&str]) {
    if labels.is_empty() {
        info("No entries in this vault yet.");
        tip("Run `sitevault add --name <SITE> ...` or `sitevault import <CSV>`.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name"]);

    for (i, label) in labels.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), (*label).to_string()]);
    }

    println!("{table}");
}

/// Print one credential, password included.
pub fn print_record(record: &CredentialRecord) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Name", record.label.as_str()]);
    table.add_row(vec!["URL", record.url.as_str()]);
    table.add_row(vec!["Username", record.username.as_str()]);
    table.add_row(vec!["Password", record.secret.as_str()]);

    println!("{table}");
}
