//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::VaultFile;

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

/// Print a table of the files contained in a vault (Name, Type, Size).
pub fn print_files_table(files: &[VaultFile]) {
    if files.is_empty() {
        info("No files in this vault.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Type", "Size"]);

    for f in files {
        table.add_row(vec![
            f.name.clone(),
            f.mime_type.clone(),
            format_size(f.bytes.len()),
        ]);
    }

    println!("{table}");
}

/// Human-readable byte size (B / KiB / MiB).
fn format_size(len: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if len >= MIB {
        format!("{:.1} MiB", len as f64 / MIB as f64)
    } else if len >= KIB {
        format!("{:.1} KiB", len as f64 / KIB as f64)
    } else {
        format!("{len} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
