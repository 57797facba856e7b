//! `vaultpack open` — decrypt a vault and extract its contents.

use std::fs;
use std::path::Path;

use crate::cli::{output, prompt_password};
use crate::errors::Result;
use crate::vault;

/// Execute the `open` command.
pub fn execute(vault_path: &Path, key_path: &Path, out_dir: &Path, note_only: bool) -> Result<()> {
    // 1. Load both artifacts.
    let blob = fs::read(vault_path)?;
    let key_file_json = fs::read_to_string(key_path)?;

    // 2. Prompt for the password and open.
    let password = prompt_password()?;
    let content = vault::open(&blob, &key_file_json, &password)?;

    // 3. Show the note.
    if content.note.is_empty() {
        output::info("The vault contains no note.");
    } else {
        println!("{}", content.note);
    }

    // 4. Show and optionally extract the files.
    output::print_files_table(&content.files);

    if note_only || content.files.is_empty() {
        return Ok(());
    }

    fs::create_dir_all(out_dir)?;
    for file in &content.files {
        // A vault name may contain path separators; only the final
        // component is used so extraction cannot escape `out_dir`.
        let name = Path::new(&file.name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let target = out_dir.join(name);
        fs::write(&target, &file.bytes)?;
        output::info(&format!("Extracted {}", target.display()));
    }

    output::success(&format!(
        "Opened vault: {} file(s) written to {}",
        content.files.len(),
        out_dir.display()
    ));

    Ok(())
}
