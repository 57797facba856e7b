//! `vaultpack seal` — bundle a note and files into a new vault.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{output, prompt_new_password};
use crate::crypto::kdf::{KdfParams, MIN_ITERATIONS};
use crate::errors::{Result, VaultPackError};
use crate::vault::{self, VaultContent, VaultFile};

/// Execute the `seal` command.
pub fn execute(
    note: Option<&str>,
    note_file: Option<&Path>,
    files: &[PathBuf],
    output_path: &Path,
    key_output_path: &Path,
    iterations: Option<u32>,
) -> Result<()> {
    // 1. Collect the note text.
    let note = match (note, note_file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    // 2. Read the files to embed.
    let mut vault_files = Vec::with_capacity(files.len());
    for path in files {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let mime_type = mime_type_for(path).to_string();
        vault_files.push(VaultFile {
            name,
            mime_type,
            bytes,
        });
    }

    // 3. An empty vault is almost certainly a mistake — reject it here,
    //    the core itself does not care.
    if note.is_empty() && vault_files.is_empty() {
        return Err(VaultPackError::InvalidInput(
            "nothing to seal — provide --note, --note-file, or --file".into(),
        ));
    }

    // 4. Never clobber existing artifacts; a vault is write-once.
    for path in [output_path, key_output_path] {
        if path.exists() {
            return Err(VaultPackError::CommandFailed(format!(
                "{} already exists — refusing to overwrite",
                path.display()
            )));
        }
    }

    // 5. Resolve the KDF work factor.  A weak flag value is a caller
    //    mistake, caught here before any prompting or key derivation.
    let kdf_params = match iterations {
        Some(n) if n < MIN_ITERATIONS => {
            return Err(VaultPackError::InvalidInput(format!(
                "--iterations must be at least {MIN_ITERATIONS} (got {n})"
            )));
        }
        Some(n) => KdfParams {
            iterations: n,
            ..KdfParams::default()
        },
        None => KdfParams::default(),
    };

    // 6. Prompt for the password and seal.
    let password = prompt_new_password()?;

    let content = VaultContent {
        note,
        files: vault_files,
    };
    let (blob, key_file_json) = vault::seal_with_params(&content, &password, &kdf_params)?;

    // 7. Write both artifacts.
    fs::write(output_path, &blob)?;
    fs::write(key_output_path, &key_file_json)?;

    output::success(&format!(
        "Sealed {} file(s) into {}",
        content.files.len(),
        output_path.display()
    ));
    output::info(&format!("Key file written to {}", key_output_path.display()));
    output::warning("Keep the key file safe — without it (or the password) the vault cannot be opened.");
    output::tip("Run `vaultpack open --vault <BLOB> --key <KEYFILE>` to open the vault.");

    Ok(())
}

/// Guess a MIME type from the file extension.
///
/// Falls back to `application/octet-stream` for anything unknown.
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(mime_type_for(Path::new("a.txt")), "text/plain");
        assert_eq!(mime_type_for(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("doc.pdf")), "application/pdf");
    }

    #[test]
    fn unknown_extension_falls_back() {
        assert_eq!(
            mime_type_for(Path::new("mystery.xyz")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }
}
