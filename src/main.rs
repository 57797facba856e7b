use clap::Parser;
use vaultpack::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seal {
            ref note,
            ref note_file,
            ref files,
            ref output,
            ref key_output,
            iterations,
        } => vaultpack::cli::commands::seal::execute(
            note.as_deref(),
            note_file.as_deref(),
            files,
            output,
            key_output,
            iterations,
        ),
        Commands::Open {
            ref vault,
            ref key,
            ref out_dir,
            note_only,
        } => vaultpack::cli::commands::open::execute(vault, key, out_dir, note_only),
    };

    if let Err(e) = result {
        vaultpack::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
