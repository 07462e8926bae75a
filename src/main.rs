//! managed-favs command-line front end.
//!
//! `convert` reads a JSON or plist export and writes it in the other format
//! (or the one given with `--to`); `inspect` prints a summary of an export.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use managed_favs::managers::favorites_manager::{FavoritesManager, FavoritesManagerTrait};
use managed_favs::services::format_parser;
use managed_favs::types::parsed::ParsedKind;
use managed_favs::types::settings::{FileFormat, ImportPolicy};

#[derive(Parser, Debug)]
#[command(name = "managed-favs", version, about = "Convert and inspect managed favorites exports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an export between JSON and plist.
    Convert {
        /// Input file (.json or .plist).
        input: PathBuf,
        /// Output format; defaults to the format the input is not in.
        #[arg(long, value_enum)]
        to: Option<FormatArg>,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overrides the toplevel name read from the input.
        #[arg(long)]
        toplevel_name: Option<String>,
    },
    /// Print the toplevel name and tree of an export.
    Inspect {
        /// Input file (.json or .plist).
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Plist,
}

impl From<FormatArg> for FileFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => FileFormat::Json,
            FormatArg::Plist => FileFormat::Plist,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    managed_favs::logging::init()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            input,
            to,
            output,
            toplevel_name,
        } => {
            let source = format_parser::format_for_path(&input)?;
            let config = format_parser::parse_file(&input)?;

            let target = to.map(FileFormat::from).unwrap_or(source.counterpart());

            let mut favorites = FavoritesManager::default();
            favorites.apply_import(&config, ImportPolicy::Replace);
            if let Some(name) = toplevel_name {
                favorites.set_toplevel_name(&name);
            }
            let content = favorites.export(target);

            match output {
                Some(path) => {
                    fs::write(&path, content)?;
                    info!(path = %path.display(), format = target.extension(), "Export written");
                }
                None => println!("{}", content),
            }
        }
        Command::Inspect { input } => {
            let config = format_parser::parse_file(&input)?;
            println!("toplevel_name: {}", config.toplevel_name);
            for entry in &config.entries {
                match &entry.kind {
                    ParsedKind::Favorite { url } => println!("- {} <{}>", entry.name, url),
                    ParsedKind::Folder { children } => {
                        println!("+ {}/", entry.name);
                        for child in children {
                            println!("  - {} <{}>", child.name, child.url().unwrap_or_default());
                        }
                    }
                }
            }
            println!(
                "{} favorites in {} folders",
                config.favorite_count(),
                config.folder_count()
            );
        }
    }

    Ok(())
}
