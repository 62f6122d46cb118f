//! gzhead CLI - inspect and rewrite gzip member headers.
//!
//! The compressed payload is never inflated: `edit` re-encodes the header and
//! copies everything after it byte for byte.

mod commands;

use clap::{ArgGroup, Parser, Subcommand};
use commands::{EditOptions, cmd_edit, cmd_info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gzhead")]
#[command(author, version, about = "Inspect and rewrite gzip (RFC 1952) headers")]
#[command(long_about = "
gzhead reads the header at the start of a .gz file, shows every field
(extra subfields, original name, comment, header CRC), and can write a copy
with an edited header. The compressed data is copied untouched.

Examples:
  gzhead info data.gz
  gzhead info --json data.gz
  gzhead edit data.gz -o renamed.gz --name report.csv
  gzhead edit data.gz -o clean.gz --no-name --no-comment --strip-extra
  gzhead edit data.gz -o checked.gz --hcrc
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header of a gzip file
    #[command(alias = "i")]
    Info {
        /// Gzip file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Write a copy of a gzip file with an edited header
    #[command(alias = "e")]
    #[command(group(ArgGroup::new("name_edit").args(["name", "no_name"])))]
    #[command(group(ArgGroup::new("comment_edit").args(["comment", "no_comment"])))]
    #[command(group(ArgGroup::new("mtime_edit").args(["mtime", "touch"])))]
    #[command(group(ArgGroup::new("hcrc_edit").args(["hcrc", "no_hcrc"])))]
    Edit {
        /// Gzip file to read
        file: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Set the original filename
        #[arg(long)]
        name: Option<String>,

        /// Remove the original filename
        #[arg(long)]
        no_name: bool,

        /// Set the comment
        #[arg(long)]
        comment: Option<String>,

        /// Remove the comment
        #[arg(long)]
        no_comment: bool,

        /// Set the modification time (Unix seconds, 0 for none)
        #[arg(long)]
        mtime: Option<u32>,

        /// Set the modification time to now
        #[arg(long)]
        touch: bool,

        /// Set the operating system byte
        #[arg(long)]
        os: Option<u8>,

        /// Add an FHCRC header checksum
        #[arg(long)]
        hcrc: bool,

        /// Remove the FHCRC header checksum
        #[arg(long)]
        no_hcrc: bool,

        /// Drop all extra subfields
        #[arg(long)]
        strip_extra: bool,

        /// Show the resulting header
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Edit {
            file,
            output,
            name,
            no_name,
            comment,
            no_comment,
            mtime,
            touch,
            os,
            hcrc,
            no_hcrc,
            strip_extra,
            verbose,
        } => {
            let options = EditOptions {
                name: edit_text(name, no_name),
                comment: edit_text(comment, no_comment),
                mtime,
                touch,
                os,
                hcrc: edit_flag(hcrc, no_hcrc),
                strip_extra,
                verbose,
            };
            cmd_edit(&file, &output, &options)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `Some(Some(v))` sets, `Some(None)` removes, `None` leaves as is.
fn edit_text(value: Option<String>, remove: bool) -> Option<Option<String>> {
    match (value, remove) {
        (Some(v), _) => Some(Some(v)),
        (None, true) => Some(None),
        (None, false) => None,
    }
}

fn edit_flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
