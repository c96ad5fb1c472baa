/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use clap::{Parser, Subcommand};
use fsi_core::SortKey;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fsi-admin")]
#[command(about = "Browse and maintain the FSI language difficulty dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: .fsi-admin.toml or fsi-admin.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    pub backups_dir: Option<PathBuf>,

    /// Read from the bundled dataset instead of the data directory
    #[arg(long, global = true)]
    pub builtin: bool,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Create the data directory from the bundled dataset")]
    Init,

    #[command(about = "List languages, optionally filtered and sorted")]
    List {
        /// FSI category (repeatable)
        #[arg(long = "category", value_parser = clap::value_parser!(u8).range(0..=5))]
        categories: Vec<u8>,

        #[arg(long)]
        family: Option<String>,

        #[arg(long)]
        continent: Option<String>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "store")]
        sort: SortArg,

        #[arg(long)]
        desc: bool,

        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    #[command(about = "Show one language by exact id")]
    Show {
        id: String,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    #[command(about = "Show the extended detail view of a language")]
    Detail {
        id: String,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    #[command(about = "List the featured languages")]
    Featured {
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    #[command(about = "Compare two to four languages side by side")]
    Compare {
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    #[command(about = "List a language's learning resources by type")]
    Resources {
        id: String,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    #[command(about = "Export the dataset to an .xlsx workbook")]
    Export {
        #[arg(long, short, default_value = "languages.xlsx")]
        output: PathBuf,
    },

    #[command(about = "Validate a workbook and save it to the data directory")]
    Import { file: PathBuf },

    #[command(about = "Validate a workbook without saving anything")]
    Validate { file: PathBuf },

    #[command(about = "Save a JSON batch of languages and learning resources")]
    SaveData {
        /// JSON request body; `-` reads stdin
        file: PathBuf,

        /// Acknowledge the batch without writing it
        #[arg(long)]
        dry_run: bool,
    },

    #[command(about = "Save culture info for one language from a JSON file")]
    SaveCulture {
        /// JSON request body `{languageId, cultureInfo}`; `-` reads stdin
        file: PathBuf,
    },

    #[command(about = "List backups, newest first")]
    Backups {
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    #[command(about = "Restore a data file from a backup")]
    Restore { backup: PathBuf },

    #[command(about = "Generate shell completion scripts")]
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Text,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum SortArg {
    Store,
    Name,
    Category,
    Hours,
    Speakers,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Store => SortKey::Store,
            SortArg::Name => SortKey::Name,
            SortArg::Category => SortKey::Category,
            SortArg::Hours => SortKey::Hours,
            SortArg::Speakers => SortKey::Speakers,
        }
    }
}
