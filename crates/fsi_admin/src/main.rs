/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod cli;
mod config;
mod output;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, OutputFormat};
use config::Config;
use fsi_core::{compare_languages, Catalog, LanguageQuery};
use fsi_sheets::{export_workbook, parse_workbook, read_workbook, write_workbook};
use fsi_store::admin::{RestoreRequest, SaveCultureRequest, SaveDataRequest};
use fsi_store::{AdminService, DataRepository};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fsi_admin=info".parse()?)
                .add_directive("fsi_store=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?
        .with_overrides(cli.data_dir.clone(), cli.backups_dir.clone());
    let repo = DataRepository::new(&config.data.dir, &config.data.backups_dir);

    let load_catalog = || -> Result<Catalog> {
        if cli.builtin {
            return Ok(Catalog::builtin()?);
        }
        repo.load_catalog().with_context(|| {
            format!(
                "failed to load data from {:?} (run `fsi-admin init` or pass --builtin)",
                repo.data_dir()
            )
        })
    };

    match cli.command {
        Command::Init => {
            let created = repo.init_from_seed()?;
            if created.is_empty() {
                println!("Data directory {:?} is already initialised", repo.data_dir());
            }
            for path in created {
                println!("Created {}", path.display());
            }
        }

        Command::List {
            categories,
            family,
            continent,
            search,
            sort,
            desc,
            format,
        } => {
            let catalog = load_catalog()?;
            let query = LanguageQuery {
                categories,
                family,
                continent,
                search,
                sort: sort.into(),
                descending: desc,
            };
            let languages = query.run(&catalog);
            match format {
                OutputFormat::Json => output::print_json(&languages)?,
                OutputFormat::Table | OutputFormat::Text => {
                    println!("{}", output::languages_table(languages.iter().copied()));
                    println!("{} of {} languages", languages.len(), catalog.len());
                }
            }
        }

        Command::Show { id, format } => {
            let catalog = load_catalog()?;
            let Some(lang) = catalog.language_by_id(&id) else {
                bail!("language {id:?} not found");
            };
            match format {
                OutputFormat::Json => output::print_json(lang)?,
                OutputFormat::Table | OutputFormat::Text => output::print_language(lang),
            }
        }

        Command::Detail { id, format } => {
            let catalog = load_catalog()?;
            let Some(detail) = catalog.language_detail(&id) else {
                bail!("language {id:?} not found");
            };
            match format {
                OutputFormat::Json => output::print_json(&detail)?,
                OutputFormat::Table | OutputFormat::Text => output::print_detail(&detail),
            }
        }

        Command::Featured { format } => {
            let catalog = load_catalog()?;
            let featured = catalog.featured_languages();
            match format {
                OutputFormat::Json => output::print_json(&featured)?,
                OutputFormat::Table | OutputFormat::Text => {
                    println!("{}", output::languages_table(featured.iter().copied()))
                }
            }
        }

        Command::Compare { ids, format } => {
            let catalog = load_catalog()?;
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            let comparison = compare_languages(&catalog, &ids)?;
            match format {
                OutputFormat::Json => output::print_json(&comparison)?,
                OutputFormat::Table | OutputFormat::Text => {
                    println!("{}", output::comparison_table(&comparison))
                }
            }
        }

        Command::Resources { id, format } => {
            let catalog = load_catalog()?;
            if catalog.language_by_id(&id).is_none() {
                bail!("language {id:?} not found");
            }
            let groups = catalog.resources_by_type(&id);
            match format {
                OutputFormat::Json => output::print_json(&groups)?,
                OutputFormat::Table | OutputFormat::Text => output::print_resource_groups(&groups),
            }
        }

        Command::Export { output } => {
            let catalog = load_catalog()?;
            let bytes = write_workbook(&export_workbook(&catalog))?;
            std::fs::write(&output, bytes)
                .with_context(|| format!("failed to write workbook: {:?}", output))?;
            info!(languages = catalog.len(), path = %output.display(), "exported workbook");
            println!("Exported {} languages to {}", catalog.len(), output.display());
        }

        Command::Import { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("failed to read workbook: {:?}", file))?;
            let admin = AdminService::new(repo, config.import.max_upload_bytes);
            let response = admin.import_workbook(&file_name(&file), &bytes);
            output::print_json(&response.body)?;
            if !response.is_success() {
                bail!("import failed with status {}: {}", response.status, response.body.message);
            }
        }

        Command::Validate { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("failed to read workbook: {:?}", file))?;
            let parsed = parse_workbook(&read_workbook(&bytes)?);
            output::print_validation(&parsed);
            if !parsed.is_valid() {
                bail!("{} validation problem(s)", parsed.errors.len());
            }
        }

        Command::SaveData { file, dry_run } => {
            let mut request: SaveDataRequest = read_json(&file)?;
            if dry_run {
                request.persist = false;
            }
            let admin = AdminService::new(repo, config.import.max_upload_bytes);
            let response = admin.save_data(request);
            output::print_json(&response.body)?;
            if !response.is_success() {
                bail!("save failed with status {}", response.status);
            }
        }

        Command::SaveCulture { file } => {
            let request: SaveCultureRequest = read_json(&file)?;
            let admin = AdminService::new(repo, config.import.max_upload_bytes);
            let response = admin.save_culture_info(request);
            output::print_json(&response.body)?;
            if !response.is_success() {
                bail!("save failed with status {}", response.status);
            }
        }

        Command::Backups { format } => {
            let admin = AdminService::new(repo, config.import.max_upload_bytes);
            let response = admin.list_backups();
            if !response.is_success() {
                bail!("{}", response.body.message);
            }
            match format {
                OutputFormat::Json => output::print_json(&response.body)?,
                OutputFormat::Table | OutputFormat::Text => {
                    if response.body.backups.is_empty() {
                        println!("No backups in {:?}", admin.repository().backups_dir());
                    } else {
                        println!("{}", output::backups_table(&response.body.backups));
                    }
                }
            }
        }

        Command::Restore { backup } => {
            let admin = AdminService::new(repo, config.import.max_upload_bytes);
            let response = admin.restore_backup(RestoreRequest {
                backup_path: Some(backup),
            });
            output::print_json(&response.body)?;
            if !response.is_success() {
                bail!("restore failed with status {}", response.status);
            }
        }

        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "fsi-admin", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse a JSON request body from a file, or from stdin for `-`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?
    };
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {:?}", path))
}
