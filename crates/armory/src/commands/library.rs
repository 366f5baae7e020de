use armory_build::{share_link, BuildCodec};
use armory_catalog::{Catalog, HeroId};
use armory_library::{BuildRecord, BuildUpdate, NewBuild};
use colored::Colorize;
use inquire::{validator::Validation, Text};
use miette::{IntoDiagnostic, Result};

use super::decode::{decode_input, print_build};
use crate::errors::CliError;
use crate::println_pad;
use crate::utils::config::{self, AppConfig};
use crate::utils::{load_catalog, open_library, season_from_version};

/// Season used when neither the config nor the catalog version names one.
const FALLBACK_SEASON: u32 = 1;

#[derive(Debug, Clone)]
pub struct SaveBuildArgs {
    pub catalog_path: Option<String>,
    pub input: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub season: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ListBuildsArgs {
    pub season: Option<u32>,
    pub author: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShowBuildArgs {
    pub catalog_path: Option<String>,
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct UpdateBuildArgs {
    pub catalog_path: Option<String>,
    pub id: String,
    pub input: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

pub fn save_build(args: SaveBuildArgs) -> Result<()> {
    let cfg = config::load_config();
    let catalog = load_catalog(args.catalog_path.as_deref())?;
    let (hero_id, build_id) = canonical_token(&catalog, &args.input)?;

    let title = match args.title {
        Some(title) => title,
        None => prompt_title()?,
    };
    let season = args
        .season
        .or(cfg.season)
        .or_else(|| season_from_version(catalog.version()))
        .unwrap_or(FALLBACK_SEASON);

    let mut library = open_library(&cfg)?;
    let record = library
        .create(
            cfg.author(),
            NewBuild {
                season,
                hero_id,
                build_id,
                title,
                description: args.description.unwrap_or_default(),
            },
        )
        .map_err(CliError::library)?;

    println_pad!(
        "{} {}",
        "✓ Build saved:".bright_green().bold(),
        record.title.bright_cyan().bold()
    );
    print_record(&cfg, &record);

    Ok(())
}

pub fn list_builds(args: ListBuildsArgs) -> Result<()> {
    let cfg = config::load_config();
    let library = open_library(&cfg)?;

    let (heading, builds) = match args.season {
        Some(season) => (format!("Season {} builds", season), library.season_builds(season)),
        None => {
            let author = args.author.as_deref().unwrap_or(cfg.author());
            (format!("Builds by {}", author), library.user_builds(author))
        }
    };

    println_pad!("{}", format!("📒 {}:", heading).bright_blue().bold());
    if builds.is_empty() {
        println_pad!("   {}", "(none)".bright_yellow());
        return Ok(());
    }

    for record in builds {
        let status = if record.submitted {
            "submitted".bright_red()
        } else {
            "draft".bright_green()
        };
        println_pad!(
            "   {} {} {} {} {}",
            "•".bright_cyan(),
            record.id.dimmed(),
            record.title.bright_white().bold(),
            format!("(hero {}, {})", record.hero_id, record.updated_at.format("%Y-%m-%d")).dimmed(),
            status
        );
    }

    Ok(())
}

pub fn show_build(args: ShowBuildArgs) -> Result<()> {
    let cfg = config::load_config();
    let library = open_library(&cfg)?;
    let record = library
        .get(&args.id)
        .ok_or_else(|| CliError::SavedBuildNotFound {
            id: args.id.clone(),
        })?;

    println_pad!("{}", record.title.bright_cyan().bold());
    print_record(&cfg, record);
    println!();

    let catalog = load_catalog(args.catalog_path.as_deref())?;
    match decode_input(&catalog, &record.build_id) {
        Ok(build) => print_build(&catalog, &build)?,
        Err(e) => println_pad!(
            "{} {}",
            "✗ The saved token no longer decodes:".bright_red().bold(),
            e
        ),
    }

    Ok(())
}

pub fn update_build(args: UpdateBuildArgs) -> Result<()> {
    let cfg = config::load_config();
    let mut library = open_library(&cfg)?;
    let existing = library
        .get(&args.id)
        .cloned()
        .ok_or_else(|| CliError::SavedBuildNotFound {
            id: args.id.clone(),
        })?;

    let (hero_id, build_id) = match args.input {
        Some(input) => {
            let catalog = load_catalog(args.catalog_path.as_deref())?;
            canonical_token(&catalog, &input)?
        }
        None => (existing.hero_id, existing.build_id),
    };

    let record = library
        .update(
            &args.id,
            BuildUpdate {
                hero_id,
                build_id,
                title: args.title.unwrap_or(existing.title),
                description: args.description.unwrap_or(existing.description),
            },
        )
        .map_err(CliError::library)?;

    println_pad!(
        "{} {}",
        "✓ Build updated:".bright_green().bold(),
        record.title.bright_cyan().bold()
    );
    print_record(&cfg, &record);

    Ok(())
}

pub fn delete_build(id: String) -> Result<()> {
    let cfg = config::load_config();
    let mut library = open_library(&cfg)?;
    let record = library.delete(&id).map_err(CliError::library)?;

    println_pad!(
        "{} {}",
        "✓ Build deleted:".bright_green().bold(),
        record.title.bright_cyan().bold()
    );
    Ok(())
}

pub fn lock_build(id: String) -> Result<()> {
    let cfg = config::load_config();
    let mut library = open_library(&cfg)?;
    let record = library.lock(&id).map_err(CliError::library)?;

    println_pad!(
        "{} {}",
        "🔒 Build submitted:".bright_green().bold(),
        record.title.bright_cyan().bold()
    );
    println_pad!(
        "   {}",
        "Submitted builds are read-only from now on.".bright_yellow()
    );
    Ok(())
}

/// Decodes a token or share link and re-encodes it, so the library only ever
/// holds bare canonical tokens.
fn canonical_token(catalog: &Catalog, input: &str) -> Result<(HeroId, String)> {
    let build = decode_input(catalog, input)?;
    let token = BuildCodec::new(catalog)
        .encode(&build)
        .map_err(|e| CliError::codec(e, catalog))?;
    Ok((build.hero, token))
}

fn print_record(cfg: &AppConfig, record: &BuildRecord) {
    println_pad!("   {} {}", "Id:".bright_white().bold(), record.id);
    println_pad!(
        "   {} {} {} {}",
        "Hero:".bright_white().bold(),
        record.hero_id,
        "Season:".bright_white().bold(),
        record.season
    );
    if !record.description.is_empty() {
        println_pad!("   {} {}", "Notes:".bright_white().bold(), record.description);
    }
    println_pad!("   {} {}", "Token:".bright_white().bold(), record.build_id);
    if let Some(base_url) = &cfg.share_base_url {
        println_pad!(
            "   {} {}",
            "Link:".bright_white().bold(),
            share_link(base_url, &record.build_id)
        );
    }
}

fn prompt_title() -> Result<String> {
    let validator = |input: &str| {
        if input.trim().is_empty() {
            Ok(Validation::Invalid("Title cannot be empty".into()))
        } else {
            Ok(Validation::Valid)
        }
    };

    Text::new("Enter a title for this build:")
        .with_validator(validator)
        .prompt()
        .into_diagnostic()
}
