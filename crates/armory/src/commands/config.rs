use crate::utils::config::{self, AppConfig};
use camino::Utf8PathBuf;
use colored::Colorize;
use miette::Result;

fn update_config(apply: impl FnOnce(&mut AppConfig)) -> Result<()> {
    let mut cfg = config::load_config();
    apply(&mut cfg);
    config::save_config(&cfg).map_err(|e| miette::miette!("Failed to save config: {}", e))
}

/// Print a config path entry with status indicator
fn print_path_config(name: &str, path: Option<&Utf8PathBuf>, valid: bool) {
    match path {
        Some(p) => {
            let status = if valid {
                "✓".bright_green()
            } else {
                "✗".bright_red()
            };
            println!("  {} {} {}", format!("{}:", name).bright_white(), p, status);
        }
        None => {
            println!(
                "  {} {}",
                format!("{}:", name).bright_white(),
                "(not set)".bright_yellow()
            );
        }
    }
}

fn print_value_config(name: &str, value: Option<String>, default: Option<&str>) {
    let value = match (value, default) {
        (Some(value), _) => value.normal(),
        (None, Some(default)) => format!("{} (default)", default).dimmed(),
        (None, None) => "(not set)".bright_yellow(),
    };
    println!("  {} {}", format!("{}:", name).bright_white(), value);
}

pub fn show_config() -> Result<()> {
    let cfg = config::load_config();
    let config_path = config::default_config_path()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    println!();
    println!("  {} {}", "config_file:".bright_white(), config_path);

    let catalog_path = cfg.catalog_path();
    print_path_config("catalog_path", Some(&catalog_path), catalog_path.is_file());

    let library_dir = cfg.library_dir();
    let library_ok = library_dir.as_ref().is_some_and(|dir| dir.is_dir());
    print_path_config("library_dir", library_dir.as_ref(), library_ok);

    print_value_config("share_base_url", cfg.share_base_url.clone(), None);
    print_value_config("author", cfg.author.clone(), Some(config::DEFAULT_AUTHOR));
    print_value_config(
        "season",
        cfg.season.map(|season| season.to_string()),
        Some("from catalog version"),
    );

    println!();
    Ok(())
}

pub fn set_catalog_path(path: String) -> Result<()> {
    let path = Utf8PathBuf::from(&path);
    if !path.is_file() {
        eprintln!(
            "  {}",
            "The path must point to a catalog JSON file.".bright_yellow()
        );
        return Err(miette::miette!("Catalog file not found: {}", path));
    }

    update_config(|cfg| cfg.catalog_path = Some(path.clone()))?;

    println!("{}", "✓ Catalog path set successfully!".bright_green().bold());
    println!();
    println!(
        "  {} {}",
        "Path:".bright_white().bold(),
        path.as_str().bright_green()
    );

    Ok(())
}

pub fn set_library_dir(path: String) -> Result<()> {
    let path = Utf8PathBuf::from(&path);
    update_config(|cfg| cfg.library_dir = Some(path.clone()))?;

    println!("{}", "✓ Library directory set successfully!".bright_green().bold());
    println!();
    println!(
        "  {} {}",
        "Path:".bright_white().bold(),
        path.as_str().bright_green()
    );

    Ok(())
}

pub fn set_author(name: String) -> Result<()> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(miette::miette!("Author name cannot be empty"));
    }

    update_config(|cfg| cfg.author = Some(name.clone()))?;
    println!(
        "{} {}",
        "✓ Author set to".bright_green().bold(),
        name.bright_cyan()
    );
    Ok(())
}

pub fn set_share_url(url: String) -> Result<()> {
    let url = url.trim().to_string();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(miette::miette!(
            help = "Example: https://example.com/planner",
            "Share URL must start with http:// or https://"
        ));
    }

    update_config(|cfg| cfg.share_base_url = Some(url.clone()))?;
    println!(
        "{} {}",
        "✓ Share links will point at".bright_green().bold(),
        url.bright_cyan()
    );
    Ok(())
}

pub fn set_season(season: u32) -> Result<()> {
    update_config(|cfg| cfg.season = Some(season))?;
    println!(
        "{} {}",
        "✓ Season set to".bright_green().bold(),
        season.to_string().bright_cyan()
    );
    Ok(())
}

pub fn reset_config() -> Result<()> {
    let config_path = config::default_config_path()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let default_cfg = AppConfig::default();
    config::save_config(&default_cfg)
        .map_err(|e| miette::miette!("Failed to reset config: {}", e))?;

    println!(
        "{}",
        "✓ Configuration reset to defaults".bright_green().bold()
    );
    println!();
    println!("  {} {}", "Config file:".bright_white().bold(), config_path);
    println!();

    Ok(())
}
