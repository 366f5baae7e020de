use crate::errors::CliError;
use armory_catalog::{Attribute, Catalog};
use armory_library::BuildLibrary;
use camino::Utf8PathBuf;
use miette::Result;
use regex::Regex;
use std::sync::OnceLock;

pub mod config;

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

/// Loads the catalog from `path`, or from the configured catalog path.
pub fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    let path = match path {
        Some(path) => Utf8PathBuf::from(path),
        None => config::load_config().catalog_path(),
    };

    Catalog::from_path(&path).map_err(|source| CliError::catalog_load(path, source).into())
}

/// Opens the build library in the configured directory.
pub fn open_library(cfg: &config::AppConfig) -> Result<BuildLibrary> {
    let dir = cfg.library_dir().ok_or(CliError::LibraryDirUnavailable)?;
    BuildLibrary::open(&dir).map_err(|e| CliError::library(e).into())
}

/// Season number embedded in a catalog version label such as `season-16.2`.
pub fn season_from_version(version: &str) -> Option<u32> {
    static SEASON: OnceLock<Regex> = OnceLock::new();
    let pattern = SEASON.get_or_init(|| Regex::new(r"(?i)season[-_ ]?(\d+)").unwrap());

    pattern.captures(version)?.get(1)?.as_str().parse().ok()
}

/// Human-readable form of an attribute, e.g. `Weapon Power +5%`.
pub fn format_attribute(catalog: &Catalog, attribute: &Attribute) -> String {
    match (attribute.stat(), attribute.description()) {
        (Some(value), _) => format_stat(
            catalog.attribute_name(&attribute.kind),
            value,
            attribute.unit.as_deref(),
        ),
        (None, Some(text)) => text.to_string(),
        (None, None) => String::new(),
    }
}

pub fn format_stat(name: &str, value: f64, unit: Option<&str>) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{} {}{}{}", name, sign, value, unit.unwrap_or_default())
}

/// Credits with a thousands separator, e.g. `10,250`.
pub fn format_credits(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn visible_len(s: &str) -> usize {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let ansi = ANSI.get_or_init(|| Regex::new("\x1b\\[[0-9;]*m").unwrap());
    ansi.replace_all(s, "").chars().count()
}

/// Prints the provided lines inside an ASCII box
pub fn print_ansi_boxed_lines(lines: &[String]) {
    let width = lines
        .iter()
        .map(|s| visible_len(s.as_str()))
        .max()
        .unwrap_or(0);

    let border = "-".repeat(width + 4);
    println_pad!("{}", border);
    for line in lines {
        let pad = width - visible_len(line.as_str());
        println_pad!("| {}{} |", line, " ".repeat(pad));
    }
    println_pad!("{}", border);
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory_catalog::AttributeValue;

    #[test]
    fn test_season_from_version() {
        assert_eq!(season_from_version("season-16.2"), Some(16));
        assert_eq!(season_from_version("Season 3"), Some(3));
        assert_eq!(season_from_version("2026-10-01"), None);
    }

    #[test]
    fn test_format_attribute() {
        let catalog = Catalog::from_json_str(include_str!("../../data/catalog.json")).unwrap();

        let stat = Attribute {
            kind: "WP".to_string(),
            value: AttributeValue::Stat(5.0),
            unit: Some("%".to_string()),
        };
        assert_eq!(format_attribute(&catalog, &stat), "Weapon Power +5%");

        let unknown = Attribute {
            kind: "XYZ".to_string(),
            value: AttributeValue::Stat(-2.5),
            unit: None,
        };
        assert_eq!(format_attribute(&catalog, &unknown), "XYZ -2.5");

        let description = Attribute {
            kind: "description".to_string(),
            value: AttributeValue::Description("Gain a shield".to_string()),
            unit: None,
        };
        assert_eq!(format_attribute(&catalog, &description), "Gain a shield");
    }

    #[test]
    fn test_format_credits() {
        assert_eq!(format_credits(0), "0");
        assert_eq!(format_credits(950), "950");
        assert_eq!(format_credits(10250), "10,250");
        assert_eq!(format_credits(1234567), "1,234,567");
    }

    #[test]
    fn test_visible_len_ignores_ansi() {
        assert_eq!(visible_len("\x1b[1;32mok\x1b[0m"), 2);
        assert_eq!(visible_len("plain"), 5);
    }
}
