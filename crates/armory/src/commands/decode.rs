use armory_build::stats::{BuildSummary, RoundSummary};
use armory_build::{token_from_input, Build, BuildCodec, ResolvedBuild};
use armory_catalog::Catalog;
use colored::Colorize;
use miette::{IntoDiagnostic, Result};

use crate::errors::CliError;
use crate::println_pad;
use crate::utils::{format_credits, format_stat, load_catalog, print_ansi_boxed_lines};

#[derive(Debug, Clone)]
pub struct DecodeBuildArgs {
    pub catalog_path: Option<String>,

    /// A bare token or a share link carrying one.
    pub input: String,

    /// Print the build as JSON instead of a summary.
    pub json: bool,
}

pub fn decode_build(args: DecodeBuildArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog_path.as_deref())?;
    let build = decode_input(&catalog, &args.input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&build).into_diagnostic()?);
        return Ok(());
    }

    print_build(&catalog, &build)
}

/// Decodes a token or share link, mapping failures to diagnostics.
pub fn decode_input(catalog: &Catalog, input: &str) -> Result<Build> {
    BuildCodec::new(catalog)
        .decode(token_from_input(input))
        .map_err(|e| CliError::codec(e, catalog).into())
}

/// Prints a round-by-round summary of a valid build.
pub fn print_build(catalog: &Catalog, build: &Build) -> Result<()> {
    let resolved: ResolvedBuild<'_> = build
        .resolve(catalog)
        .map_err(|e| CliError::codec(e, catalog))?;
    let summary = BuildSummary::from_resolved(&resolved);

    println_pad!(
        "{} {}",
        "🧩 Build for".bright_blue().bold(),
        summary.hero.bright_cyan().bold()
    );

    for (round, resolved_round) in summary.rounds.iter().zip(&resolved.rounds) {
        let power = match &round.power {
            Some(name) => format!("⚡ {}", name).bright_magenta().to_string(),
            None => "-".dimmed().to_string(),
        };
        let items: Vec<&str> = resolved_round
            .items
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        let items = if items.is_empty() {
            "no items".dimmed().to_string()
        } else {
            items.join(", ")
        };

        println_pad!(
            "{} {}  {}  {}",
            format!("Round {}", round.ordinal).bright_white().bold(),
            power,
            items,
            format!("{} credits", format_credits(round.cost.into())).bright_yellow()
        );
    }

    let mut lines = vec![format!(
        "{} {} credits",
        "Total spent:".bright_white().bold(),
        format_credits(summary.total_cost())
    )];
    if let Some(round) = summary.most_expensive_round() {
        lines.push(format!(
            "{} round {} ({} credits)",
            "Biggest round:".bright_white().bold(),
            round.ordinal,
            format_credits(round.cost.into())
        ));
    }
    if let Some(round) = summary.final_round() {
        lines.extend(stat_lines(catalog, round));
    }
    print_ansi_boxed_lines(&lines);

    Ok(())
}

fn stat_lines(catalog: &Catalog, round: &RoundSummary) -> Vec<String> {
    if round.stats.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!("Round {} stats:", round.ordinal)
        .bright_white()
        .bold()
        .to_string()];
    lines.extend(round.stats.iter().map(|(kind, total)| {
        format!(
            "  {}",
            format_stat(
                catalog.attribute_name(kind),
                total.value,
                total.unit.as_deref()
            )
            .bright_green()
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json_str(include_str!("../../data/catalog.json")).unwrap()
    }

    #[test]
    fn test_decode_input_accepts_links() {
        let catalog = catalog();
        let build = Build::new(19, catalog.rules())
            .with_power(1, 101)
            .with_items(1, [201, 202]);
        let token = BuildCodec::new(&catalog).encode(&build).unwrap();

        assert_eq!(decode_input(&catalog, &token).unwrap(), build);
        assert_eq!(
            decode_input(&catalog, &format!("https://example.com/planner?build={token}")).unwrap(),
            build
        );
        assert!(decode_input(&catalog, "not-a-valid-token").is_err());
    }

    #[test]
    fn test_stat_lines() {
        let catalog = catalog();
        let build = Build::new(19, catalog.rules()).with_items(7, [201, 202]);
        let resolved = build.resolve(&catalog).unwrap();
        let summary = BuildSummary::from_resolved(&resolved);

        let lines = stat_lines(&catalog, summary.final_round().unwrap());
        assert!(lines.len() > 1);
        assert!(lines
            .iter()
            .any(|line| line.contains("Weapon Power") || line.contains("Ability Power")));
    }
}
