use armory_build::{share_link, Build, BuildCodec};
use camino::Utf8PathBuf;
use colored::Colorize;
use miette::Result;

use crate::errors::CliError;
use crate::println_pad;
use crate::utils::{config, load_catalog, print_ansi_boxed_lines};

#[derive(Debug, Clone)]
pub struct EncodeBuildArgs {
    pub catalog_path: Option<String>,
    pub file_path: String,
}

pub fn encode_build(args: EncodeBuildArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog_path.as_deref())?;
    let build = read_build_file(Utf8PathBuf::from(args.file_path))?;

    let codec = BuildCodec::new(&catalog);
    let token = codec
        .encode(&build)
        .map_err(|e| CliError::codec(e, &catalog))?;

    let hero = catalog
        .hero(build.hero)
        .map(|hero| hero.name())
        .unwrap_or_default();
    println_pad!(
        "{} {}",
        "🔗 Build encoded for".bright_green().bold(),
        hero.bright_cyan().bold()
    );

    let mut lines = vec![format!("{} {}", "Token:".bright_white().bold(), token)];
    if let Some(base_url) = config::load_config().share_base_url {
        lines.push(format!(
            "{} {}",
            "Link:".bright_white().bold(),
            share_link(&base_url, &token)
        ));
    }
    print_ansi_boxed_lines(&lines);

    Ok(())
}

/// Reads a build from a JSON file.
pub fn read_build_file(path: Utf8PathBuf) -> Result<Build> {
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return Err(CliError::invalid_build_file(path, e).into()),
    };

    serde_json::from_str(&content).map_err(|e| CliError::invalid_build_file(path, e).into())
}
