use armory_catalog::{HeroId, HeroRole};
use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use commands::{
    decode_build, delete_build, encode_build, list_builds, list_heroes, lock_build, save_build,
    show_build, show_hero, update_build, DecodeBuildArgs, EncodeBuildArgs, ListBuildsArgs,
    ListHeroesArgs, SaveBuildArgs, ShowBuildArgs, ShowHeroArgs, UpdateBuildArgs,
};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod errors;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the catalog JSON file (overrides the configured catalog)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum RoleArg {
    Tank,
    Damage,
    Support,
}

impl From<RoleArg> for HeroRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Tank => HeroRole::Tank,
            RoleArg::Damage => HeroRole::Damage,
            RoleArg::Support => HeroRole::Support,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the heroes in the catalog
    Heroes {
        /// Only list heroes with this role
        #[arg(short, long, value_enum)]
        role: Option<RoleArg>,
    },
    /// Show a hero's powers and items
    Hero {
        /// The hero id
        id: HeroId,
    },
    /// Encode a build JSON file into a share token
    Encode {
        /// The path to the build JSON file
        file_path: String,
    },
    /// Decode a build token or share link
    Decode {
        /// A build token, or a link with a `build=` parameter
        token: String,

        /// Print the build as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage saved builds
    Library {
        #[command(subcommand)]
        command: LibraryCommands,
    },
    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommands {
    /// Save a build token to the library
    Save {
        /// A build token or share link
        token: String,

        /// Title of the build (prompted for when missing)
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Season number (defaults to the configured season)
        #[arg(long)]
        season: Option<u32>,
    },
    /// List saved builds, newest first
    List {
        /// List every build of a season instead of one author's builds
        #[arg(long)]
        season: Option<u32>,

        /// Author whose builds to list (defaults to the configured author)
        #[arg(long)]
        author: Option<String>,
    },
    /// Show a saved build
    Show { id: String },
    /// Replace the token, title or description of a saved build
    Update {
        id: String,

        #[arg(long)]
        token: Option<String>,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a saved build
    Delete { id: String },
    /// Submit a saved build, making it read-only
    Lock { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set the catalog JSON file
    SetCatalog { path: String },
    /// Set the directory saved builds are kept in
    SetLibraryDir { path: String },
    /// Set the author name recorded on saved builds
    SetAuthor { name: String },
    /// Set the page share links point at
    SetShareUrl { url: String },
    /// Set the season number recorded on saved builds
    SetSeason { season: u32 },
    /// Reset the configuration to defaults
    Reset,
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let args = parse_args();
    let catalog_path = args.catalog;

    match args.command {
        Commands::Heroes { role } => list_heroes(ListHeroesArgs {
            catalog_path,
            role: role.map(HeroRole::from),
        }),
        Commands::Hero { id } => show_hero(ShowHeroArgs { catalog_path, id }),
        Commands::Encode { file_path } => encode_build(EncodeBuildArgs {
            catalog_path,
            file_path,
        }),
        Commands::Decode { token, json } => decode_build(DecodeBuildArgs {
            catalog_path,
            input: token,
            json,
        }),
        Commands::Library { command } => match command {
            LibraryCommands::Save {
                token,
                title,
                description,
                season,
            } => save_build(SaveBuildArgs {
                catalog_path,
                input: token,
                title,
                description,
                season,
            }),
            LibraryCommands::List { season, author } => {
                list_builds(ListBuildsArgs { season, author })
            }
            LibraryCommands::Show { id } => show_build(ShowBuildArgs { catalog_path, id }),
            LibraryCommands::Update {
                id,
                token,
                title,
                description,
            } => update_build(UpdateBuildArgs {
                catalog_path,
                id,
                input: token,
                title,
                description,
            }),
            LibraryCommands::Delete { id } => delete_build(id),
            LibraryCommands::Lock { id } => lock_build(id),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show_config(),
            ConfigCommands::SetCatalog { path } => commands::config::set_catalog_path(path),
            ConfigCommands::SetLibraryDir { path } => commands::config::set_library_dir(path),
            ConfigCommands::SetAuthor { name } => commands::config::set_author(name),
            ConfigCommands::SetShareUrl { url } => commands::config::set_share_url(url),
            ConfigCommands::SetSeason { season } => commands::config::set_season(season),
            ConfigCommands::Reset => commands::config::reset_config(),
        },
    }
}
