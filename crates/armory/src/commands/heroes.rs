use armory_catalog::{Hero, HeroId, HeroRole, Perk, Rarity};
use colored::Colorize;
use miette::Result;

use crate::errors::CliError;
use crate::println_pad;
use crate::utils::{format_attribute, format_credits, load_catalog};

#[derive(Debug, Clone)]
pub struct ListHeroesArgs {
    pub catalog_path: Option<String>,
    pub role: Option<HeroRole>,
}

#[derive(Debug, Clone)]
pub struct ShowHeroArgs {
    pub catalog_path: Option<String>,
    pub id: HeroId,
}

fn role_icon(role: HeroRole) -> &'static str {
    match role {
        HeroRole::Tank => "🛡️",
        HeroRole::Damage => "⚔️",
        HeroRole::Support => "✚",
    }
}

pub fn list_heroes(args: ListHeroesArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog_path.as_deref())?;

    println_pad!(
        "{} {}",
        "📚 Catalog:".bright_blue().bold(),
        catalog.version().bright_cyan().bold()
    );

    let roles = match args.role {
        Some(role) => vec![role],
        None => catalog.roles(),
    };

    for role in roles {
        println_pad!(
            "\n{} {}",
            role_icon(role),
            role.to_string().to_uppercase().bright_magenta().bold()
        );
        for hero in catalog.heroes_with_role(role) {
            println_pad!(
                "   {} {:>4}  {}",
                "•".bright_cyan(),
                hero.id().to_string().dimmed(),
                hero.name().bright_white().bold()
            );
        }
    }

    Ok(())
}

pub fn show_hero(args: ShowHeroArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog_path.as_deref())?;
    let hero = catalog
        .hero(args.id)
        .ok_or(CliError::HeroNotFound { id: args.id })?;

    println_pad!(
        "{} {} {}",
        role_icon(hero.role()),
        hero.name().bright_cyan().bold(),
        format!("(id: {}, {})", hero.id(), hero.role()).dimmed()
    );

    println_pad!("\n{}", "⚡ Powers:".bright_magenta().bold());
    for power in hero.powers() {
        println_pad!(
            "   {} {} {}",
            "•".bright_cyan(),
            power.name().bright_white().bold(),
            format!("({})", power.id()).dimmed()
        );
        if !power.description.is_empty() {
            println_pad!("      {}", power.description);
        }
        for attribute in power.attributes() {
            if attribute.stat().is_some() {
                println_pad!("      {}", format_attribute(&catalog, attribute).bright_green());
            }
        }
    }

    for rarity in [Rarity::Common, Rarity::Rare, Rarity::Epic] {
        print_items(&catalog, hero, rarity);
    }

    let basic = catalog.basic_items().len();
    if basic > 0 {
        println_pad!(
            "\n{}",
            format!("Plus {} basic items available to every hero.", basic).dimmed()
        );
    }

    Ok(())
}

fn print_items(catalog: &armory_catalog::Catalog, hero: &Hero, rarity: Rarity) {
    let items: Vec<_> = hero.items_of_rarity(rarity).collect();
    if items.is_empty() {
        return;
    }

    let header = format!("🛒 {} items:", capitalize(&rarity.to_string()));
    println_pad!("\n{}", header.bright_yellow().bold());
    for item in items {
        let stack = if item.stackable { " (stackable)" } else { "" };
        println_pad!(
            "   {} {} {} {}{}",
            "•".bright_cyan(),
            item.name().bright_white().bold(),
            format!("({}, {})", item.id(), item.category).dimmed(),
            format!("{} credits", format_credits(item.price.into())).bright_yellow(),
            stack.dimmed()
        );
        let stats: Vec<_> = item
            .attributes()
            .iter()
            .map(|attribute| format_attribute(catalog, attribute))
            .filter(|line| !line.is_empty())
            .collect();
        if !stats.is_empty() {
            println_pad!("      {}", stats.join(", ").bright_green());
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
