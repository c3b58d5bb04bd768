use std::env;
use std::sync::Arc;

use crate::build::{aggregate, decode, format_loadout, format_total_stats};
use crate::data::catalog::{Catalog, CatalogStore};
use crate::data::item::{load_item_catalog, DEFAULT_ITEMS_PATH};
use crate::data::rank::{rank_items, stat_display_name, RANKABLE_STATS};
use crate::data::validate::validate_items;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Build,
    Item,
    Rank,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("build") => Some(Command::Build),
        Some("item") => Some(Command::Item),
        Some("rank") => Some(Command::Rank),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Build) => handle_build(args),
        Some(Command::Item) => handle_item(args),
        Some(Command::Rank) => handle_rank(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: gearforge <serve|build|item|rank|validate>");
            2
        }
    }
}

fn items_path_from_env() -> String {
    env::var("GEARFORGE_ITEMS").unwrap_or_else(|_| DEFAULT_ITEMS_PATH.to_string())
}

fn load_catalog() -> Option<Catalog> {
    match load_item_catalog(items_path_from_env()) {
        Ok(items) => Some(Catalog::from_items(items)),
        Err(err) => {
            eprintln!("failed to load item catalog: {err}");
            None
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("GEARFORGE_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let Some(catalog) = load_catalog() else {
        return 1;
    };
    let store = Arc::new(CatalogStore::new(catalog));
    match server::run_server(&bind_addr, store) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_build(args: &[String]) -> i32 {
    let Some(code) = args.get(2) else {
        eprintln!("usage: gearforge build <build-code>");
        return 2;
    };

    let loadout = match decode(code) {
        Ok(loadout) => loadout,
        Err(err) => {
            eprintln!("decode failed: {err}");
            return 1;
        }
    };
    let Some(catalog) = load_catalog() else {
        return 1;
    };

    let stats = aggregate(&loadout, &catalog);
    println!("{}", format_loadout(&loadout, &catalog));
    println!("[Total Stats]");
    println!("{}", format_total_stats(&stats));
    0
}

fn handle_item(args: &[String]) -> i32 {
    let Some(query) = args.get(2) else {
        eprintln!("usage: gearforge item <id-or-name>");
        return 2;
    };
    let Some(catalog) = load_catalog() else {
        return 1;
    };

    let item = catalog
        .find_by_id(query)
        .or_else(|| catalog.find_by_name(query));
    match item {
        Some(item) => match serde_json::to_string_pretty(item) {
            Ok(payload) => {
                println!("{payload}");
                0
            }
            Err(err) => {
                eprintln!("failed to serialize item: {err}");
                1
            }
        },
        None => {
            eprintln!("no item matching '{query}'");
            1
        }
    }
}

fn handle_rank(args: &[String]) -> i32 {
    let Some(stat) = args.get(2) else {
        eprintln!("usage: gearforge rank <stat> [main-type]");
        return 2;
    };
    let stat = stat.to_lowercase();
    if !RANKABLE_STATS.contains(&stat.as_str()) {
        eprintln!("unknown stat '{stat}'; expected one of: {}", RANKABLE_STATS.join(", "));
        return 2;
    }
    let main_type = args.get(3).map(String::as_str);

    let Some(catalog) = load_catalog() else {
        return 1;
    };
    let ranked = rank_items(&catalog, &stat, main_type);

    println!("{} ranking ({} items)", stat_display_name(&stat), ranked.len());
    for (position, item) in ranked.iter().enumerate() {
        println!("{:>3}. {} ({}) - {}", position + 1, item.name, item.rarity, item.value);
    }
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let path = args
        .get(2)
        .cloned()
        .unwrap_or_else(items_path_from_env);

    let items = match load_item_catalog(&path) {
        Ok(items) => items,
        Err(err) => {
            eprintln!("failed to load item catalog '{path}': {err}");
            return 1;
        }
    };

    let report = validate_items(&items);
    if report.diagnostics.is_empty() {
        println!("validation passed: {path}");
        return 0;
    }

    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {path}");
        1
    } else {
        println!("validation passed with warnings: {path}");
        0
    }
}
