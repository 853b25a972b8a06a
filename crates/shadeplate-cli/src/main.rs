//! Shadeplate command line entry point
//!
//! Run with:
//! ```bash
//! cargo run -p shadeplate-cli -- capture "Blue card" Base=#3366CC Shadow=#1A3366
//! cargo run -p shadeplate-cli -- apply blue-card "#CC3366"
//! ```

mod args;
mod error;
mod store;

use std::path::Path;

use clap::Parser;
use serde::Serialize;
use shadeplate_color::{HexColor, Oklch};
use shadeplate_rules::{Analysis, EngineSettings, Palette, RuleEngine, Template, TemplateStore};

use args::{parse_role_spec, Cli, Commands};
use error::{CliError, CliResult};
use store::{slugify, JsonDirStore};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult {
    let engine = load_engine(cli.settings.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Capture {
            name,
            roles,
            id,
            force,
        } => cmd_capture(&cli.store, &engine, name, roles, id, force, json),
        Commands::List => cmd_list(&cli.store, json),
        Commands::Show { id } => cmd_show(&cli.store, &id, json),
        Commands::Apply { id, base } => cmd_apply(&cli.store, &engine, &id, &base, json),
        Commands::Shift { id, role, color } => {
            cmd_shift(&cli.store, &engine, &id, &role, &color, json)
        }
        Commands::Delete { id } => cmd_delete(&cli.store, &id),
        Commands::Rule { base, dependent } => cmd_rule(&engine, &base, &dependent, json),
    }
}

fn load_engine(path: Option<&Path>) -> CliResult<RuleEngine> {
    let Some(path) = path else {
        return Ok(RuleEngine::default());
    };
    let settings_err = |reason: String| CliError::Settings {
        path: path.display().to_string(),
        reason,
    };
    let contents = std::fs::read_to_string(path).map_err(|e| settings_err(e.to_string()))?;
    let settings: EngineSettings =
        serde_json::from_str(&contents).map_err(|e| settings_err(e.to_string()))?;
    log::debug!("loaded engine settings from {}: {:?}", path.display(), settings);
    Ok(RuleEngine::new(settings)?)
}

fn load_template(store: &JsonDirStore, id: &str) -> CliResult<Template> {
    store
        .load(id)?
        .ok_or_else(|| CliError::NotFound(id.to_string()))
}

fn print_palette(palette: &Palette, json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(palette)?);
    } else {
        for (role, color) in palette.iter() {
            println!("{}\t{}", role, color);
        }
    }
    Ok(())
}

fn cmd_capture(
    store_dir: &Path,
    engine: &RuleEngine,
    name: String,
    specs: Vec<String>,
    id: Option<String>,
    force: bool,
    json: bool,
) -> CliResult {
    let mut analysis = Analysis::with_capacity(specs.len());
    for spec in &specs {
        let (role, labeled) = parse_role_spec(spec)?;
        if analysis.insert(role.clone(), labeled).is_some() {
            log::warn!("role '{}' given more than once, keeping the last value", role);
        }
    }

    let id = id.unwrap_or_else(|| slugify(&name));
    let mut store = JsonDirStore::open(store_dir)?;
    if !force && store.load(&id)?.is_some() {
        return Err(CliError::Exists(id));
    }

    let template = engine.capture(id, name, &analysis)?;
    store.save(&template)?;
    log::info!(
        "saved template '{}' with {} roles to {}",
        template.id(),
        template.len(),
        store.dir().display()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&template)?);
    } else {
        println!("{}", template.id());
    }
    Ok(())
}

#[derive(Serialize)]
struct ListEntry {
    id: String,
    name: String,
    roles: usize,
}

fn cmd_list(store_dir: &Path, json: bool) -> CliResult {
    let store = JsonDirStore::open(store_dir)?;
    let mut entries = Vec::new();
    for id in store.ids()? {
        match store.load(&id) {
            Ok(Some(template)) => entries.push(ListEntry {
                id,
                name: template.name().to_string(),
                roles: template.len(),
            }),
            Ok(None) => {}
            Err(e) => log::warn!("skipping {}: {}", id, e),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No templates in {}", store.dir().display());
    } else {
        for entry in &entries {
            println!("{}\t{}\t({} roles)", entry.id, entry.name, entry.roles);
        }
    }
    Ok(())
}

fn cmd_show(store_dir: &Path, id: &str, json: bool) -> CliResult {
    let store = JsonDirStore::open(store_dir)?;
    let template = load_template(&store, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    println!("{} ({})", template.name(), template.id());
    for (role, entry) in template.entries() {
        let lch = Oklch::from_hex(entry.original_color);
        match &entry.rule {
            Some(rule) => {
                let chroma = match rule.chroma_absolute {
                    Some(c) => format!("C={:.4}", c),
                    None => format!("C*{:.3}", rule.chroma_multiplier),
                };
                println!(
                    "  {:<12} {:<16} {} {}  {} {:.4} {} H{:+.1}",
                    role,
                    entry.label,
                    entry.original_color,
                    lch,
                    rule.lightness_mode,
                    rule.lightness_delta,
                    chroma,
                    rule.hue_delta
                );
            }
            None => println!(
                "  {:<12} {:<16} {} {}  (base)",
                role, entry.label, entry.original_color, lch
            ),
        }
    }
    Ok(())
}

fn cmd_apply(
    store_dir: &Path,
    engine: &RuleEngine,
    id: &str,
    base: &str,
    json: bool,
) -> CliResult {
    let new_base = HexColor::parse(base)?;
    let store = JsonDirStore::open(store_dir)?;
    let template = load_template(&store, id)?;
    print_palette(&engine.apply_template(&template, new_base), json)
}

fn cmd_shift(
    store_dir: &Path,
    engine: &RuleEngine,
    id: &str,
    role: &str,
    color: &str,
    json: bool,
) -> CliResult {
    let new_color = HexColor::parse(color)?;
    let store = JsonDirStore::open(store_dir)?;
    let template = load_template(&store, id)?;
    print_palette(&engine.shift_template(&template, role, new_color)?, json)
}

fn cmd_delete(store_dir: &Path, id: &str) -> CliResult {
    let mut store = JsonDirStore::open(store_dir)?;
    if !store.delete(id)? {
        return Err(CliError::NotFound(id.to_string()));
    }
    log::info!("deleted template '{}'", id);
    Ok(())
}

fn cmd_rule(engine: &RuleEngine, base: &str, dependent: &str, json: bool) -> CliResult {
    let base = HexColor::parse(base)?;
    let dependent = HexColor::parse(dependent)?;
    let rule = engine.compute_rule(base, dependent);

    if json {
        println!("{}", serde_json::to_string_pretty(&rule)?);
    } else {
        println!("base       {} {}", base, Oklch::from_hex(base));
        println!("dependent  {} {}", dependent, Oklch::from_hex(dependent));
        println!("lightness  {} {:.4}", rule.lightness_mode, rule.lightness_delta);
        match rule.chroma_absolute {
            Some(c) => println!("chroma     absolute {:.4}", c),
            None => println!("chroma     x{:.4}", rule.chroma_multiplier),
        }
        println!("hue        {:+.2}", rule.hue_delta);
    }
    Ok(())
}
