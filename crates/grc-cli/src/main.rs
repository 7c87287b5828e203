//! `grc` command-line front end for audit scope selection.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use grc_audit::{load_scope_tables, GrcConfig, RiskRating, RiskReevaluation, ScopeUpdate};
use grc_scope::{expand, sanitize, DisplayEntity, ScopeId, ScopeTables, Selection};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn catalog_arg() -> Arg {
    Arg::new("catalog")
        .long("catalog")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("YAML or JSON file with macroprocesos, procesos and subprocesos")
}

fn select_arg() -> Arg {
    Arg::new("select")
        .long("select")
        .action(ArgAction::Append)
        .help("Selected scope id (macroproceso-<id>, process-<id>, subproceso-<id>); repeatable")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn rating_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(value_parser!(u8))
        .help(help)
}

fn cli() -> Command {
    Command::new("grc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Audit scope selection and risk re-evaluation")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("YAML or JSON configuration file"),
        )
        .subcommand(
            Command::new("expand")
                .about("Show every entity a selection covers")
                .arg(catalog_arg())
                .arg(select_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("toggle")
                .about("Apply one checkbox toggle and print the resulting selection")
                .arg(catalog_arg())
                .arg(select_arg())
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .help("Scope id being toggled"),
                )
                .arg(
                    Arg::new("off")
                        .long("off")
                        .action(ArgAction::SetTrue)
                        .help("Deselect instead of select"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("risk")
                .about("Score a risk and optionally its re-evaluation")
                .arg(rating_arg("probability", "Inherent probability (1-5)").required(true))
                .arg(rating_arg("impact", "Inherent impact (1-5)").required(true))
                .arg(
                    rating_arg("residual-probability", "Residual probability (1-5)")
                        .requires("residual-impact"),
                )
                .arg(
                    rating_arg("residual-impact", "Residual impact (1-5)")
                        .requires("residual-probability"),
                )
                .arg(json_arg()),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GrcConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => GrcConfig::default(),
    };
    init_tracing(&config);
    tracing::debug!(?config, "configuration loaded");

    match matches.subcommand() {
        Some(("expand", args)) => run_expand(args),
        Some(("toggle", args)) => run_toggle(args),
        Some(("risk", args)) => run_risk(args, &config),
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}

fn init_tracing(config: &GrcConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_tables(args: &ArgMatches) -> Result<ScopeTables> {
    let path = args
        .get_one::<PathBuf>("catalog")
        .context("--catalog is required")?;
    load_scope_tables(path).with_context(|| format!("loading catalog from {}", path.display()))
}

fn parse_selection(args: &ArgMatches) -> Result<Selection> {
    args.get_many::<String>("select")
        .into_iter()
        .flatten()
        .map(|raw| {
            raw.parse::<ScopeId>()
                .with_context(|| format!("invalid --select value '{raw}'"))
        })
        .collect()
}

fn run_expand(args: &ArgMatches) -> Result<()> {
    let tables = load_tables(args)?;
    let selection = parse_selection(args)?;
    let expansion = expand(&selection, &tables.catalog());

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&expansion)?);
        return Ok(());
    }

    let groups = &expansion.display_groups;
    print_group("Macroprocesses", &groups.macroprocesos);
    print_group("Processes", &groups.procesos);
    print_group("Subprocesses", &groups.subprocesos);
    println!("{} entities in scope", expansion.expanded_entities.len());
    Ok(())
}

fn print_group(title: &str, entries: &[DisplayEntity]) {
    println!("{title}");
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        let marker = if entry.is_child { "  (auto)" } else { "" };
        println!("  {:<10} {}{}", entry.code, entry.name, marker);
    }
}

fn run_toggle(args: &ArgMatches) -> Result<()> {
    let tables = load_tables(args)?;
    let selection = parse_selection(args)?;
    let raw_id = args.get_one::<String>("id").context("--id is required")?;
    let toggled: ScopeId = raw_id
        .parse()
        .with_context(|| format!("invalid --id value '{raw_id}'"))?;
    let selected = !args.get_flag("off");

    let next = sanitize(&selection, &toggled, selected, &tables.catalog());
    let update = ScopeUpdate::from(&next);

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&update)?);
    } else {
        for id in &update.scope_entities {
            println!("{id}");
        }
    }
    Ok(())
}

fn run_risk(args: &ArgMatches, config: &GrcConfig) -> Result<()> {
    let rating = |p: &str, i: &str| -> Result<Option<RiskRating>> {
        match (args.get_one::<u8>(p), args.get_one::<u8>(i)) {
            (Some(&probability), Some(&impact)) => Ok(Some(RiskRating::new(probability, impact)?)),
            _ => Ok(None),
        }
    };

    let inherent = rating("probability", "impact")?.context("--probability and --impact are required")?;
    let residual = rating("residual-probability", "residual-impact")?;
    let thresholds = &config.risk;

    match residual {
        Some(residual) => {
            let assessment = RiskReevaluation::new(inherent, residual).assess(thresholds);
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!(
                    "inherent {} ({}) -> residual {} ({}), delta {:+}",
                    assessment.inherent_score,
                    assessment.inherent_level,
                    assessment.residual_score,
                    assessment.residual_level,
                    assessment.score_delta
                );
            }
        }
        None => {
            let level = inherent.level(thresholds);
            if args.get_flag("json") {
                let value = serde_json::json!({ "score": inherent.score(), "level": level });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("score {} ({level})", inherent.score());
            }
        }
    }
    Ok(())
}
