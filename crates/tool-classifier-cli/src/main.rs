use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use tool_classifier_core::category::{builtin_category, ClassificationConfig, StrategyKind};
use tool_classifier_core::config::Config;
use tool_classifier_core::{load_tool_list, Result, ToolClassifier, ToolDescriptor, UNCATEGORIZED};

mod args;
mod logging;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Classify {
            tools,
            strategy,
            json,
        }) => handle_classify(&base_dir, &tools, strategy.as_deref(), json),
        Some(Commands::Category {
            tools,
            name,
            strategy,
            json,
        }) => handle_category(&base_dir, &tools, &name, strategy.as_deref(), json),
        Some(Commands::Categories { strategy }) => {
            handle_categories(&base_dir, strategy.as_deref())
        }
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "tool-classifier", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("TOOL_CLASSIFIER_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".tool-classifier"))
        .unwrap_or_else(|| PathBuf::from(".tool-classifier"))
}

/// Resolve the strategy: CLI option > config file > default
fn resolve_strategy(config: &Config, strategy: Option<&str>) -> Result<StrategyKind> {
    match strategy {
        Some(tag) => tag.parse(),
        None => config.strategy_kind(),
    }
}

fn build_classifier(base_dir: &Path, strategy: Option<&str>) -> Result<ToolClassifier> {
    let config = Config::load(base_dir)?;
    let kind = resolve_strategy(&config, strategy)?;
    config.classifier_for(kind)
}

fn print_tool(tool: &ToolDescriptor) {
    if tool.description.is_empty() {
        println!("    {}", tool.name);
    } else {
        let desc: String = tool
            .description
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(60)
            .collect();
        println!("    {} {}", tool.name, desc.dimmed());
    }
}

fn handle_classify(
    base_dir: &Path,
    tools_path: &Path,
    strategy: Option<&str>,
    json: bool,
) -> Result<()> {
    let classifier = build_classifier(base_dir, strategy)?;
    let tools = load_tool_list(tools_path)?;
    let classified = classifier.classify_tools(&tools);

    if json {
        println!("{}", serde_json::to_string_pretty(&classified.into_map())?);
        return Ok(());
    }

    println!();
    println!(
        "Strategy: {}  ({} tools)",
        classifier.strategy_name().cyan().bold(),
        tools.len()
    );
    println!();

    for (category, members) in classified.iter() {
        if category == UNCATEGORIZED {
            continue;
        }
        println!("  {} ({})", category.cyan().bold(), members.len());
        for tool in members {
            print_tool(tool);
        }
        println!();
    }

    let uncategorized = classified.uncategorized();
    println!("  {} ({})", UNCATEGORIZED.dimmed(), uncategorized.len());
    for tool in uncategorized {
        print_tool(tool);
    }
    println!();

    if !uncategorized.is_empty() {
        eprintln!(
            "{} {} tool(s) matched no category: {}",
            "[WARN]".yellow().bold(),
            uncategorized.len(),
            uncategorized
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}

fn handle_category(
    base_dir: &Path,
    tools_path: &Path,
    name: &str,
    strategy: Option<&str>,
    json: bool,
) -> Result<()> {
    let classifier = build_classifier(base_dir, strategy)?;
    let tools = load_tool_list(tools_path)?;
    let members = classifier.get_tools_by_category(&tools, name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&members)?);
        return Ok(());
    }

    if members.is_empty() {
        println!("No tools in category: {}", name);
        return Ok(());
    }

    println!();
    println!("  {} ({})", name.cyan().bold(), members.len());
    for tool in members {
        print_tool(tool);
    }
    println!();

    Ok(())
}

fn handle_categories(base_dir: &Path, strategy: Option<&str>) -> Result<()> {
    let config = Config::load(base_dir)?;
    let kind = resolve_strategy(&config, strategy)?;
    let (table, source) = match config.custom_config(kind)? {
        Some(table) => (table, "custom"),
        None => (ClassificationConfig::builtin(kind), "builtin"),
    };

    // Surface errors and warnings the same way classification would
    let classifier = ToolClassifier::with_kind(kind, Some(table.clone()))?;

    println!();
    println!("Strategy: {} ({} table)", kind.id().cyan().bold(), source);
    println!();

    let rules: BTreeMap<String, Vec<String>> = match &table {
        ClassificationConfig::Explicit(mapping) => {
            let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for (tool, cats) in mapping {
                for cat in cats {
                    by_category.entry(cat.clone()).or_default().push(tool.clone());
                }
            }
            by_category
        }
        ClassificationConfig::Prefix(t) | ClassificationConfig::Keyword(t) => t.clone(),
    };

    for name in classifier.category_names() {
        println!("  {}", name.cyan().bold());
        if let Some(description) = category_description(name, source) {
            println!("    {}", description.dimmed());
        }
        let label = match kind {
            StrategyKind::Explicit => "Tools",
            StrategyKind::Prefix => "Prefixes",
            StrategyKind::Keyword => "Keywords",
        };
        let patterns = rules.get(name).map(|p| p.join(", ")).unwrap_or_default();
        println!("    {}: {}", label, patterns);
        println!();
    }

    for warning in classifier.warnings() {
        eprintln!("{} {}", "[WARN]".yellow().bold(), warning);
    }

    Ok(())
}

/// Built-in descriptions only apply to the built-in tables
fn category_description(name: &str, source: &str) -> Option<&'static str> {
    if source != "builtin" {
        return None;
    }
    builtin_category(name).map(|c| c.description)
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list()? {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_table_hides_builtin_description() {
        assert!(category_description("booking", "builtin").is_some());
        assert!(category_description("booking", "custom").is_none());
        assert!(category_description("notification", "builtin").is_none());
    }
}
