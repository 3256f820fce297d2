//! laneboard CLI: terminal board for timeline groups with custom labels

use clap::{Parser, Subcommand, ValueEnum};
use laneboard_core::{
    dataset_problems, render_group_label, ActionGroupTemplate, BasicViewFactory, Dataset,
    EntityId, RenderOptions, TimelineGroup, TimelineItem, ViewRegistry,
};
use laneboard_tui::{IconMode, Theme, UiConfig};
use std::path::{Path, PathBuf};

/// Timeline group board with customizable group labels
#[derive(Parser)]
#[command(name = "laneboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the board TUI (default when no command specified)
    Tui {
        /// Load items/groups/options from a JSON file
        #[arg(long)]
        data: Option<PathBuf>,

        /// Color theme
        #[arg(long, value_enum, default_value_t = ThemeChoice::Mocha)]
        theme: ThemeChoice,

        /// Force ASCII icons and borders
        #[arg(long)]
        ascii: bool,

        /// Start with default group labels instead of the custom template
        #[arg(long)]
        plain: bool,
    },

    /// Render one group's label headlessly and print its text
    Render {
        /// Group id to render; omit to exercise the unknown-group path
        #[arg(long)]
        group: Option<String>,

        /// Load items/groups/options from a JSON file
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Validate a data file and report problems
    Validate {
        /// JSON data file to check
        data: PathBuf,
    },
}

/// Selectable color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeChoice {
    Mocha,
    Latte,
    HighContrast,
}

impl ThemeChoice {
    fn to_theme(self) -> Theme {
        match self {
            Self::Mocha => Theme::mocha(),
            Self::Latte => Theme::latte(),
            Self::HighContrast => Theme::high_contrast(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Tui {
        data: None,
        theme: ThemeChoice::Mocha,
        ascii: false,
        plain: false,
    });

    match command {
        Commands::Tui {
            data,
            theme,
            ascii,
            plain,
        } => {
            let dataset = match load_or_sample(data.as_deref()) {
                Ok(dataset) => dataset,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };

            let icon_mode = if ascii {
                IconMode::Ascii
            } else {
                IconMode::detect()
            };
            let config = UiConfig {
                theme: theme.to_theme(),
                icon_mode,
                with_template: !plain,
            };

            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = rt.block_on(laneboard_tui::run_tui(dataset, config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Render { group, data } => {
            let dataset = match load_or_sample(data.as_deref()) {
                Ok(dataset) => dataset,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            match cmd_render(&dataset, group.as_deref()) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { data } => {
            let dataset = match load_dataset(&data) {
                Ok(dataset) => dataset,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            let problems = dataset_problems(&dataset.items, &dataset.groups);
            if problems.is_empty() {
                println!(
                    "ok: {} items, {} groups",
                    dataset.items.len(),
                    dataset.groups.len()
                );
            } else {
                for problem in &problems {
                    eprintln!("error: {problem}");
                }
                std::process::exit(1);
            }
        }
    }
}

/// Render a group's label through the full template contract.
///
/// `group` of `None` drives the widget's unknown-group sentinel path.
fn cmd_render(dataset: &Dataset, group: Option<&str>) -> Result<String, String> {
    let group = match group {
        Some(raw) => {
            let id = parse_entity_id(raw);
            let found = dataset.groups.iter().find(|g| g.id == id);
            match found {
                Some(group) => Some(group.clone()),
                None => return Err(format!("group {id} not found in data")),
            }
        }
        None => None,
    };

    let mut factory = BasicViewFactory::new();
    let mut registry = ViewRegistry::new();
    let node = render_group_label(
        &ActionGroupTemplate,
        group.as_ref(),
        &mut factory,
        &mut registry,
    );
    let text = node.visible_text();
    registry.release_all();
    Ok(text)
}

/// Parse a group id: numeric when it looks numeric, string otherwise.
fn parse_entity_id(raw: &str) -> EntityId {
    match raw.parse::<i64>() {
        Ok(n) => EntityId::Num(n),
        Err(_) => EntityId::Text(raw.to_string()),
    }
}

fn load_or_sample(path: Option<&Path>) -> Result<Dataset, String> {
    match path {
        Some(path) => load_dataset(path),
        None => Ok(sample_dataset()),
    }
}

fn load_dataset(path: &Path) -> Result<Dataset, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("cannot parse {}: {e}", path.display()))
}

/// Built-in demo data: five tasks across three teams in early January.
fn sample_dataset() -> Dataset {
    use chrono::TimeZone;
    let day = |d: u32| chrono::Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();

    Dataset {
        items: vec![
            TimelineItem::new(1, "Task 1", day(1))
                .with_group(1)
                .with_end(day(3)),
            TimelineItem::new(2, "Task 2", day(4))
                .with_group(1)
                .with_end(day(6)),
            TimelineItem::new(3, "Task 3", day(2))
                .with_group(2)
                .with_end(day(8)),
            TimelineItem::new(4, "Task 4", day(7))
                .with_group(2)
                .with_end(day(10)),
            TimelineItem::new(5, "Task 5", day(5))
                .with_group(3)
                .with_end(day(12)),
        ],
        groups: vec![
            TimelineGroup::new(1, "Development Team"),
            TimelineGroup::new(2, "Design Team"),
            TimelineGroup::new(3, "QA Team"),
        ],
        options: RenderOptions {
            stack: Some(true),
            editable: Some(false),
            show_current_time: Some(false),
            width: Some("100%".to_string()),
            height: Some("400px".to_string()),
            ..RenderOptions::default()
        },
    }
}
