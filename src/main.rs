//! Priority Sherpa console
//!
//! Reads one command per line from stdin. Logs go to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use priority_sherpa::application::{
    ApplicationError, ComparisonSessionStore, ComparisonView, GetComparisonResultHandler,
    GetComparisonResultQuery, OrderStore, ReorderCoordinator, ResetComparisonCommand,
    ResetComparisonHandler, StartComparisonCommand, StartComparisonHandler,
    SubmitJudgmentCommand, SubmitJudgmentHandler, DEFAULT_COMPARISON_KEY, DEFAULT_ORDER_KEY,
};
use priority_sherpa::config::{AppConfig, LoggingConfig};
use priority_sherpa::domain::comparison::Criterion;
use priority_sherpa::domain::foundation::{CriterionId, DomainError, ItemId, ValidationError};
use priority_sherpa::domain::prioritization::{PrioritizedItem, ScoreStatus, ValueAttributes};

const HELP: &str = "\
commands:
  criteria <id>,<id>,...        start (or resume) a comparison
  judge <a> <b> <value>         a is <value> times as important as b (e.g. 3, 1/5)
  weights                       show weights and consistency
  reset                         discard all judgments
  items <id>:<title>,...        load a new item list
  move <from> <to>              move an item (1-based positions)
  undo | redo                   step through order history
  show                          show the ranked items
  quit";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Criteria(Vec<String>),
    Judge { first: String, second: String, value: f64 },
    Weights,
    Reset,
    Items(Vec<(String, String)>),
    Move { from: usize, to: usize },
    Undo,
    Redo,
    Show,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or("empty command")?;
        let rest: Vec<&str> = words.collect();

        match (name, rest.as_slice()) {
            ("criteria", _) if !rest.is_empty() => Ok(Command::Criteria(split_list(&rest.join(" ")))),
            ("judge", [first, second, value]) => Ok(Command::Judge {
                first: first.to_string(),
                second: second.to_string(),
                value: parse_value(value)?,
            }),
            ("weights", []) => Ok(Command::Weights),
            ("reset", []) => Ok(Command::Reset),
            ("items", _) if !rest.is_empty() => {
                let items = split_list(&rest.join(" "))
                    .into_iter()
                    .map(|entry| match entry.split_once(':') {
                        Some((id, title)) => (id.trim().to_string(), title.trim().to_string()),
                        None => (entry.clone(), entry),
                    })
                    .collect();
                Ok(Command::Items(items))
            }
            ("move", [from, to]) => Ok(Command::Move {
                from: parse_position(from)?,
                to: parse_position(to)?,
            }),
            ("undo", []) => Ok(Command::Undo),
            ("redo", []) => Ok(Command::Redo),
            ("show", []) => Ok(Command::Show),
            ("help", []) => Ok(Command::Help),
            ("quit", []) | ("exit", []) => Ok(Command::Quit),
            _ => Err(format!("unrecognised command '{}' (try 'help')", line.trim())),
        }
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts decimals and fractions such as `1/3`.
fn parse_value(raw: &str) -> Result<f64, String> {
    let invalid = || format!("'{}' is not a number", raw);
    match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().map_err(|_| invalid())?;
            let den: f64 = den.parse().map_err(|_| invalid())?;
            Ok(num / den)
        }
        None => raw.parse().map_err(|_| invalid()),
    }
}

/// Converts a 1-based position to an index.
fn parse_position(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .ok()
        .and_then(|p| p.checked_sub(1))
        .ok_or_else(|| format!("'{}' is not a position (1, 2, ...)", raw))
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("priority_sherpa={}", logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

struct Console {
    start: StartComparisonHandler,
    submit: SubmitJudgmentHandler,
    reset: ResetComparisonHandler,
    result: GetComparisonResultHandler,
    coordinator: ReorderCoordinator,
    orders: OrderStore,
}

impl Console {
    async fn run(&mut self, command: Command) -> Result<bool, ApplicationError> {
        self.coordinator.drain_responses();

        match command {
            Command::Criteria(ids) => {
                let criteria = ids
                    .into_iter()
                    .map(|id| Ok(Criterion::new(CriterionId::new(id.clone())?, id)))
                    .collect::<Result<Vec<_>, ValidationError>>()?;
                let result = self.start.handle(StartComparisonCommand { criteria }).await?;
                if !result.started_fresh {
                    println!("resumed saved comparison");
                }
                print_comparison(&result.view);
            }
            Command::Judge { first, second, value } => {
                let cmd = SubmitJudgmentCommand {
                    first: CriterionId::new(first)?,
                    second: CriterionId::new(second)?,
                    value,
                };
                print_comparison(&self.submit.handle(cmd).await?.view);
            }
            Command::Weights => {
                print_comparison(&self.result.handle(GetComparisonResultQuery).await?);
            }
            Command::Reset => {
                print_comparison(&self.reset.handle(ResetComparisonCommand).await?.view);
            }
            Command::Items(entries) => {
                let items = entries
                    .into_iter()
                    .map(|(id, title)| {
                        Ok(PrioritizedItem::new(ItemId::new(id)?, title, ValueAttributes::default()))
                    })
                    .collect::<Result<Vec<_>, ValidationError>>()?;
                self.coordinator.load_items(items)?;
                self.save_order().await?;
                print_items(&self.coordinator);
            }
            Command::Move { from, to } => {
                self.coordinator.move_item(from, to)?;
                self.save_order().await?;
                print_items(&self.coordinator);
            }
            Command::Undo => {
                if self.coordinator.undo().is_none() {
                    println!("nothing to undo");
                }
                self.save_order().await?;
                print_items(&self.coordinator);
            }
            Command::Redo => {
                if self.coordinator.redo().is_none() {
                    println!("nothing to redo");
                }
                self.save_order().await?;
                print_items(&self.coordinator);
            }
            Command::Show => print_items(&self.coordinator),
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn save_order(&self) -> Result<(), ApplicationError> {
        Ok(self.coordinator.save_order(&self.orders).await?)
    }
}

fn print_comparison(view: &ComparisonView) {
    println!("progress {}/{}", view.progress.answered, view.progress.total);
    for weight in view.ranked_weights() {
        println!("  {:<20} {:.3}", weight.criterion_id, weight.weight);
    }
    let flag = if view.is_consistent { "ok" } else { "INCONSISTENT" };
    println!("consistency ratio {:.3} ({})", view.consistency.ratio, flag);
    if let Some(next) = &view.next_pair {
        println!("next: how much more important is '{}' than '{}'?", next.first, next.second);
    }
}

fn print_items(coordinator: &ReorderCoordinator) {
    for item in coordinator.items() {
        let score = item
            .score
            .map(|s| format!("{:.1}", s))
            .unwrap_or_else(|| "-".to_string());
        let tier = item
            .tier
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  #{:<3} {:<12} {:<30} score {:>6} {}",
            item.order_index + 1,
            item.id,
            item.title,
            score,
            tier
        );
    }
    match coordinator.score_status() {
        ScoreStatus::Fresh => {}
        ScoreStatus::Recalculating { .. } => println!("(scores recalculating)"),
        ScoreStatus::Stale { reason } => println!("(scores stale: {})", reason),
    }
    let engine = coordinator.engine();
    if let Some(label) = engine.history().undo_label() {
        println!("undo: {}", label);
    }
    if let Some(label) = engine.history().redo_label() {
        println!("redo: {}", label);
    }
}

/// Logs a failed command and returns its coded form for display.
fn report_failure(err: ApplicationError) -> DomainError {
    let err = DomainError::from(err);
    error!(code = %err.code, error = %err.message, "Command failed");
    err
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let store = config.storage.build_store();
    let scorer = config.scoring.build_service()?;
    info!(
        storage = ?config.storage.backend,
        scorer = scorer.name(),
        history = config.history.capacity,
        "Starting priority-sherpa"
    );

    let sessions = ComparisonSessionStore::new(Arc::clone(&store), DEFAULT_COMPARISON_KEY)
        .with_consistency_threshold(config.comparison.consistency_threshold);
    let orders = OrderStore::new(store, DEFAULT_ORDER_KEY);

    let mut coordinator =
        ReorderCoordinator::with_items(Vec::new(), config.history.build_store(), scorer)?
            .with_timeout(config.scoring.timeout());
    coordinator.restore_order(&orders).await;

    let mut console = Console {
        start: StartComparisonHandler::new(sessions.clone()),
        submit: SubmitJudgmentHandler::new(sessions.clone()),
        reset: ResetComparisonHandler::new(sessions.clone()),
        result: GetComparisonResultHandler::new(sessions),
        coordinator,
        orders,
    };

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        match console.run(command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("error: {}", report_failure(e)),
        }
    }

    console.coordinator.settle().await;
    console.save_order().await?;
    Ok(())
}
