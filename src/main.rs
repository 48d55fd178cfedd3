mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dashboard::config::{ClientConfig, normalize_base_url};
use dashboard::net::api::{ApiError, HttpSimulationApi, SimulationApi};
use dashboard::net::poller::{AgentListState, spawn_agent_poller};
use dashboard::net::types::{AgentId, Rarity};
use dashboard::state::agents::{AgentDetailView, agent_list_totals};
use dashboard::state::events::{EventTypeFilter, EventsView};
use dashboard::state::inventory::{CardDetail, InventorySort, InventoryView};
use dashboard::state::market::{MarketSort, load_market};
use dashboard::state::runner::{RunError, RunnerInput, SimulationRunner};
use dashboard::state::search::search_agents;
use dashboard::state::selection::{AgentSelection, fetch_selection};
use dashboard::state::snapshot::{SessionStore, StoreError, ViewSnapshot};
use dashboard::state::world::WorldSummary;
use pager::PaginationOptions;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown sort `{0}`")]
    UnknownSort(String),
    #[error("card `{card}` not found for agent {agent_id}")]
    CardNotFound { agent_id: AgentId, card: String },
    #[error("{0}")]
    View(String),
}

#[derive(Parser, Debug)]
#[command(name = "polydros-dash", about = "Dashboard for the Polydros trading-card economy simulation")]
struct Cli {
    #[arg(long, env = "POLYDROS_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "POLYDROS_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, env = "POLYDROS_POLL_INTERVAL_MS")]
    poll_interval_ms: Option<u64>,

    /// Print views as pretty JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log verbosity on stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Advance the simulation.
    Run(RunArgs),
    /// Return to tick 0, keeping seed and agent count.
    Reset,
    /// World summary at the current tick.
    World,
    /// Events from the last run.
    Events(EventsArgs),
    /// Agent list.
    Agents {
        /// Keep refreshing until Ctrl-C.
        #[arg(long)]
        watch: bool,
    },
    /// One agent's traits, deck, and events.
    Agent {
        id: AgentId,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        events_page: i64,
    },
    /// One agent's card collection.
    Cards(CardsArgs),
    /// Every priced card across all agents.
    Market(MarketArgs),
    /// Find cards by name across all agents.
    Search { term: String },
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,
    #[arg(long)]
    agents: Option<u32>,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    ticks: i64,
}

#[derive(Args, Debug)]
struct EventsArgs {
    #[arg(long = "type")]
    event_type: Option<String>,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,
    #[arg(long)]
    page_size: Option<i64>,
}

#[derive(Args, Debug)]
struct CardsArgs {
    id: AgentId,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    rarity: Option<String>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long, default_value = "name")]
    sort: String,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,
    /// Show one card by instance id or card id.
    #[arg(long)]
    card: Option<String>,
}

#[derive(Args, Debug)]
struct MarketArgs {
    #[arg(long)]
    rarity: Option<String>,
    #[arg(long)]
    seller: Option<AgentId>,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "price-low")]
    sort: String,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,
}

struct App {
    api: Arc<HttpSimulationApi>,
    store: SessionStore,
    snapshot: ViewSnapshot,
    poll_interval: Duration,
    json: bool,
}

#[derive(Serialize)]
struct RunReport<'a> {
    tick: u64,
    world: Option<&'a WorldSummary>,
    events: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", render::error_line(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = normalize_base_url(&base_url);
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    if let Some(ms) = cli.poll_interval_ms {
        config.poll_interval = Duration::from_millis(ms.max(1));
    }

    let api = Arc::new(HttpSimulationApi::from_config(&config)?);
    let store = SessionStore::new(config.session_file.clone());
    let snapshot = store.load().await;
    info!(base_url = %config.base_url, session = %store.path().display(), "dashboard ready");

    let mut app = App { api, store, snapshot, poll_interval: config.poll_interval, json: cli.json };

    match cli.command {
        Command::Run(args) => run_simulation(&mut app, args).await,
        Command::Reset => run_reset(&mut app).await,
        Command::World => show_world(&app),
        Command::Events(args) => show_events(&app, args),
        Command::Agents { watch: false } => show_agents(&mut app).await,
        Command::Agents { watch: true } => watch_agents(&mut app).await,
        Command::Agent { id, events_page } => show_agent(&app, id, events_page).await,
        Command::Cards(args) => show_cards(&app, args).await,
        Command::Market(args) => show_market(&app, args).await,
        Command::Search { term } => show_search(&app, &term).await,
    }
}

// =============================================================================
// SIMULATION
// =============================================================================

async fn run_simulation(app: &mut App, args: RunArgs) -> Result<(), CliError> {
    let mut runner = SimulationRunner::from_snapshot(&app.snapshot);
    let input = RunnerInput {
        seed: args.seed.unwrap_or(runner.params.seed),
        agents: args.agents.unwrap_or(runner.params.agent_count),
        ticks: args.ticks,
    };
    runner.advance(app.api.as_ref(), &input).await?;

    runner.write_to(&mut app.snapshot);
    app.store.save(&app.snapshot).await?;

    if app.json {
        return print_json(&RunReport { tick: runner.current_tick, world: runner.world.as_ref(), events: runner.events.len() });
    }
    println!("Advanced to tick {} ({} events)", runner.current_tick, runner.events.len());
    print!("{}", render::world(runner.world.as_ref()));
    Ok(())
}

async fn run_reset(app: &mut App) -> Result<(), CliError> {
    let mut runner = SimulationRunner::from_snapshot(&app.snapshot);
    if !runner.can_reset() {
        info!("simulation already at tick 0");
    }
    runner.reset();
    runner.write_to(&mut app.snapshot);
    app.snapshot.agents.clear();
    app.store.save(&app.snapshot).await?;

    if app.json {
        return print_json(&app.snapshot);
    }
    println!("Simulation reset to tick 0");
    Ok(())
}

fn show_world(app: &App) -> Result<(), CliError> {
    if app.json {
        return print_json(&app.snapshot.world);
    }
    println!("{}", render::world(app.snapshot.world.as_ref()));
    Ok(())
}

fn show_events(app: &App, args: EventsArgs) -> Result<(), CliError> {
    let options = args.page_size.map(PaginationOptions::with_page_size).unwrap_or_default();
    let mut view = EventsView::with_options(app.snapshot.events.clone(), options);
    view.set_type_filter(EventTypeFilter::parse(args.event_type.as_deref()));
    view.set_search(args.search);
    view.set_page(args.page);

    let page = view.page();
    if app.json {
        return print_json(&page);
    }
    print!("{}", render::events(&page));
    Ok(())
}

// =============================================================================
// AGENTS
// =============================================================================

async fn show_agents(app: &mut App) -> Result<(), CliError> {
    match app.api.list_agents().await {
        Ok(agents) => {
            app.snapshot.agents = agents;
            app.store.save(&app.snapshot).await?;
        }
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "agent list fetch failed; showing stored list");
            println!("{}", render::error_line(&e.to_string()));
        }
    }

    if app.json {
        return print_json(&app.snapshot.agents);
    }
    print!("{}", render::agent_list(&app.snapshot.agents, &agent_list_totals(&app.snapshot.agents)));
    Ok(())
}

async fn watch_agents(app: &mut App) -> Result<(), CliError> {
    let api: Arc<dyn SimulationApi> = app.api.clone();
    let mut poller = spawn_agent_poller(api, app.poll_interval);
    let mut last_good = Vec::new();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            next = poller.next() => {
                let Some(state) = next else { break };
                print_agent_state(app.json, &state)?;
                if state.last_error.is_none() {
                    last_good = state.agents;
                }
            }
        }
    }
    poller.stop();

    if !last_good.is_empty() {
        app.snapshot.agents = last_good;
        app.store.save(&app.snapshot).await?;
    }
    Ok(())
}

fn print_agent_state(json: bool, state: &AgentListState) -> Result<(), CliError> {
    if state.loading {
        return Ok(());
    }
    if json {
        return print_json(&state.agents);
    }
    if let Some(error) = &state.last_error {
        println!("{}", render::error_line(error));
    }
    println!("{}", render::agent_list(&state.agents, &agent_list_totals(&state.agents)));
    Ok(())
}

async fn show_agent(app: &App, id: AgentId, events_page: i64) -> Result<(), CliError> {
    let mut selection = AgentSelection::default();
    let ticket = selection.select(id);
    let response = fetch_selection(app.api.as_ref(), &ticket).await;
    selection.apply(&ticket, response);

    if let Some(error) = selection.detail_error.take() {
        return Err(CliError::View(error));
    }
    let Some(detail) = selection.detail.take() else {
        return Err(CliError::View(format!("no data for agent {id}")));
    };
    let mut view = AgentDetailView::new(detail);
    view.set_events_page(events_page);
    let report = view.report();

    if app.json {
        return print_json(&report);
    }
    print!("{}", render::agent_detail(&report));
    match (&selection.inventory, &selection.inventory_error) {
        (Some(inventory), _) => println!("Inventory: {} cards", inventory.cards.len()),
        (None, Some(error)) => println!("{}", render::error_line(error)),
        (None, None) => {}
    }
    Ok(())
}

// =============================================================================
// CARDS
// =============================================================================

fn rarity_filter(raw: Option<String>) -> Option<Rarity> {
    raw.filter(|r| !r.trim().is_empty() && !r.eq_ignore_ascii_case("all")).map(Rarity::from)
}

async fn show_cards(app: &App, args: CardsArgs) -> Result<(), CliError> {
    let sort = InventorySort::parse(&args.sort).ok_or_else(|| CliError::UnknownSort(args.sort.clone()))?;
    let inventory = app.api.get_agent_cards(args.id).await?;
    let mut view = InventoryView::new(inventory);

    if let Some(card_ref) = args.card {
        let card = view
            .card(&card_ref)
            .ok_or_else(|| CliError::CardNotFound { agent_id: args.id, card: card_ref.clone() })?;
        let detail = CardDetail::new(card);
        if app.json {
            return print_json(&detail);
        }
        print!("{}", render::card_detail(&detail));
        return Ok(());
    }

    view.set_search(args.search);
    view.set_rarity(rarity_filter(args.rarity));
    view.set_color(args.color.filter(|c| !c.eq_ignore_ascii_case("all")));
    view.set_sort(sort);
    view.set_page(args.page);

    let page = view.page();
    if app.json {
        return print_json(&page);
    }
    print!("{}", render::inventory(&page));
    Ok(())
}

/// Ids of every known agent, from the backend or else the stored list.
async fn agent_ids(app: &App) -> Vec<AgentId> {
    match app.api.list_agents().await {
        Ok(agents) => agents.iter().map(|a| a.id).collect(),
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "agent list fetch failed; using stored list");
            app.snapshot.agents.iter().map(|a| a.id).collect()
        }
    }
}

async fn show_market(app: &App, args: MarketArgs) -> Result<(), CliError> {
    let sort = MarketSort::parse(&args.sort).ok_or_else(|| CliError::UnknownSort(args.sort.clone()))?;
    let ids = agent_ids(app).await;
    let mut view = load_market(app.api.as_ref(), &ids).await;
    view.set_rarity(rarity_filter(args.rarity));
    view.set_seller(args.seller);
    view.set_search(args.search);
    view.set_sort(sort);
    view.set_page(args.page);

    let page = view.page();
    if app.json {
        return print_json(&page);
    }
    print!("{}", render::market(&page));
    Ok(())
}

async fn show_search(app: &App, term: &str) -> Result<(), CliError> {
    let ids = agent_ids(app).await;
    let search = search_agents(app.api.as_ref(), &ids, term).await;
    if app.json {
        return print_json(&search);
    }
    print!("{}", render::search(&search));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
