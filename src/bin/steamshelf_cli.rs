// steamshelf_cli.rs - Headless front end over the same view reducer.
//
// Loads the library, replays the requested interactions as `ViewEvent`s and
// prints the resulting page, either as text or as the JSON render model.
//
//   steamshelf-cli --url ./data/steam-games-with-names.json --order most-time --page 2

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use tracing::error;

use steamshelf_lib::config::ViewConfig;
use steamshelf_lib::error::{AppError, LoadError, Result};
use steamshelf_lib::loader::{spawn_load, CancelToken};
use steamshelf_lib::logging::init_logging;
use steamshelf_lib::models::{LibraryPage, OrderMode, RenderModel};
use steamshelf_lib::source::source_for;
use steamshelf_lib::view::{derive_view, ViewEvent, ViewState};

#[derive(Parser, Debug)]
#[command(name = "steamshelf-cli", version, about = "Filter, order and page through a Steam game library")]
struct Cli {
    /// Path to config.json (defaults to the OS config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Library URL or local JSON path; overrides the config file
    #[arg(long, env = "STEAMSHELF_FETCH_URL")]
    url: Option<String>,

    /// Games per page
    #[arg(long)]
    per_page: Option<usize>,

    /// Number of playtime checkboxes
    #[arg(long)]
    checkboxes: Option<usize>,

    /// Leave out the "Unplayed Games" checkbox
    #[arg(long)]
    no_unplayed: bool,

    /// Uncheck the playtime bucket at this index (repeatable)
    #[arg(long = "exclude", value_name = "INDEX")]
    exclude: Vec<usize>,

    /// Case-insensitive name filter
    #[arg(long, default_value = "")]
    search: String,

    /// most-time, least-time, alphabetical or default
    #[arg(long, default_value = "default")]
    order: String,

    /// Page to show (clamped to the pages available)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Print the render model as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let mut state = ViewState::new(config);

    let (tx, rx) = mpsc::channel();
    let loader = spawn_load(
        source_for(&state.config.fetch_url),
        CancelToken::new(),
        move |result| {
            // The receiver only goes away if we are already exiting.
            let _ = tx.send(result);
        },
    );
    let result = rx.recv().unwrap_or(Err(LoadError::Cancelled));
    loader
        .join()
        .map_err(|_| AppError::Custom("loader thread panicked".into()))?;
    state.apply(ViewEvent::Loaded(result));

    for index in &cli.exclude {
        state.apply(ViewEvent::ToggleBucket { index: *index });
    }
    state.apply(ViewEvent::SetSearch(cli.search.clone()));
    state.apply(ViewEvent::SetOrder(OrderMode::from_value(&cli.order)));

    // Walk forward like a user pressing "Next Page".
    while state.current_page < cli.page {
        let RenderModel::Ready(page) = derive_view(&state) else { break };
        if page.pagination.next_disabled {
            break;
        }
        state.apply(ViewEvent::NextPage { displayed_total: page.pagination.total_pages });
    }

    let model = derive_view(&state);
    if cli.json {
        let json = serde_json::to_string_pretty(&model)
            .map_err(|e| AppError::Custom(format!("could not encode view: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    match model {
        RenderModel::Loading => println!("Loading..."),
        RenderModel::Failed { message } => {
            return Err(AppError::Custom(format!("failed to load library: {message}")));
        }
        RenderModel::Ready(page) => print_page(&page),
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ViewConfig> {
    let mut config = match (&cli.config, &cli.url) {
        (Some(path), _) => ViewConfig::load(path)?,
        (None, Some(url)) => ViewConfig::new(url.clone()),
        (None, None) => ViewConfig::load_default()?,
    };
    config.apply_env_override(cli.url.clone());
    if let Some(n) = cli.per_page {
        config.games_per_page = n;
    }
    if let Some(n) = cli.checkboxes {
        config.hours_filter_range.checkboxes = n;
    }
    if cli.no_unplayed {
        config.hours_filter_range.filter_unplayed = false;
    }
    config.validate()?;
    Ok(config)
}

fn print_page(page: &LibraryPage) {
    println!("Steam Games Filter");
    println!("Showing {} of {} games", page.filtered_count, page.total_games);
    println!("Order: {}", page.order.as_str());
    for bucket in &page.buckets {
        let mark = if bucket.checked { "x" } else { " " };
        println!("  [{mark}] {}: {}", bucket.index, bucket.label);
    }
    println!(
        "Current page is: {} out of {}",
        page.pagination.current_page, page.pagination.display_total_pages
    );
    println!();
    for game in &page.games {
        println!("{}", game.name);
        println!("  {}", game.playtime_label);
        println!("  {}", game.image_url);
        println!("  {}", game.store_url);
    }
}
