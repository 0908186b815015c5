use std::env;
use std::error::Error;
use std::sync::Arc;

use matchday::{Config, FileBlobStore, FootballDataClient, Match, MatchesStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    search: Option<String>,
    page: Option<usize>,
    watch: bool,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut parsed = Args::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--search" => {
                parsed.search = Some(args.next().ok_or("Missing value for --search")?);
            }
            "-p" | "--page" => {
                parsed.page = Some(args.next().ok_or("Missing value for --page")?.parse()?);
            }
            "-w" | "--watch" => parsed.watch = true,
            other => return Err(format!("Unknown argument: {other}").into()),
        }
    }
    Ok(parsed)
}

fn print_page(store: &MatchesStore<FootballDataClient>) {
    let snapshot = store.snapshot();
    if let Some(error) = &snapshot.error {
        eprintln!("Feed error: {error} (showing sample data)");
    }
    println!(
        "Page {}/{} ({} matches, {} tracked)",
        snapshot.current_page,
        snapshot.total_pages,
        snapshot.filtered_matches.len(),
        snapshot.tracked_count
    );
    for m in &snapshot.paginated_matches {
        println!("{}", format_row(m));
    }
}

fn format_row(m: &Match) -> String {
    let minute = m.minute.map(|min| format!(" {min}'")).unwrap_or_default();
    format!(
        "{:>9} {:<12} {:<8} {:<40} {:>5}{} [{}]",
        m.id, m.date, m.time, m.title, m.score, minute, m.league
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let args = parse_args()?;
    let config = Config::from_env()?;
    let client = FootballDataClient::from_config(&config);
    let store = Arc::new(MatchesStore::new(
        client,
        FileBlobStore::new(config.storage_dir.clone()),
        &config,
    ));

    store.refresh().await;
    if let Some(search) = args.search {
        store.set_search_query(search);
    }
    if let Some(page) = args.page {
        if !store.set_current_page(page) {
            eprintln!("Page {page} does not exist, showing page {}", store.current_page());
        }
    }
    print_page(&store);

    if args.watch {
        store.start_live_updates(config.live_interval);
        info!("watching for updates, press Ctrl-C to stop");
        let mut ticker = tokio::time::interval(config.live_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = ticker.tick() => print_page(&store),
            }
        }
        store.stop_live_updates();
    }

    Ok(())
}
