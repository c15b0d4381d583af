use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use backend_client::{FixedGeolocationProvider, HttpLocationService};
use map_state::{Command, MapClient, MapSnapshot};
use shared_types::Place;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,map_state=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend = HttpLocationService::from_env();
    tracing::info!("using backend at {}", backend.base_url());

    let mut client = MapClient::new(
        Arc::new(backend),
        Arc::new(FixedGeolocationProvider::from_env()),
    );

    let snapshot = client.dispatch(Command::Initialize).await;
    print_snapshot(&snapshot);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let Some(command) = parse_command(&line, &client.snapshot()) else {
            if line.trim() == "quit" {
                break;
            }
            print_help();
            continue;
        };
        let snapshot = client.dispatch(command).await;
        print_snapshot(&snapshot);
    }

    Ok(())
}

fn parse_command(line: &str, snapshot: &MapSnapshot) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    match (verb, rest) {
        ("search", query) if !query.is_empty() => Some(Command::Search {
            query: query.to_string(),
        }),
        ("save", "") => Some(Command::SaveCurrent),
        ("delete", id) => id.parse().ok().map(|id| Command::Delete { id }),
        ("restaurants", "") => Some(Command::ShowRestaurants),
        ("gas", "") => Some(Command::FetchGasStations),
        ("select", index) => {
            let index: usize = index.parse().ok()?;
            let place = snapshot.overlays.gas_stations.get(index)?.clone();
            Some(Command::Select { place })
        }
        ("unselect", "") => Some(Command::ClearSelection),
        ("reset", "") => Some(Command::ResetAll),
        _ => None,
    }
}

fn print_help() {
    println!(
        "commands: search <query> | save | delete <id> | restaurants | gas | \
         select <n> | unselect | reset | quit"
    );
}

fn print_snapshot(snapshot: &MapSnapshot) {
    let center = snapshot.viewport.center;
    println!(
        "viewport: ({:.4}, {:.4}) zoom {}",
        center.latitude, center.longitude, snapshot.viewport.zoom
    );
    if let Some(place) = &snapshot.overlays.search_result {
        let saved = if snapshot.save_state.is_saved {
            " [saved]"
        } else {
            ""
        };
        println!("result: {}{saved}", describe(place));
    }
    if !snapshot.overlays.saved.is_empty() {
        println!("saved:");
        for place in &snapshot.overlays.saved {
            println!("  #{} {}", place.id.unwrap_or(-1), describe(place));
        }
    }
    if !snapshot.overlays.restaurants.is_empty() {
        println!("restaurants: {} nearby", snapshot.overlays.restaurants.len());
    }
    if !snapshot.overlays.gas_stations.is_empty() {
        println!("gas stations:");
        for (index, place) in snapshot.overlays.gas_stations.iter().enumerate() {
            println!("  [{index}] {}", describe(place));
        }
    }
    if let Some(selected) = &snapshot.overlays.selected {
        println!(
            "selected: {} ({})",
            selected.name,
            selected.address.as_deref().unwrap_or("no address")
        );
    }
    if snapshot.is_loading_gas_stations {
        println!("loading gas stations...");
    }
    if let Some(notice) = &snapshot.notice {
        println!("! {notice}");
    }
}

fn describe(place: &Place) -> String {
    format!(
        "{} ({:.4}, {:.4})",
        place.name, place.coordinate.latitude, place.coordinate.longitude
    )
}
