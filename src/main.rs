use std::{env, process::ExitCode, sync::Arc};

use hystats_api::HypixelApiClient;
use hystats_shared::{
    MemoryCredentialStore, Player, RecentGame, Session,
    traits::api::{HypixelApiFull, StatsApi},
};
use tracing::{error, info};

use config::Config;
use error::AppError;

mod config;
mod error;
mod logging;

const RECENT_GAMES_SHOWN: usize = 5;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let query = env::args().nth(1).ok_or(AppError::Usage)?;
    let config = Config::from_env()?;

    let store = Arc::new(MemoryCredentialStore::new(config.api_key));
    let api = HypixelApiClient::new(config.client, store)?;

    info!("🔎 Looking up {}", query);
    let player = api.lookup_player(&query).await?;

    // Status and activity are independent, failures are reported per section.
    let (status, games) = tokio::join!(
        api.fetch_status(&player.identity_key),
        api.fetch_recent_games(&player.identity_key)
    );

    print_player(&player);
    match status {
        Ok(session) => print_session(&session),
        Err(e) => println!("Status: {e}"),
    }
    match games {
        Ok(games) => print_games(&games),
        Err(e) => println!("Recent games: {e}"),
    }

    api.metrics().log_summary();
    Ok(())
}

fn print_player(player: &Player) {
    println!("{} [{}]", player.display_name, player.effective_rank());
    println!("  UUID:        {}", player.identity_key.hyphenated());
    println!("  Level:       {:.0}", player.network_level());
    if let Some(color) = player.rank_color() {
        println!("  Rank color:  {color}");
    }
    println!("  Karma:       {}", display_or_na(player.karma));
    println!("  Achievement: {}", display_or_na(player.achievement_points));

    let Some(stats) = &player.stats else {
        return;
    };
    if let Some(bw) = &stats.bedwars {
        println!(
            "  Bed Wars:    W/L {} | K/D {} | FK/D {}",
            bw.win_loss_ratio(),
            bw.kill_death_ratio(),
            bw.final_kill_death_ratio()
        );
    }
    if let Some(sw) = &stats.sky_wars {
        println!(
            "  SkyWars:     level {} | W/L {} | K/D {}",
            sw.level_label(),
            sw.win_loss_ratio(),
            sw.kill_death_ratio()
        );
    }
    if let Some(mm) = &stats.murder_mystery {
        println!(
            "  Murder:      wins {} | K/D {}",
            display_or_na(mm.wins),
            mm.kill_death_ratio()
        );
    }
    if let Some(duels) = &stats.duels {
        println!(
            "  Duels:       W/L {} | K/D {}",
            duels.win_loss_ratio(),
            duels.kill_death_ratio()
        );
    }
}

fn print_session(session: &Session) {
    println!("Status: {}", session.summary());
}

fn print_games(games: &[RecentGame]) {
    if games.is_empty() {
        println!("Recent games: none");
        return;
    }

    println!("Recent games:");
    for game in games.iter().take(RECENT_GAMES_SHOWN) {
        let name = game
            .game_type
            .as_deref()
            .map(hystats_shared::session::sanitize_game_name)
            .unwrap_or_else(|| "Unknown".to_string());
        let state = match game.duration_ms() {
            Some(ms) => format!("{}s", ms / 1000),
            None => "in progress".to_string(),
        };
        println!("  {name} ({state})");
    }
}

fn display_or_na(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}
