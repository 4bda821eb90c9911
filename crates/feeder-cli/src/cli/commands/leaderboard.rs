use super::{exit_codes, open_store};
use crate::cli::args::LeaderboardArgs;
use feeder_core::storage::CharacterStore;

pub fn run(args: LeaderboardArgs) -> anyhow::Result<i32> {
    let store = open_store(&args.common)?;
    let rows = store.leaderboard(args.limit)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "text" => {
            if rows.is_empty() {
                println!("leaderboard is empty");
            }
            for (rank, r) in rows.iter().enumerate() {
                println!(
                    "{:>3}. {:<32} {:>20} ISK  ({} killmails)",
                    rank + 1,
                    r.character_name,
                    r.total_value,
                    r.killmail_count
                );
            }
        }
        other => anyhow::bail!("unknown format '{}' (expected text or json)", other),
    }
    Ok(exit_codes::OK)
}
