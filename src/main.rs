use anyhow::Context;
use log::info;

use yt_scraper::scraper::{ChannelScraper, FetchOptions};
use yt_scraper::utils::setup_logging;
use yt_scraper::Config;

/// Channel used when none is passed on the command line.
const DEMO_CHANNEL_ID: &str = "UCSHZKyawb77ixDdsGog4iWA";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_logging().context("Failed to initialize logging")?;

    let config = Config::from_env();
    let scraper = ChannelScraper::new(&config);

    let channel_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEMO_CHANNEL_ID.to_string());
    let options = FetchOptions::from_config(&config);

    info!(
        "Fetching videos for channel {} ({}h window)",
        channel_id, options.window_hours
    );
    let videos = scraper
        .fetch_channel_videos(&channel_id, &options)
        .await
        .with_context(|| format!("Failed to fetch channel {}", channel_id))?;

    match videos.first() {
        Some(video) => {
            println!("Most recent video for {}:", channel_id);
            println!("  title:     {}", video.title);
            println!("  url:       {}", video.url);
            if let Some(published) = video.published_at {
                println!("  published: {}", published.to_rfc3339());
            }
        }
        None => println!(
            "No videos published on {} in the last {} hour(s)",
            channel_id, options.window_hours
        ),
    }

    Ok(())
}
