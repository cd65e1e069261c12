use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use tweetsync_core::*;

#[derive(Parser)]
#[command(name = "tweetsync")]
#[command(about = "Fetch filtered tweets from a specific Twitter user and save them to a Notion database")]
#[command(version)]
struct Cli {
    /// Twitter screen name to fetch
    account: String,

    /// Keyword to filter tweets (optional)
    keyword: Option<String>,

    /// Notion database receiving the tweets
    #[arg(long, env = "NOTION_DATABASE_ID", default_value = DEFAULT_DATABASE_ID)]
    database_id: String,

    /// Notion integration token; without it nothing is written to Notion
    #[arg(long, env = NOTION_API_KEY, hide_env_values = true)]
    notion_api_key: Option<String>,

    /// Also write the fetched tweets to this CSV file
    #[arg(long, value_name = "PATH")]
    export_csv: Option<PathBuf>,

    /// Stop after this many matching tweets
    #[arg(long)]
    limit: Option<usize>,

    /// Fetch only, never write to Notion
    #[arg(long)]
    no_upsert: bool,
}

struct SyncCliApp {
    config: SyncConfig,
    credentials: TwitterCredentials,
}

impl SyncCliApp {
    fn new(cli: Cli) -> Result<Self> {
        let credentials = TwitterCredentials::from_env()?;

        let notion_api_key = if cli.no_upsert { None } else { cli.notion_api_key };
        let config = SyncConfig::new(cli.account)
            .with_keyword(cli.keyword)
            .with_destination(notion_api_key, Some(cli.database_id))
            .with_export_path(cli.export_csv)
            .with_limit(cli.limit);

        Ok(Self { config, credentials })
    }

    fn run(self) -> Result<()> {
        info!("Starting sync with {:?}", self.config);
        let outcome = tweetsync_core::run(&self.config, self.credentials)?;

        match outcome.upsert {
            Some(report) => info!(
                "Finished: {} tweets matched, {} inserted, {} already present",
                outcome.posts.len(),
                report.inserted,
                report.skipped
            ),
            None => info!(
                "Finished: {} tweets matched, Notion upsert disabled",
                outcome.posts.len()
            ),
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    SyncCliApp::new(cli)?.run()
}
