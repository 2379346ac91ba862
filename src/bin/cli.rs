use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use winswitch_engine::{
    platform::{ScriptedSource, WmctrlSource},
    ranking::clamp_limit,
    RankedWindow, SwitcherConfig, WindowActivator, WindowSource, WindowSwitcher,
};

#[derive(Parser)]
#[command(name = "winswitch")]
#[command(about = "Fuzzy window switcher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "winswitch.yaml")]
    config: String,

    /// Use built-in sample windows instead of wmctrl
    #[arg(long)]
    demo: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every tracked window
    List,

    /// Rank windows against a query
    Rank {
        /// Search query
        query: String,

        /// Maximum results (negative values show nothing)
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-rank on an interval until Ctrl+C
    Watch {
        /// Search query
        query: String,

        /// Maximum results
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Refresh interval in milliseconds
        #[arg(long, default_value = "1000")]
        interval_ms: u64,
    },

    /// Activate the best match for a query
    Switch {
        /// Search query
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = SwitcherConfig::load_or_default(&cli.config)?;
    let level = cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    init_tracing(&level)?;

    let (source, activator) = if cli.demo {
        tracing::warn!("Demo mode - using sample windows");
        let scripted = Arc::new(ScriptedSource::demo());
        let source: Arc<dyn WindowSource> = scripted.clone();
        let activator: Arc<dyn WindowActivator> = scripted;
        (source, activator)
    } else {
        let wmctrl = Arc::new(WmctrlSource::new(config.filter.clone()));
        if let Err(e) = wmctrl.test() {
            tracing::warn!("wmctrl check failed: {}", e);
        }
        let source: Arc<dyn WindowSource> = wmctrl.clone();
        let activator: Arc<dyn WindowActivator> = wmctrl;
        (source, activator)
    };

    let switcher = WindowSwitcher::from_config(source, &config);
    let default_limit = config.ranking.default_limit;
    let limit_or_default = |limit: Option<i64>| limit.map(clamp_limit).unwrap_or(default_limit);

    match cli.command {
        Commands::List => {
            let report = switcher.refresh()?;
            println!("🪟 {} windows ({:.2}ms)", report.total, report.elapsed_ms);

            for (handle, record) in switcher.windows() {
                println!("   {}  [pid {}]  {}", handle, record.owner_pid, record.display_name());
            }
        }

        Commands::Rank { query, limit, json } => {
            let ranked = switcher.refresh_and_rank(&query, limit_or_default(limit))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                println!("🔍 {}", query);
                print_ranked(&ranked);
            }
        }

        Commands::Watch { query, limit, interval_ms } => {
            let limit = limit_or_default(limit);
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(50)));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match switcher.refresh() {
                            Ok(report) if !report.is_unchanged() => {
                                tracing::info!(
                                    "{} windows (+{} / -{} / {} skipped)",
                                    report.total,
                                    report.inserted,
                                    report.evicted(),
                                    report.skipped
                                );
                                println!("\n🔍 {}", query);
                                print_ranked(&switcher.rank(&query, limit));
                            }
                            Ok(_) => {}
                            Err(e) => tracing::error!("Refresh failed: {}", e),
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Received Ctrl+C, stopping");
                        break;
                    }
                }
            }
        }

        Commands::Switch { query } => {
            let ranked = switcher.refresh_and_rank(&query, 1)?;

            match ranked.first() {
                Some(best) => {
                    activator.activate(best.handle)?;
                    println!("✅ {}", best.record.display_name());
                }
                None => {
                    println!("❌ No windows to switch to");
                }
            }
        }
    }

    Ok(())
}

fn print_ranked(ranked: &[RankedWindow]) {
    if ranked.is_empty() {
        println!("   (no windows)");
        return;
    }

    for (i, hit) in ranked.iter().enumerate() {
        println!("   {}. {}", i + 1, hit.display());
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
