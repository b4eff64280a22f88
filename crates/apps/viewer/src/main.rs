//! Terminal front end for the population dashboard.
//!
//! Talks to the proxy server, never to the statistics API directly.

mod render;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dashboard::{Dashboard, DashboardConfig, RegionCatalog, CATALOG_ERROR_MESSAGE};
use foundation::{Category, RegionCode};
use streaming::{HttpSource, MemoSource, RemoteDataSource, Settlement};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(author, version, about = "Population composition by region")]
struct Args {
    /// Proxy base URL (default: $VIEWER_PROXY_URL or http://127.0.0.1:3000)
    #[arg(long)]
    proxy_url: Option<String>,

    /// Per-request deadline in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Seconds during which a repeated dataset fetch is answered from memory
    #[arg(long, default_value_t = 60)]
    memo_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List selectable regions
    Regions,

    /// Select regions and print the chart projection
    Chart {
        /// Region codes, comma separated (e.g. 1,13)
        #[arg(long, value_delimiter = ',')]
        select: Vec<RegionCode>,

        /// 総人口 | 年少人口 | 生産年齢人口 | 老年人口
        #[arg(long, default_value = "総人口")]
        category: Category,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let proxy_url = args.proxy_url.unwrap_or_else(|| {
        env::var("VIEWER_PROXY_URL").unwrap_or_else(|_| DEFAULT_PROXY_URL.to_string())
    });
    let timeout = args.timeout_ms.map(Duration::from_millis);

    let http: Arc<dyn RemoteDataSource> = Arc::new(HttpSource::with_timeout(&proxy_url, timeout)?);
    let source = Arc::new(MemoSource::with_dedup_interval(
        http,
        Duration::from_secs(args.memo_secs),
    ));
    let mut dashboard = Dashboard::new(
        source,
        DashboardConfig {
            fetch_timeout: timeout,
            ..DashboardConfig::default()
        },
    );

    info!(%proxy_url, "loading region catalog");
    if let RegionCatalog::Failed(detail) = dashboard.load_regions().await {
        return Err(format!("{CATALOG_ERROR_MESSAGE}: {detail}").into());
    }

    match args.command {
        Command::Regions => {
            print!("{}", render::region_list(dashboard.catalog().regions()));
        }
        Command::Chart {
            select,
            category,
            json,
        } => {
            dashboard.set_category(category);
            for code in select {
                dashboard.toggle_by_code(code, true)?;
            }
            for (code, settlement) in dashboard.settle_all().await {
                if let Settlement::Failed(error) = settlement {
                    warn!(%code, %error, "region shown without data");
                }
            }

            let view = dashboard.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::table(&view));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;
    use foundation::{Category, RegionCode};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_comma_separated_codes_and_category() {
        let args =
            Args::try_parse_from(["viewer", "chart", "--select", "1, 13", "--category", "老年人口"])
                .unwrap();
        match args.command {
            Command::Chart {
                select, category, ..
            } => {
                assert_eq!(select, vec![RegionCode(1), RegionCode(13)]);
                assert_eq!(category, Category::Elderly);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_codes() {
        assert!(Args::try_parse_from(["viewer", "chart", "--select", "tokyo"]).is_err());
    }
}
