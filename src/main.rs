use clap::Parser;
use std::io::{self, BufRead};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use handrail::plugin::Plugin;
use handrail::reserved::StaticRoot;
use handrail::resolver::Outcome;

#[derive(Parser)]
#[command(name = "handrail")]
#[command(about = "Homograph-aware root zone filter for DNS resolution", long_about = None)]
struct Args {
    /// Names to check; reads one name per line from stdin when empty
    names: Vec<String>,

    /// Print a summary of lookup dispositions at the end
    #[arg(short, long)]
    stats: bool,
}

async fn run(args: Args) -> io::Result<()> {
    let root = Arc::new(StaticRoot::new());
    let plugin = Plugin::new(root.clone(), root);
    plugin.open();

    let names = if args.names.is_empty() {
        io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        args.names
    };

    for name in &names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        match plugin.resolver().resolve(name).await {
            Ok(Outcome::Forward) => println!("{name} FORWARD"),
            Ok(Outcome::Denied) => println!("{name} NXDOMAIN"),
            Ok(Outcome::Answered(referral)) => {
                println!("{name} ICANN ({} nameservers)", referral.nameservers.len());
            }
            Err(e) => eprintln!("{name} error: {e}"),
        }
    }

    if args.stats {
        let snapshot = plugin.stats().snapshot_and_reset();
        println!(
            "[stats] requests={} forwarded={} forced={} suppressed={} denied={}",
            snapshot.requests,
            snapshot.forwarded,
            snapshot.forced,
            snapshot.suppressed,
            snapshot.denied
        );
    }

    plugin.close();

    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(run(args))
}
