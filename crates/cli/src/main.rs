//! Network Workbench CLI
//! Foreground observer: spawns orchestrator operations and drains their events

mod logging;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use workbench_core::application::{EventReceiver, Orchestrator, WorkbenchConfig, WorkbenchEvent};
use workbench_core::domain::PlatformFamily;
use workbench_core::port::IpLookup;
use workbench_infra_system::{IpApiLookup, SystemCommandRunner, DEFAULT_LOOKUP_URL};

#[derive(Parser)]
#[command(name = "workbench")]
#[command(about = "Local network discovery and script queue runner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Interpreter used for .py scripts
    #[arg(long, env = "WORKBENCH_PYTHON", global = true)]
    python: Option<String>,

    /// Kill any external command running longer than this (seconds)
    #[arg(long, env = "WORKBENCH_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// How often results are collected from background workers (ms)
    #[arg(long, env = "WORKBENCH_POLL_MS", default_value = "200", global = true)]
    poll_ms: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the default gateway and the devices in the ARP cache
    Scan {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Queue scripts (.py, .bat/.cmd, .bash/.sh) and run them in order
    Run {
        /// Script paths; duplicates are queued once
        #[arg(required = true)]
        scripts: Vec<PathBuf>,

        /// Run only the queue entry at this index
        #[arg(long)]
        only: Option<usize>,
    },

    /// Geolocate a public IP address
    Lookup {
        /// IPv4 or IPv6 address
        ip: String,

        /// Lookup service base URL
        #[arg(long, env = "WORKBENCH_LOOKUP_URL", default_value = DEFAULT_LOOKUP_URL)]
        url: String,
    },
}

impl Cli {
    fn config(&self, platform: PlatformFamily) -> WorkbenchConfig {
        let mut config = WorkbenchConfig::for_platform(platform);
        if let Some(python) = &self.python {
            config.python_interpreter = python.clone();
        }
        config.command_timeout = self.timeout_secs.map(Duration::from_secs);
        config.poll_interval = Duration::from_millis(self.poll_ms.max(1));
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let platform = PlatformFamily::current();
    let config = cli.config(platform);

    info!(
        version = workbench_core::VERSION,
        platform = %platform,
        python = %config.python_interpreter,
        timeout = ?config.command_timeout,
        "Network Workbench starting"
    );

    let runner = Arc::new(SystemCommandRunner::new(config.command_timeout));
    let (mut orchestrator, receiver) = Orchestrator::new(runner, platform, &config);

    match cli.command {
        Commands::Scan { json } => {
            if !json {
                println!("{}", "Scanning devices via default gateway...".cyan().bold());
            }
            let handle = orchestrator.scan_network();
            observe(receiver, vec![handle], config.poll_interval, json).await
        }

        Commands::Run { scripts, only } => {
            for script in scripts {
                orchestrator.add_script(script);
            }
            let handle = match only {
                Some(index) => orchestrator
                    .run_selected(index)
                    .with_context(|| format!("No queued script at index {}", index))?,
                None => orchestrator.run_all(),
            };
            observe(receiver, vec![handle], config.poll_interval, false).await
        }

        Commands::Lookup { ip, url } => {
            let ip: IpAddr = match ip.trim().parse() {
                Ok(ip) => ip,
                Err(_) => anyhow::bail!("Invalid IP: please enter a valid IPv4/IPv6 address"),
            };
            println!("Looking up {}...", ip);
            let lookup = IpApiLookup::new(url).context("Failed to build HTTP client")?;
            let details = lookup.lookup(ip).await;
            render::ip_details(&details);
            Ok(())
        }
    }
}

/// Drain worker events on a fixed cadence until every operation has finished
async fn observe(
    mut receiver: EventReceiver,
    pending: Vec<JoinHandle<()>>,
    poll_interval: Duration,
    json: bool,
) -> Result<()> {
    let mut ticker = tokio::time::interval(poll_interval);

    loop {
        ticker.tick().await;

        // Checked before draining: anything a finished worker sent is already queued
        let finished = pending.iter().all(|h| h.is_finished());

        for event in receiver.drain() {
            match event {
                WorkbenchEvent::Log(line) => render::log_line(&line),
                WorkbenchEvent::ScanCompleted(report) => render::scan_report(&report, json)?,
                WorkbenchEvent::ScanFailed(reason) => render::scan_failed(&reason),
            }
        }

        if finished {
            break;
        }
    }

    for handle in pending {
        if let Err(e) = handle.await {
            warn!(error = %e, "Background operation ended abnormally");
        }
    }
    Ok(())
}
