use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sysmenu::config::{ProbeConfig, parse_title_id};
use sysmenu::fs::HostFs;
use sysmenu::metadata::NandMetadata;
use sysmenu::region::ConsoleRegion;
use sysmenu::sysmenu::SystemMenuReport;

/// Report the System Menu installed in a NAND dump.
#[derive(Parser)]
struct Args {
    /// `name = value` config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// NAND dump directory; overrides the config file.
    #[arg(short, long)]
    nand: Option<PathBuf>,
    /// Title to probe, e.g. 00000001-00000002.
    #[arg(short, long)]
    title: Option<String>,
    /// Console region code from the settings service.
    #[arg(long)]
    console_region: Option<u32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match (&args.config, &args.nand) {
        (Some(path), _) => ProbeConfig::from_path(path)?,
        (None, Some(nand)) => ProbeConfig::new(nand),
        (None, None) => return Err("pass --config or --nand".into()),
    };
    if let Some(nand) = args.nand {
        config.nand_root = nand;
    }
    if let Some(title) = &args.title {
        config.title_id = parse_title_id(title)?;
    }

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let nand = HostFs::new(&config.nand_root);
    let store = NandMetadata::new(&nand);
    let report = SystemMenuReport::probe_title(&nand, &store, config.title_id)?;

    if let Some(region) = args.console_region {
        println!("Console Region. {}", ConsoleRegion::from(region).name());
    }
    println!("Title.......... {}", report.title);
    match report.ios_revision {
        Some(rev) => println!("IOS............ {} v{rev}", report.ios_slot()),
        None => println!("IOS............ {} (not installed)", report.ios_slot()),
    }
    if let Some(boot2) = report.boot2_version {
        println!("Boot2.......... v{boot2}");
    }
    println!(
        "System Menu.... {} (v{})",
        report.classification, report.raw_version
    );
    println!(
        "Boot content... {:08x}.app, {} bytes{}",
        report.boot_content.content_id,
        report.boot_content.len(),
        match (report.boot_content.patched, report.boot_content.fallback) {
            (true, false) => ", Priiloader",
            (true, true) => ", Priiloader markers, original layout",
            _ => "",
        }
    );

    Ok(())
}
