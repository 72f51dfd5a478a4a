use anyhow::Result;
use clap::Parser;

use release_pilot::config;
use release_pilot::host::CommandHost;
use release_pilot::index::CommandIndex;
use release_pilot::pipeline::{Pipeline, PipelineOptions};
use release_pilot::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-pilot",
    about = "Run the staged release pipeline for a version tag"
)]
struct Args {
    #[arg(short, long, help = "Release tag to process (vMAJOR.MINOR.PATCH)")]
    tag: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Skip the manual-approval prompt")]
    yes: bool,

    #[arg(long, help = "Preview the pipeline without running any stage")]
    dry_run: bool,

    #[arg(long, help = "Run build and validation only, publish nothing")]
    skip_publish: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-pilot {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(tag) = args.tag else {
        ui::display_error("a release tag is required (--tag vMAJOR.MINOR.PATCH)");
        std::process::exit(2);
    };

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let host = CommandHost::new(config.release.host_command.as_str());
    let index = CommandIndex::new(config.index.clone());
    let pipeline = Pipeline::new(&config, &host, &index);

    let opts = PipelineOptions {
        tag,
        yes: args.yes,
        dry_run: args.dry_run,
        skip_publish: args.skip_publish,
    };

    match pipeline.run(&opts) {
        Ok(outcome) => {
            if outcome.receipt.is_some() {
                println!(
                    "\n\x1b[32m✓\x1b[0m Released {} {}\n",
                    config.package.name, outcome.version
                );
            }
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
