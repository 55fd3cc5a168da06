use clap::Parser;
use tracing::{debug, error};

mod cli;
mod logging;
mod output;

use cli::{Args, DepInfo};
use pv_sizer::Calculation;
use pv_sizer::config::FileConfig;

// ===================== MAIN =====================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.show_build_info {
        println!("Built from Git commit: {}\n", env!("PV_SIZER_GIT_HASH"));
        const DEP_INFO_RAW: &str = include_str!(env!("PV_SIZER_DEPS_INFO_PATH"));
        let deps: Vec<DepInfo> = serde_json::from_str(DEP_INFO_RAW)?;

        println!("Found {} dependencies.", deps.len());
        for dep in deps {
            println!("- {} v{}", dep.name, dep.version);
            if let Some(sum) = dep.checksum {
                println!("    Checksum: {}", sum);
            }
            if let Some(src) = dep.source {
                println!("    Source:   {}", src);
            }
        }
        return Ok(());
    }

    logging::init_cli_logger(args.verbose);

    // Defaults, then config file, then flags / environment
    let mut calc = Calculation::default();
    if let Some(path) = &args.config {
        FileConfig::load(path)?.apply_to(&mut calc);
    }
    args.apply_to(&mut calc);
    debug!(?calc, "Resolved inputs");

    let report = calc.run();

    if args.json {
        output::print_json(&calc, &report)?;
    } else {
        output::print_report(&calc, &report);
    }

    if let Err(e) = &report.energy {
        error!("Energy estimate failed: {}", e);
    }
    if let Err(e) = &report.layout {
        error!("Layout planning failed: {}", e);
    }
    if !report.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}
