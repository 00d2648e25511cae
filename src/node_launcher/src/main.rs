//! node_launcher CLI

use clap::Parser;
use node_launcher::{build_node_descriptor_from_file, record::RecordWriter, AmentIndex};
use std::{path::PathBuf, process};

#[derive(Parser)]
#[command(name = "node_launcher")]
#[command(about = "Translate a ROS 2 node configuration file into launch instructions", long_about = None)]
#[command(version)]
struct Cli {
    /// Node configuration file (YAML or JSON)
    config_file: PathBuf,

    /// Output file path (default: record.json)
    #[arg(short, long, default_value = "record.json")]
    output: PathBuf,

    /// Install prefix to search for packages (repeatable; default: AMENT_PREFIX_PATH)
    #[arg(long = "prefix")]
    prefixes: Vec<PathBuf>,

    /// Also write the node's parameters as a ROS 2 parameter file
    #[arg(long)]
    params_file: Option<PathBuf>,

    /// Print the generated command line
    #[arg(long)]
    print_cmd: bool,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let index = if cli.prefixes.is_empty() {
        AmentIndex::from_env()
    } else {
        AmentIndex::new(cli.prefixes.iter().cloned())
    };

    let descriptor = build_node_descriptor_from_file(&cli.config_file, &index)?;

    let mut writer = RecordWriter::new(&index);
    descriptor.launch_with(&mut writer)?;
    let record = writer.into_record_json();

    if cli.print_cmd {
        for node in &record.node {
            println!("{}", node.cmd.join(" "));
        }
    }

    if let Some(params_file) = &cli.params_file {
        std::fs::write(params_file, descriptor.to_params_yaml()?)?;
        log::info!("Generated parameter file: {}", params_file.display());
    }

    std::fs::write(&cli.output, record.to_json()?)?;
    log::info!("Generated record.json: {}", cli.output.display());

    Ok(())
}
