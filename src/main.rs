use anyhow::Result;
use clap::{Parser, Subcommand};
use keplergl::{credentials, data_loader, generate_commands, MapError, Names, Visualize, VisualizeOptions};
use std::path::PathBuf;
use tracing::{error, info};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render data files to a kepler.gl HTML map
    Render {
        /// GeoJSON, JSON or CSV files
        #[clap(required = true)]
        files: Vec<PathBuf>,
        /// Dataset name, once per file
        #[clap(short, long = "name")]
        names: Vec<String>,
        /// Stub for generated dataset names
        #[clap(long, conflicts_with = "names")]
        name_stub: Option<String>,
        /// Mapbox API key, defaults to $MAPBOX_API_KEY
        #[clap(short, long)]
        api_key: Option<String>,
        /// Preset style name or custom style url
        #[clap(short, long)]
        style: Option<String>,
        /// kepler.gl config template
        #[clap(short, long)]
        config: Option<PathBuf>,
        /// Output path stem; `_vis.html` is appended
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(long)]
        read_only: bool,
        /// Open the map in the default browser
        #[clap(long)]
        open: bool,
    },
    Generate {
        #[clap(subcommand)]
        command: GenerateCommands,
    },
}

#[derive(Subcommand, Debug)]
enum GenerateCommands {
    /// Print or write the bundled config template
    Config {
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// List preset map styles
    Styles,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Render {
            files,
            names,
            name_stub,
            api_key,
            style,
            config,
            output,
            read_only,
            open,
        } => {
            info!("Rendering {} files", files.len());
            let payloads = data_loader::load_files(&files)?;
            let names = match (names.is_empty(), name_stub) {
                (false, _) => Names::List(names),
                (true, Some(stub)) => Names::Stub(stub),
                (true, None) => Names::Default,
            };
            let vis = Visualize::with_data(
                payloads,
                VisualizeOptions {
                    names,
                    read_only,
                    api_key,
                    fallback_api_key: credentials::api_key_from_env(),
                    style,
                    config_file: config,
                    output_map: output,
                    open_browser: open,
                },
            )
            .map_err(|err| {
                report_map_error(&err);
                err
            })?;
            println!("{}", vis.path().display());
        }
        Commands::Generate { command } => match command {
            GenerateCommands::Config { output } => {
                if let Some(template) = generate_commands::generate_config(output.as_deref())? {
                    println!("{}", template);
                }
            }
            GenerateCommands::Styles => {
                println!("{}", generate_commands::generate_styles());
            }
        },
    }

    Ok(())
}

/// Point the user at the input that caused a failed render
fn report_map_error(err: &MapError) {
    if err.is_config_error() {
        error!("Check the --config template; `kepler generate config` prints the bundled one");
    } else if err.is_contract_violation() {
        error!("Pass --name once per input file, with distinct names");
    }
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
