//! cartlab - elastic collision report generator.

use clap::{Args, Parser, Subcommand};
use cl_cli::{
    generate, generate_run_id, init_logging, ExitCode, GenerateRequest, LogConfig, LogFormat,
    LogLevel,
};
use cl_report::ReportConfig;
use std::path::PathBuf;
use tracing::{error, info, info_span, Instrument};

/// Turn an elastic two-cart collision record into a styled spreadsheet report
#[derive(Parser)]
#[command(name = "cartlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format on stderr (human, json)
    #[arg(long, global = true, default_value = "human")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the report for one experiment record
    Generate(GenerateArgs),
    /// Print the default report configuration as JSON
    Config,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Experiment record JSON file, or `-` for stdin
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Directory the report is written into
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Report configuration JSON file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Render charts one at a time
    #[arg(long)]
    sequential: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::default()
        .with_level(LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet))
        .with_format(cli.global.log_format);
    init_logging(&log_config);

    let exit_code = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Config => print_default_config(),
    };

    std::process::exit(exit_code.as_i32());
}

fn run_generate(args: GenerateArgs) -> ExitCode {
    let request = GenerateRequest {
        input: args.input,
        output_dir: args.output_dir,
        config: args.config,
        sequential: args.sequential,
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("cartlab: failed to start runtime: {}", err);
            return ExitCode::IoError;
        }
    };

    let run_id = generate_run_id();
    let span = info_span!("run", run_id = %run_id);
    info!(run_id = %run_id, input = %request.input.display(), "generating report");

    match runtime.block_on(generate(&request).instrument(span)) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::Success
        }
        Err(err) => {
            let code = ExitCode::from(&err);
            error!(run_id = %run_id, code = err.code(), "{}", err);
            eprintln!("cartlab: {} [{}]", err, code.code_name());
            code
        }
    }
}

fn print_default_config() -> ExitCode {
    match ReportConfig::default().to_json() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::Success
        }
        Err(err) => {
            eprintln!("cartlab: {}", err);
            ExitCode::SerializationError
        }
    }
}
