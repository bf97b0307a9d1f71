use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use extsort::sort::Sort;

/// Sorts a file of signed 32-bit integers (one per line) in place, using
/// limited RAM across multiple worker threads.
#[derive(Parser)]
#[command(name = "extsort", about, long_about = None)]
struct Cli {
    /// Path to the file to sort in place
    filename: PathBuf,

    /// Buffer size, in MiB
    #[arg(short = 'b', long = "buffer", default_value_t = 128, value_parser = clap::value_parser!(u64).range(1..=1024))]
    buffer_mib: u64,

    /// Thread count; by default all available cores
    #[arg(short = 't', long = "threads", value_parser = clap::value_parser!(u64).range(1..=1024))]
    threads: Option<u64>,
}

fn main() -> ExitCode {
    let _ = simple_logger::SimpleLogger::new().init();

    let cli = Cli::parse();

    if !cli.filename.exists() {
        eprintln!("Error: File does not exist");
        return ExitCode::FAILURE;
    }

    let mut sort = Sort::new(cli.filename);
    sort.with_buffer_size_mib(cli.buffer_mib);
    if let Some(threads) = cli.threads {
        sort.with_threads(threads as usize);
    }

    match sort.sort() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
