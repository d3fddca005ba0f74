use clap::Parser;
use kbd2osk::convert_fixtures_to_osk;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyboard Layout Table Compiler", long_about = None)]
struct Args {
    /// Input layout fixture file (JSON)
    input: PathBuf,

    /// Output OSK file path (defaults to input with .osk extension)
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let output_path = args.output.unwrap_or_else(|| {
        let mut path = args.input.clone();
        path.set_extension("osk");
        path
    });

    if args.verbose {
        println!(
            "Compiling {} to {}",
            args.input.display(),
            output_path.display()
        );
    }

    match convert_fixtures_to_osk(&args.input, &output_path) {
        Ok(()) => {
            if args.verbose {
                println!("Compilation successful!");
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
