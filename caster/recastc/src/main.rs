//! Recast CLI
//!
//! Runs the built-in conformance fixtures through the evaluator. A
//! fixture's `print` output goes to stdout; diagnostics and logs go to
//! stderr, so a successful run writes exactly the program's output lines.

use recast_eval::fixtures::{find, FIXTURES};
use recast_eval::Interpreter;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: recastc run <fixture>");
                eprintln!();
                eprintln!("Run `recastc list` to see available fixtures.");
                std::process::exit(1);
            }
            run_fixture(&args[2]);
        }
        "list" => {
            println!("Available fixtures:");
            for fixture in FIXTURES {
                println!("  {:24} {}", fixture.name, fixture.description);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("recastc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn run_fixture(name: &str) {
    let Some(fixture) = find(name) else {
        eprintln!("error: unknown fixture '{name}'");
        eprintln!("Run `recastc list` to see available fixtures.");
        std::process::exit(1);
    };

    let program = (fixture.build)();
    let mut interpreter = Interpreter::new(&program);
    if let Err(err) = interpreter.run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Install the log subscriber on stderr; `RUST_LOG` controls verbosity.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("Recast semantics evaluator");
    println!();
    println!("Usage: recastc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <fixture>   Evaluate a built-in conformance fixture");
    println!("  list            List available fixtures");
    println!("  help            Show this help message");
    println!("  version         Show version information");
    println!();
    println!("Examples:");
    println!("  recastc run shadowed-call");
    println!("  recastc run instance-base-override");
    println!("  recastc list");
}
