//! loadplan CLI entry point.

fn main() {
    if let Err(e) = loadplan_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
