//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = pathlight_cli::run() {
        eprintln!("pathlight: {err}");
        std::process::exit(1);
    }
}
