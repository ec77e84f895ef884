//! Terminal operator console for the medboard dashboard.
mod platform;

fn main() {
    if let Err(err) = platform::run_app() {
        eprintln!("medboard_app: {err}");
        std::process::exit(1);
    }
}
