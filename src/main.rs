fn main() {
    if let Err(e) = harvest::harvest_main() {
        eprintln!("harvest error: {}", e);
        std::process::exit(e.exit_code());
    }
}
