fn main() {
    if let Err(e) = script_host::core::Host::run() {
        eprintln!("script host failed: {}", e);
        std::process::exit(1);
    }
}
