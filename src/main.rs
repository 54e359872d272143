fn main() {
    if let Err(e) = roadtrip::driver() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
