fn main() {
    if let Err(e) = support_stats_lib::run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
