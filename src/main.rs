use utfconv::utfconv;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let results = utfconv(std::env::args_os().skip(1).collect());
    if results.is_err() {
        eprintln!("Usage: utfconv [files]");
    }
    results
}
