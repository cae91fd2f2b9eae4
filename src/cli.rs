use clap::Parser;

/// Command-line interface definition for the TrackShip service
#[derive(Parser)]
#[command(
    name = "trackship",
    version = env!("CARGO_PKG_VERSION"),
    about = "Red-zone vessel passage counter and EuRIS tracking proxy",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(long = "db")]
    pub db: Option<String>,

    /// Override listener port
    #[arg(long = "port")]
    pub port: Option<u16>,

    /// Override bind address
    #[arg(long = "bind")]
    pub bind: Option<String>,
}
