use clap::{Parser, Subcommand};
use log::info;
use spotlyrics::{config::Config, lookup::LyricsLookup, lrc, server};

#[derive(Parser)]
#[command(name = "spotlyrics")]
#[command(version, about = "Spotify track metadata with synchronized lyrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the lyrics HTTP API
    Serve {
        #[arg(long, env = "SPOTLYRICS_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(short, long, env = "SPOTLYRICS_PORT", default_value_t = 4000)]
        port: u16,
    },
    /// Look up a single track and print the result
    Lookup {
        /// Spotify track URL
        url: String,
        /// Print the lyrics as LRC instead of the JSON response
        #[arg(long = "lrc")]
        as_lrc: bool,
    },
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    info!("Building config ...");
    let config = Config::from_env()?;
    let lookup = LyricsLookup::new(&config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            server::serve(&format!("{host}:{port}"), lookup).await?;
        }
        Commands::Lookup { url, as_lrc } => {
            let response = lookup.lookup(&url).await?;
            if as_lrc {
                let lyrics = response
                    .lyrics
                    .ok_or("No lyrics available for this track")?;
                print!("{}", lrc::render(&lyrics));
            } else {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
        }
    }
    Ok(())
}
