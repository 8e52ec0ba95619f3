use log::debug;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A missing .env file is fine, the variables may come from the process
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {e}");
    }

    cli::run().await
}
