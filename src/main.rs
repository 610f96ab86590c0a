mod bootstrap;
mod config;
mod database;

use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = config::Settings::from_env()?;

    log::info!("🚀 Starting BigData bootstrap...");
    log::info!("📊 Target database: {}", settings.database);

    let db = database::MongoDB::connect(&settings.mongodb_uri, &settings.database).await?;
    log::info!("✅ MongoDB connected successfully");

    bootstrap::run(&db, &settings).await?;

    Ok(())
}
