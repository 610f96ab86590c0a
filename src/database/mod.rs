use mongodb::bson::doc;
use mongodb::{Client, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Opens an administrative session and selects the target database.
    /// The database itself is created implicitly on first write.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(database);

        // Test connection before provisioning starts
        db.run_command(doc! { "ping": 1 }).await?;

        Ok(Self { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let db = MongoDB::connect("mongodb://localhost:27017", "bigdata").await;
        assert!(db.is_ok());
    }
}
