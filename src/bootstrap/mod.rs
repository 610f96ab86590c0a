use crate::config::{IndexSpec, Settings};
use crate::database::MongoDB;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use std::error::Error;

/// Runs the provisioning sequence in order: application user, collections,
/// indexes. No retries and no rollback; the first failure aborts the
/// remaining steps and propagates to the caller.
pub async fn run(db: &MongoDB, settings: &Settings) -> Result<(), Box<dyn Error>> {
    println!("Initializing BigData database...");

    create_app_user(db, settings).await?;
    create_collections(db, &settings.collections).await?;
    create_indexes(db, &settings.indexes).await?;

    println!("BigData database initialized successfully!");

    Ok(())
}

/// Creates the application user with readWrite scoped to the target database.
/// Fails if the user already exists.
async fn create_app_user(db: &MongoDB, settings: &Settings) -> Result<(), Box<dyn Error>> {
    log::info!(
        "👤 Creating user '{}' with readWrite on '{}'...",
        settings.user,
        settings.database
    );

    db.database()
        .run_command(doc! {
            "createUser": settings.user.as_str(),
            "pwd": settings.password.as_str(),
            "roles": [
                { "role": "readWrite", "db": settings.database.as_str() }
            ],
        })
        .await?;

    log::info!("   ✅ User created: {}", settings.user);

    Ok(())
}

/// Creates the collections explicitly, with no existence check first.
async fn create_collections(db: &MongoDB, collections: &[String]) -> Result<(), Box<dyn Error>> {
    log::info!("🗂️  Creating {} collections...", collections.len());

    for name in collections {
        db.database().create_collection(name).await?;
        log::info!("   ✅ Collection created: {}", name);
    }

    Ok(())
}

/// Builds the single-field ascending indexes, enabling the unique
/// constraint where the spec asks for it.
async fn create_indexes(db: &MongoDB, indexes: &[IndexSpec]) -> Result<(), Box<dyn Error>> {
    log::info!("🔧 Creating {} indexes...", indexes.len());

    for spec in indexes {
        let collection = db.database().collection::<Document>(&spec.collection);
        let field = spec.field.as_str();

        let model = IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(IndexOptions::builder().unique(spec.unique).build())
            .build();

        collection.create_index(model).await?;

        log::info!(
            "   ✅ Index created: {}({}){}",
            spec.collection,
            spec.field,
            if spec.unique { " [unique]" } else { "" }
        );
    }

    Ok(())
}
