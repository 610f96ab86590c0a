use std::env;
use std::error::Error;

// Defaults reproduce the original provisioning values, so running with an
// empty environment provisions the exact same database.
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "bigdata";
const DEFAULT_USER: &str = "bigdata_user";
const DEFAULT_PASSWORD: &str = "bigdata_pass";
const DEFAULT_COLLECTIONS: &str = "sales,customers,product_analysis,city_analysis";
const DEFAULT_INDEXES: &str =
    "sales.customer_id,sales.product,sales.date,customers.city,customers.email:unique";

/// A single-field ascending index, optionally with a unique constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub collection: String,
    pub field: String,
    pub unique: bool,
}

impl IndexSpec {
    /// Parses a `collection.field` spec with an optional `:unique` suffix,
    /// e.g. `customers.email:unique`.
    pub fn parse(spec: &str) -> Result<Self, Box<dyn Error>> {
        let spec = spec.trim();
        let (path, unique) = match spec.strip_suffix(":unique") {
            Some(path) => (path, true),
            None => (spec, false),
        };

        match path.split_once('.') {
            Some((collection, field)) if !collection.is_empty() && !field.is_empty() => {
                Ok(Self {
                    collection: collection.to_string(),
                    field: field.to_string(),
                    unique,
                })
            }
            _ => Err(format!(
                "invalid index spec '{}' (expected collection.field[:unique])",
                spec
            )
            .into()),
        }
    }
}

/// Bootstrap settings, read from the environment with the original
/// provisioning values as fallbacks.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub collections: Vec<String>,
    pub indexes: Vec<IndexSpec>,
}

impl Settings {
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let mongodb_uri =
            env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string());
        let database =
            env::var("BOOTSTRAP_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
        let user = env::var("BOOTSTRAP_USER").unwrap_or_else(|_| DEFAULT_USER.to_string());
        let password =
            env::var("BOOTSTRAP_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());
        let collections =
            env::var("BOOTSTRAP_COLLECTIONS").unwrap_or_else(|_| DEFAULT_COLLECTIONS.to_string());
        let indexes =
            env::var("BOOTSTRAP_INDEXES").unwrap_or_else(|_| DEFAULT_INDEXES.to_string());

        Ok(Self {
            mongodb_uri,
            database,
            user,
            password,
            collections: parse_collections(&collections),
            indexes: parse_indexes(&indexes)?,
        })
    }
}

fn parse_collections(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_indexes(list: &str) -> Result<Vec<IndexSpec>, Box<dyn Error>> {
    list.split(',')
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .map(IndexSpec::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collections() {
        let collections = parse_collections(DEFAULT_COLLECTIONS);
        assert_eq!(
            collections,
            vec!["sales", "customers", "product_analysis", "city_analysis"]
        );
    }

    #[test]
    fn test_parse_collections_ignores_blank_entries() {
        let collections = parse_collections(" sales , customers ,, ");
        assert_eq!(collections, vec!["sales", "customers"]);
    }

    #[test]
    fn test_parse_index_spec() {
        let spec = IndexSpec::parse("sales.customer_id").unwrap();
        assert_eq!(spec.collection, "sales");
        assert_eq!(spec.field, "customer_id");
        assert!(!spec.unique);
    }

    #[test]
    fn test_parse_unique_index_spec() {
        let spec = IndexSpec::parse("customers.email:unique").unwrap();
        assert_eq!(spec.collection, "customers");
        assert_eq!(spec.field, "email");
        assert!(spec.unique);
    }

    #[test]
    fn test_parse_invalid_index_spec() {
        assert!(IndexSpec::parse("sales").is_err());
        assert!(IndexSpec::parse(".customer_id").is_err());
        assert!(IndexSpec::parse("sales.").is_err());
    }

    #[test]
    fn test_default_indexes() {
        let indexes = parse_indexes(DEFAULT_INDEXES).unwrap();
        assert_eq!(indexes.len(), 5);
        assert_eq!(
            indexes[4],
            IndexSpec {
                collection: "customers".to_string(),
                field: "email".to_string(),
                unique: true,
            }
        );
        assert!(indexes[..4].iter().all(|spec| !spec.unique));
    }
}
