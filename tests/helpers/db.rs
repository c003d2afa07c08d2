use apsis::{DeviceGrantStore, SeaOrmGrantRepository};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Once;
use tempfile::NamedTempFile;
use tracing_subscriber::{fmt, EnvFilter};

static INIT_TRACING: Once = Once::new();

/// Install an env-filtered subscriber so the store's debug/warn events show
/// up under RUST_LOG during test runs
fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt().with_env_filter(env_filter).with_test_writer().try_init();
    });
}

/// Test database with automatic cleanup
pub struct TestDb {
    connection: DatabaseConnection,
    _temp_file: NamedTempFile,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        init_tracing();

        // Create temporary SQLite database file
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_str().expect("Invalid temp file path");
        let db_url = format!("sqlite://{}?mode=rwc", db_path);

        // Connect to database
        let connection = Database::connect(&db_url)
            .await
            .expect("Failed to connect to test database");

        // Run migrations
        migration::Migrator::up(&connection, None)
            .await
            .expect("Failed to run migrations");

        Self {
            connection,
            _temp_file: temp_file,
        }
    }

    /// Get database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Repository over this database
    pub fn repo(&self) -> SeaOrmGrantRepository {
        SeaOrmGrantRepository::new(self.connection.clone())
    }

    /// Grant store with the JSON serializer over this database
    pub fn store(&self) -> DeviceGrantStore<SeaOrmGrantRepository> {
        DeviceGrantStore::with_json(self.repo())
    }
}
