//! Human-readable artifacts derived from a `DiffResult`

pub mod changelog;
pub mod migration;

pub use changelog::{ChangelogEntry, generate_changelog};
pub use migration::{MigrationGuide, MigrationStep, NO_MIGRATION_REQUIRED, generate_migration_guide};
