// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the cargo invocations CI runs so they can be repeated locally with
//! `cargo xtask <command>`.
//!
//! ### Schema Verification
//!
//! `cargo xtask verify-schema` applies the persistence crate's embedded
//! migrations to a scratch `SQLite` database, introspects the result, and
//! compares it against the booking schema the persistence layer is written
//! for: the `bookings`, `audit_events`, and `notifications` tables, their
//! column types and nullability, foreign keys, and lookup indexes.
//!
//! No external services are needed; the check runs in CI after the tests.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Check if README.md is up-to-date
    #[command(visible_alias = "cr")]
    CheckReadme,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    /// Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos in the project
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Apply migrations to a scratch database and check the booking schema
    #[command(visible_alias = "vs")]
    VerifySchema,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::CheckReadme => check_readme(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::LintMarkdown => lint_markdown(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::FixTypos => fix_typos(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifySchema => verify_schema(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_schema()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Run cargo-rdme to check if README.md is up-to-date with the library documentation
fn check_readme() -> Result<()> {
    run_cargo(vec!["rdme", "--workspace-project", "campus-book", "--check"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs (and a soft fail on markdown)
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    if let Err(err) = lint_markdown() {
        tracing::warn!("known issue: markdownlint is currently noisy and can be ignored: {err}");
    }
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Lint markdown files using [markdownlint-cli2](https://github.com/DavidAnson/markdownlint-cli2)
fn lint_markdown() -> Result<()> {
    cmd!("markdownlint-cli2", "**/*.md", "!target", "!**/target").run_with_trace()?;

    Ok(())
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Fix typos in the project
fn fix_typos() -> Result<()> {
    cmd!("typos", "-w").run_with_trace()?;
    Ok(())
}

/// Run tests for libs, backends, and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Apply the booking migrations to a scratch database and verify the schema
///
/// ## What This Command Does
///
/// 1. Opens an in-memory `SQLite` database with foreign keys enforced
/// 2. Applies every embedded migration from `crates/persistence/migrations`
/// 3. Introspects tables, columns, keys, and indexes
/// 4. Compares the result with [`expected_schema`]
///
/// ## Failures
///
/// The command fails if a migration does not apply, a table is missing or
/// unexpected, or any column, key, or index differs from what the
/// persistence layer expects.
fn verify_schema() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting booking schema verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply migrations: {}", e))?;
    tracing::info!("Applied {} migration(s)", applied.len());

    tracing::info!("Introspecting schema");
    let actual = introspect_sqlite_schema(&mut conn)?;

    tracing::info!("Comparing against expected booking schema");
    compare_schemas(&expected_schema(), &actual)?;

    tracing::info!("✓ Booking schema verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<UniqueConstraint>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    name: String,
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueConstraint {
    columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
}

/// Builds a table description from `(name, type, nullable)` column triples
fn table(
    columns: &[(&str, &str, bool)],
    primary_key: &str,
    foreign_keys: &[(&str, &str, &str)],
    indexes: &[(&str, &[&str])],
) -> Table {
    Table {
        columns: columns
            .iter()
            .map(|(name, normalized_type, nullable)| {
                (
                    (*name).to_string(),
                    Column {
                        name: (*name).to_string(),
                        normalized_type: (*normalized_type).to_string(),
                        nullable: *nullable,
                    },
                )
            })
            .collect(),
        primary_keys: BTreeSet::from([primary_key.to_string()]),
        foreign_keys: foreign_keys
            .iter()
            .map(|(from_column, to_table, to_column)| ForeignKey {
                from_column: (*from_column).to_string(),
                to_table: (*to_table).to_string(),
                to_column: (*to_column).to_string(),
            })
            .collect(),
        unique_constraints: BTreeSet::new(),
        indexes: indexes
            .iter()
            .map(|(name, columns)| Index {
                name: (*name).to_string(),
                columns: columns.iter().map(|c| (*c).to_string()).collect(),
            })
            .collect(),
    }
}

/// The schema the persistence layer reads and writes
fn expected_schema() -> Schema {
    let bookings = table(
        &[
            ("booking_id", "integer", true),
            ("resource_type", "text", false),
            ("resource_id", "text", true),
            ("sub_area", "text", true),
            ("resource_key", "text", false),
            ("resource_name", "text", false),
            ("booking_date", "text", false),
            ("slots_json", "text", false),
            ("duration_mode", "text", false),
            ("event_title", "text", false),
            ("event_description", "text", false),
            ("attendees", "integer", false),
            ("department_category", "text", false),
            ("department", "text", false),
            ("faculty_incharge", "text", true),
            ("contact_number", "text", true),
            ("contact_email", "text", true),
            ("requester_id", "text", false),
            ("requester_name", "text", false),
            ("requester_email", "text", false),
            ("status", "text", false),
            ("status_reason", "text", true),
            ("reviewed_by", "text", true),
            ("reviewed_at", "text", true),
            ("created_at", "text", false),
        ],
        "booking_id",
        &[],
        &[
            (
                "idx_bookings_resource_date",
                &["resource_key", "booking_date"],
            ),
            ("idx_bookings_requester", &["requester_id"]),
            ("idx_bookings_date", &["booking_date"]),
        ],
    );

    let audit_events = table(
        &[
            ("event_id", "integer", true),
            ("booking_id", "integer", false),
            ("actor_json", "text", false),
            ("cause_json", "text", false),
            ("action_json", "text", false),
            ("before_snapshot_json", "text", false),
            ("after_snapshot_json", "text", false),
            ("created_at", "text", false),
        ],
        "event_id",
        &[("booking_id", "bookings", "booking_id")],
        &[("idx_audit_events_booking", &["booking_id"])],
    );

    let notifications = table(
        &[
            ("notification_id", "integer", true),
            ("user_id", "text", false),
            ("booking_id", "integer", true),
            ("title", "text", false),
            ("message", "text", false),
            ("kind", "text", false),
            ("is_read", "integer", false),
            ("created_at", "text", false),
        ],
        "notification_id",
        &[("booking_id", "bookings", "booking_id")],
        &[("idx_notifications_user", &["user_id", "is_read"])],
    );

    Schema {
        tables: BTreeMap::from([
            (String::from("audit_events"), audit_events),
            (String::from("bookings"), bookings),
            (String::from("notifications"), notifications),
        ]),
    }
}

/// Introspect `SQLite` schema
#[allow(clippy::too_many_lines)]
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    use diesel::RunQueryDsl;

    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Integer)]
        #[allow(dead_code)]
        cid: i32,
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        #[allow(dead_code)]
        unique: i32,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    // Get all tables
    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            unique_constraints: BTreeSet::new(),
            indexes: BTreeSet::new(),
        };

        // Get columns
        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            let normalized_type = normalize_sqlite_type(&col.r#type);
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    name: col.name.clone(),
                    normalized_type,
                    nullable: col.notnull == 0,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        // Get foreign keys
        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        // Get indexes and unique constraints
        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            let column_names: Vec<String> = index_columns.into_iter().map(|c| c.name).collect();

            // If origin is 'u', it's a unique constraint (including sqlite_autoindex_*)
            if idx.origin == "u" {
                table_info.unique_constraints.insert(UniqueConstraint {
                    columns: column_names,
                });
            } else if !idx.name.starts_with("sqlite_autoindex_") {
                // Regular index (skip auto-generated indexes that aren't unique constraints)
                table_info.indexes.insert(Index {
                    name: idx.name,
                    columns: column_names,
                });
            }
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Normalize `SQLite` type to common representation
fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let normalized = sqlite_type.to_uppercase();
    if normalized.contains("INT") {
        "integer".to_string()
    } else if normalized.contains("TEXT")
        || normalized.contains("CHAR")
        || normalized.contains("CLOB")
    {
        "text".to_string()
    } else if normalized.contains("REAL")
        || normalized.contains("FLOA")
        || normalized.contains("DOUB")
    {
        "real".to_string()
    } else if normalized.contains("BLOB") {
        "blob".to_string()
    } else {
        "text".to_string() // Default for SQLite
    }
}

/// Compare the migrated schema with the expected one and fail on mismatch
#[allow(clippy::too_many_lines)]
fn compare_schemas(expected: &Schema, actual: &Schema) -> Result<()> {
    let expected_tables: BTreeSet<_> = expected.tables.keys().collect();
    let actual_tables: BTreeSet<_> = actual.tables.keys().collect();

    if expected_tables != actual_tables {
        let mut errors = Vec::new();

        for table in expected_tables.difference(&actual_tables) {
            errors.push(format!("  - Table '{table}' is missing from the migrations"));
        }

        for table in actual_tables.difference(&expected_tables) {
            errors.push(format!(
                "  - Table '{table}' is created by the migrations but not expected"
            ));
        }

        return Err(color_eyre::eyre::eyre!(
            "❌ Schema check FAILED: Table mismatch\n{}",
            errors.join("\n")
        ));
    }

    for table_name in expected_tables {
        let expected_table = &expected.tables[table_name];
        let actual_table = &actual.tables[table_name];

        let expected_columns: BTreeSet<_> = expected_table.columns.keys().collect();
        let actual_columns: BTreeSet<_> = actual_table.columns.keys().collect();

        if expected_columns != actual_columns {
            let mut errors = Vec::new();

            for col in expected_columns.difference(&actual_columns) {
                errors.push(format!("    - Column '{col}' is missing"));
            }

            for col in actual_columns.difference(&expected_columns) {
                errors.push(format!("    - Column '{col}' is not expected"));
            }

            return Err(color_eyre::eyre::eyre!(
                "❌ Schema check FAILED: Column mismatch in table '{}'\n{}",
                table_name,
                errors.join("\n")
            ));
        }

        for col_name in expected_columns {
            let expected_col = &expected_table.columns[col_name];
            let actual_col = &actual_table.columns[col_name];

            if expected_col.normalized_type != actual_col.normalized_type {
                return Err(color_eyre::eyre::eyre!(
                    "❌ Schema check FAILED: Type mismatch in table '{}', column '{}'\n  expected: {}\n  migrated: {}",
                    table_name,
                    col_name,
                    expected_col.normalized_type,
                    actual_col.normalized_type
                ));
            }

            if expected_col.nullable != actual_col.nullable {
                return Err(color_eyre::eyre::eyre!(
                    "❌ Schema check FAILED: Nullability mismatch in table '{}', column '{}'\n  expected nullable: {}\n  migrated nullable: {}",
                    table_name,
                    col_name,
                    expected_col.nullable,
                    actual_col.nullable
                ));
            }
        }

        if expected_table.primary_keys != actual_table.primary_keys {
            return Err(color_eyre::eyre::eyre!(
                "❌ Schema check FAILED: Primary key mismatch in table '{}'\n  expected: {:?}\n  migrated: {:?}",
                table_name,
                expected_table.primary_keys,
                actual_table.primary_keys
            ));
        }

        if expected_table.foreign_keys != actual_table.foreign_keys {
            return Err(color_eyre::eyre::eyre!(
                "❌ Schema check FAILED: Foreign key mismatch in table '{}'\n  expected: {:?}\n  migrated: {:?}",
                table_name,
                expected_table.foreign_keys,
                actual_table.foreign_keys
            ));
        }

        // Booking overlap is enforced by the serialized check-then-insert,
        // not by a storage constraint, so no unique constraints are expected.
        if expected_table.unique_constraints != actual_table.unique_constraints {
            return Err(color_eyre::eyre::eyre!(
                "❌ Schema check FAILED: Unique constraint mismatch in table '{}'\n  expected: {:?}\n  migrated: {:?}",
                table_name,
                expected_table.unique_constraints,
                actual_table.unique_constraints
            ));
        }

        if expected_table.indexes != actual_table.indexes {
            return Err(color_eyre::eyre::eyre!(
                "❌ Schema check FAILED: Index mismatch in table '{}'\n  expected: {:?}\n  migrated: {:?}",
                table_name,
                expected_table.indexes,
                actual_table.indexes
            ));
        }
    }

    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
