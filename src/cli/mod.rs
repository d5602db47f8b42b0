//! Command line front end: parses and validates input, calls the user
//! service, and renders results as JSON.

pub mod validate;

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};

use crate::app_system::UserSystem;
use crate::clients::UserClient;
use crate::config::AppConfig;
use crate::domain::{UserCreate, UserPatch};
use crate::user_store::{ErrorKind, UserError};
use validate::ValidationError;

pub const EXIT_INTERNAL: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID: u8 = 64;

#[derive(Debug, Parser)]
#[command(name = "user_directory", about = "Manage the user directory table")]
pub struct Cli {
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show one user with email and phone masked
    Get {
        #[arg(long)]
        user_id: String,
    },
    /// Create a user from all five fields; the id is assigned by the store
    Add(FieldArgs),
    /// Change some fields of an existing user
    Update(UpdateArgs),
}

/// The user columns a caller may set. Every flag is optional here; `add`
/// reports the ones it still needs.
#[derive(Debug, Args)]
pub struct FieldArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub user_id: String,
    #[command(flatten)]
    pub fields: FieldArgs,
}

impl FieldArgs {
    /// Validates each supplied flag and collects them by column name.
    fn into_fields(self, country_code: &str) -> Result<HashMap<String, String>, ValidationError> {
        let mut fields = HashMap::new();
        if let Some(name) = self.name {
            validate::name(&name)?;
            fields.insert("name".to_string(), name);
        }
        if let Some(age) = self.age {
            validate::age(age)?;
            fields.insert("age".to_string(), age.to_string());
        }
        if let Some(city) = self.city {
            fields.insert("city".to_string(), city);
        }
        if let Some(email) = self.email {
            validate::email(&email)?;
            fields.insert("email".to_string(), email);
        }
        if let Some(phone_number) = self.phone_number {
            validate::phone_number(&phone_number, country_code)?;
            fields.insert("phone_number".to_string(), phone_number);
        }
        Ok(fields)
    }
}

impl UpdateArgs {
    fn validate(self, country_code: &str) -> Result<(String, UserPatch), ValidationError> {
        let patch = UserPatch::from_fields(self.fields.into_fields(country_code)?);
        if patch.is_empty() {
            return Err(ValidationError::NoUpdatableFields);
        }
        Ok((self.user_id, patch))
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    User(#[from] UserError),
}

impl CommandError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Invalid(_) => EXIT_INVALID,
            CommandError::User(e) => match e.kind() {
                ErrorKind::NotFound => EXIT_NOT_FOUND,
                ErrorKind::Invalid => EXIT_INVALID,
                ErrorKind::Internal => EXIT_INTERNAL,
            },
        }
    }
}

/// Runs one command against `client` and returns the JSON to print.
pub async fn execute(client: &UserClient, command: Command, country_code: &str) -> Result<Value, CommandError> {
    match command {
        Command::Get { user_id } => {
            let user = client
                .get_user(user_id.clone())
                .await?
                .ok_or(UserError::NotFound(user_id))?;
            Ok(json!(user))
        }
        Command::Add(args) => {
            let fields = args.into_fields(country_code)?;
            let payload = UserCreate::from_fields(&fields).map_err(UserError::MissingField)?;
            let user_id = client.add_user(payload).await?;
            Ok(json!({ "user_id": user_id }))
        }
        Command::Update(args) => {
            let (user_id, patch) = args.validate(country_code)?;
            let outcome = client.update_user(user_id.clone(), patch).await?;
            let user = client
                .get_user(user_id.clone())
                .await?
                .ok_or(UserError::NotFound(user_id))?;
            Ok(json!({ "message": outcome.to_string(), "user": user }))
        }
    }
}

/// Exit code for a command line that failed to parse. Help and version
/// requests come through the same path and still succeed.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
        _ => EXIT_INVALID,
    }
}

/// Starts the system, runs the command, shuts down, and maps the result to an exit code.
pub async fn run(cli: Cli) -> ExitCode {
    let system = UserSystem::from_config(&cli.config);
    let result = execute(&system.user_client, cli.command, &cli.config.country_code).await;

    if let Err(e) = system.shutdown().await {
        error!(error = %e, "Shutdown failed");
    }

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            info!(error = %e, "Command failed");
            eprintln!("{}", json!({ "detail": e.to_string() }));
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTable;
    use crate::user_store::UserStore;

    fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("user_directory").chain(args.iter().copied()))
    }

    fn parse(args: &[&str]) -> Cli {
        try_parse(args).unwrap()
    }

    fn add_command() -> Command {
        parse(&[
            "add",
            "--name", "Ravi Kumar",
            "--age", "30",
            "--city", "Pune",
            "--email", "ravi.kumar@gmail.com",
            "--phone-number", "+91-98765-43210",
        ])
        .command
    }

    #[test]
    fn test_parse_global_config() {
        let cli = parse(&["get", "--user-id", "U_0001", "--db-path", "/tmp/users.csv", "--country-code", "44"]);
        assert_eq!(cli.config.db_path, std::path::PathBuf::from("/tmp/users.csv"));
        assert_eq!(cli.config.country_code, "44");
        assert!(matches!(cli.command, Command::Get { ref user_id } if user_id == "U_0001"));
    }

    #[test]
    fn test_parse_failures_exit_invalid() {
        let cases: [&[&str]; 4] = [
            &["add", "--name", "Ravi", "--age", "abc"],
            &["update", "--city", "Goa"],
            &["get"],
            &["remove", "--user-id", "U_0001"],
        ];
        for args in cases {
            let err = try_parse(args).unwrap_err();
            assert_eq!(usage_exit_code(&err), EXIT_INVALID, "args: {args:?}");
        }

        let help = try_parse(&["--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&help), 0);
    }

    #[tokio::test]
    async fn test_add_names_missing_fields() {
        let system = UserSystem::start(UserStore::new(MemoryTable::new()), &AppConfig::default());
        let client = &system.user_client;

        let partial = parse(&["add", "--name", "Ravi", "--city", "Pune"]).command;
        let err = execute(client, partial, "91").await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::User(UserError::MissingField(ref missing))
                if missing == &["age", "email", "phone_number"]
        ));
        assert_eq!(err.to_string(), "Missing fields for add_user: age, email, phone_number");
        assert_eq!(err.exit_code(), EXIT_INVALID);
        assert_eq!(client.get_user_count().await.unwrap(), 0);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_add_rejects_non_ascii_phone_digits() {
        let system = UserSystem::start(UserStore::new(MemoryTable::new()), &AppConfig::default());
        let add = parse(&[
            "add",
            "--name", "Ravi",
            "--age", "30",
            "--city", "Pune",
            "--email", "ravi@gmail.com",
            "--phone-number", "+91-٩٨٧٦٥-٤٣٢١٠",
        ])
        .command;

        let err = execute(&system.user_client, add, "91").await.unwrap_err();
        assert!(matches!(err, CommandError::Invalid(ValidationError::PhoneNumber { .. })));
        assert_eq!(err.exit_code(), EXIT_INVALID);

        system.shutdown().await.unwrap();
    }

    #[test]
    fn test_update_without_fields_is_invalid() {
        let Command::Update(args) = parse(&["update", "--user-id", "U_0001"]).command else {
            panic!("expected update");
        };
        assert_eq!(args.validate("91").unwrap_err(), ValidationError::NoUpdatableFields);
    }

    #[tokio::test]
    async fn test_execute_add_get_update() {
        let system = UserSystem::start(UserStore::new(MemoryTable::new()), &AppConfig::default());
        let client = &system.user_client;

        let added = execute(client, add_command(), "91").await.unwrap();
        assert_eq!(added, json!({ "user_id": "U_0001" }));

        let update = parse(&["update", "--user-id", "U_0001", "--city", "Mumbai"]).command;
        let updated = execute(client, update, "91").await.unwrap();
        assert_eq!(updated["message"], "user U_0001 updated successfully.");
        assert_eq!(updated["user"]["city"], "Mumbai");
        assert_eq!(updated["user"]["email"], "ravXXXX@gmaXXXX");

        let fetched = execute(client, parse(&["get", "--user-id", "U_0001"]).command, "91")
            .await
            .unwrap();
        assert_eq!(fetched["phone_number"], "+91-98XXX-XXX10");
        assert_eq!(fetched["name"], "Ravi Kumar");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_exit_codes() {
        let system = UserSystem::start(UserStore::new(MemoryTable::new()), &AppConfig::default());
        let client = &system.user_client;

        let missing = execute(client, parse(&["get", "--user-id", "U_0009"]).command, "91")
            .await
            .unwrap_err();
        assert_eq!(missing.exit_code(), EXIT_NOT_FOUND);

        let update = parse(&["update", "--user-id", "U_0009", "--city", "Goa"]).command;
        let missing = execute(client, update, "91").await.unwrap_err();
        assert_eq!(missing.exit_code(), EXIT_NOT_FOUND);
        assert_eq!(missing.to_string(), "user U_0009 not found");

        let bad_age = parse(&[
            "add",
            "--name", "Ravi",
            "--age", "12",
            "--city", "Pune",
            "--email", "ravi@gmail.com",
            "--phone-number", "+91-98765-43210",
        ])
        .command;
        let invalid = execute(client, bad_age, "91").await.unwrap_err();
        assert_eq!(invalid.exit_code(), EXIT_INVALID);

        system.shutdown().await.unwrap();
    }
}
