//! # Patient CLI Entry Point
//!
//! Terminal front end for the patient-records API. Each subcommand fills the
//! form of the matching web page and runs the same operation the page would.
//!
//! ## Usage
//!
//! ```bash
//! patient --config config/client.toml create \
//!   --name "Maria Silva" --birth-date 1985-03-14 --gender F --height 1.65 --weight 60
//! patient view 3
//! patient update --id 3 --weight 62
//! patient delete --id 3
//! ```
//!
//! Notifications are printed to stdout, logs go to stderr. The process exits
//! with status 1 when the operation failed.

use clap::{Parser, Subcommand};
use log::info;
use std::sync::Arc;

use patient_client::common::config::ClientConfig;
use patient_client::common::connection::HttpTransport;
use patient_client::ui::{fields, FormState, TerminalNavigator, TerminalPrompt};
use patient_client::utils::init_logger;
use patient_client::{ClientCore, Outcome, PatientClient};

/// Command-line arguments for the patient client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the client configuration file (TOML format)
    ///
    /// Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new patient
    Create {
        #[arg(long)]
        name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: String,
        /// M or F
        #[arg(long)]
        gender: String,
        /// Height in meters
        #[arg(long)]
        height: String,
        /// Weight in kilograms
        #[arg(long)]
        weight: String,
    },
    /// Show a patient with age, BMI and basal metabolic rate
    View {
        patient_id: String,
    },
    /// Same as view, with the ID taken from the search form
    Search {
        #[arg(long, default_value = "")]
        id: String,
    },
    /// Change some of a patient's fields
    Update {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        height: String,
        #[arg(long, default_value = "")]
        weight: String,
        #[arg(long, default_value = "")]
        gender: String,
    },
    /// Delete a patient after confirmation
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Open the detail page of a patient
    Goto {
        patient_id: String,
    },
}

impl Command {
    /// Page the user would be on when triggering this command.
    fn page(&self) -> &'static str {
        match self {
            Command::Create { .. } => "/cadastrar",
            Command::View { .. } | Command::Search { .. } => "/visualizar",
            Command::Update { .. } => "/atualizar",
            Command::Delete { .. } => "/deletar",
            Command::Goto { .. } => "/listar",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    info!("Using patient API at {}", config.api.base_url);

    let core = Arc::new(ClientCore::new(HttpTransport::new(&config.api)?));
    let client = PatientClient::new(
        &config,
        core,
        TerminalPrompt::stdio(),
        TerminalNavigator::new(args.command.page()),
    );

    let outcome = match args.command {
        Command::Create {
            name,
            birth_date,
            gender,
            height,
            weight,
        } => {
            let mut form = FormState::new()
                .with(fields::NAME, name)
                .with(fields::BIRTH_DATE, birth_date)
                .with(fields::GENDER, gender)
                .with(fields::HEIGHT, height)
                .with(fields::WEIGHT, weight);
            client.create_patient(&mut form).await
        }
        Command::View { patient_id } => client.view_patient(&patient_id).await,
        Command::Search { id } => {
            let form = FormState::new().with(fields::PATIENT_ID, id);
            client.search_patient(&form).await
        }
        Command::Update {
            id,
            name,
            height,
            weight,
            gender,
        } => {
            let mut form = FormState::new()
                .with(fields::PATIENT_ID, id)
                .with(fields::NAME, name)
                .with(fields::HEIGHT, height)
                .with(fields::WEIGHT, weight)
                .with(fields::SEX, gender);
            client.update_patient(&mut form).await
        }
        Command::Delete { id } => {
            let mut form = FormState::new().with(fields::PATIENT_ID, id);
            client.delete_patient(&mut form).await
        }
        Command::Goto { patient_id } => {
            client.go_to_view_patient(&patient_id);
            Outcome::Succeeded
        }
    };

    // Let a scheduled redirect land before the process exits
    client.navigator().wait_pending().await;

    if outcome.is_failure() {
        std::process::exit(1);
    }

    Ok(())
}
