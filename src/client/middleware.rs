//! # Client Middleware
//!
//! This module contains the layer that turns a user action into a request and
//! the response into something the user sees.
//!
//! ## Responsibilities
//!
//! The [`PatientClient`] struct handles, for every operation:
//! - **Input Collection**: Reads form fields through a [`FormReader`]
//! - **Validation**: The only client-side rules are "update needs one field"
//!   and "search needs an ID"
//! - **Response Branching**: `success == true` vs. `success == false`
//! - **Feedback**: Notifications and the delete confirmation via [`UserPrompt`]
//! - **Navigation**: Form reset and delayed redirect after successful
//!   mutations via [`Navigator`]
//!
//! ## Request Workflow
//!
//! ```text
//! Idle -> Requesting -> Succeeded -> (mutations) Redirecting
//!                    \-> Failed
//! ```
//!
//! Every operation ends with exactly one notification. Nothing is retried and
//! nothing is cancelled once issued. Deletion adds a lookup and a confirmation
//! in front of the request.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let core = Arc::new(ClientCore::new(HttpTransport::new(&config.api)?));
//! let client = PatientClient::new(&config, core, TerminalPrompt::stdio(), TerminalNavigator::new("/"));
//!
//! let mut form = FormState::new().with(fields::PATIENT_ID, "3");
//! client.search_patient(&form).await;
//! ```

use log::{error, info, warn};
use std::fmt::Display;
use std::sync::Arc;

use crate::client::client::ClientCore;
use crate::common::config::{ClientConfig, NavigationConfig};
use crate::common::connection::Transport;
use crate::common::error::{ClientError, ClientResult};
use crate::common::messages::{gender_label, ApiResult, PatientInput, PatientUpdateInput};
use crate::ui::form::{fields, FormReader};
use crate::ui::navigator::Navigator;
use crate::ui::prompt::UserPrompt;

/// Texts shown to the user.
pub mod notices {
    pub const CREATED: &str = "Paciente cadastrado com sucesso!";
    pub const UPDATED: &str = "Paciente atualizado com sucesso!";
    pub const DELETED: &str = "Paciente deletado com sucesso!";

    pub const CREATE_FAILED: &str = "Erro ao cadastrar";
    pub const VIEW_FAILED: &str = "Erro ao buscar paciente";
    pub const UPDATE_FAILED: &str = "Erro ao atualizar";
    pub const DELETE_FAILED: &str = "Erro ao deletar";

    pub const VIEW_NOT_FOUND: &str = "Paciente nao encontrado";
    pub const DELETE_NOT_FOUND: &str = "Paciente não encontrado";

    pub const FILL_ONE_FIELD: &str = "Preencha pelo menos um campo para atualizar";
    pub const ENTER_ID: &str = "Digite um ID";
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the request
    Succeeded,
    /// The server refused, the lookup failed, or the request never completed
    Failed,
    /// Stopped on the client before any mutation was requested
    Aborted,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        self == Outcome::Failed
    }
}

/// Orchestrates patient operations on behalf of the user.
///
/// # Fields
///
/// * `core` - Issues the actual API requests
/// * `prompt` - Notifications and confirmation
/// * `navigator` - Page changes
/// * `navigation` - Listing/detail locations and the redirect delay
/// * `show_lookup_errors` - Whether lookups surface the server's error string
pub struct PatientClient<T, P, N> {
    core: Arc<ClientCore<T>>,
    prompt: P,
    navigator: N,
    navigation: NavigationConfig,
    show_lookup_errors: bool,
}

impl<T, P, N> PatientClient<T, P, N>
where
    T: Transport,
    P: UserPrompt,
    N: Navigator,
{
    pub fn new(config: &ClientConfig, core: Arc<ClientCore<T>>, prompt: P, navigator: N) -> Self {
        Self {
            core,
            prompt,
            navigator,
            navigation: config.navigation.clone(),
            show_lookup_errors: config.api.show_lookup_errors,
        }
    }

    pub fn core(&self) -> &ClientCore<T> {
        &self.core
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Registers a new patient from the create form.
    ///
    /// Reads `nome`, `data_nascimento`, `genero`, `altura` and `peso` as typed.
    /// On success the form is reset and the user is sent to the listing page
    /// after the configured delay.
    pub async fn create_patient<F: FormReader>(&self, form: &mut F) -> Outcome {
        let input = match collect_patient_input(form) {
            Ok(input) => input,
            Err(e) => return self.fail(notices::CREATE_FAILED, &e),
        };

        info!("Creating patient '{}'", input.name);
        match self.core.create_patient(&input).await {
            Ok(result) => self.finish_mutation(result, form, notices::CREATED),
            Err(e) => self.fail(notices::CREATE_FAILED, &e),
        }
    }

    /// Shows a patient's record and derived metrics.
    pub async fn view_patient(&self, patient_id: &str) -> Outcome {
        let result = match self.core.get_patient(patient_id).await {
            Ok(result) => result,
            Err(e) => return self.fail(notices::VIEW_FAILED, &e),
        };

        if !result.success {
            self.prompt
                .notify(&self.lookup_failure(notices::VIEW_NOT_FOUND, patient_id, &result));
            return Outcome::Failed;
        }

        match render_summary(&result) {
            Ok(summary) => {
                self.prompt.notify(&summary);
                Outcome::Succeeded
            }
            Err(e) => self.fail(notices::VIEW_FAILED, &e),
        }
    }

    /// Opens the detail page for a patient. No request is made.
    pub fn go_to_view_patient(&self, patient_id: &str) {
        self.navigator
            .redirect(&self.navigation.view_location(patient_id));
    }

    /// Deletes the patient named by `id_paciente` after the user confirms.
    ///
    /// The record is looked up first so the confirmation can show its name. The
    /// delete request is only sent when the lookup succeeded and the user
    /// agreed; a refusal ends the operation without a notification.
    pub async fn delete_patient<F: FormReader>(&self, form: &mut F) -> Outcome {
        let patient_id = match form.read(fields::PATIENT_ID) {
            Some(id) => id,
            None => {
                return self.fail(
                    notices::DELETE_FAILED,
                    &ClientError::MissingField(fields::PATIENT_ID),
                )
            }
        };

        let lookup = match self.core.get_patient(&patient_id).await {
            Ok(result) => result,
            Err(e) => return self.fail(notices::DELETE_FAILED, &e),
        };

        if !lookup.success {
            self.prompt
                .notify(&self.lookup_failure(notices::DELETE_NOT_FOUND, &patient_id, &lookup));
            return Outcome::Failed;
        }

        let name = match &lookup.patient {
            Some(patient) => patient.name.as_str(),
            None => {
                return self.fail(notices::DELETE_FAILED, &ClientError::MissingData("patient"))
            }
        };

        let question = format!("Tem certeza que deseja deletar o paciente \"{}\"?", name);
        if !self.prompt.confirm(&question) {
            info!("Deletion of patient {} declined", patient_id);
            return Outcome::Aborted;
        }

        match self.core.delete_patient(&patient_id).await {
            Ok(result) => self.finish_mutation(result, form, notices::DELETED),
            Err(e) => self.fail(notices::DELETE_FAILED, &e),
        }
    }

    /// Sends the filled-in fields of the update form as a partial update.
    ///
    /// Empty fields are left out. With nothing left to send the user is asked
    /// to fill at least one field and no request is made.
    pub async fn update_patient<F: FormReader>(&self, form: &mut F) -> Outcome {
        let update = PatientUpdateInput::new(
            form.read(fields::NAME),
            form.read(fields::HEIGHT),
            form.read(fields::WEIGHT),
            form.read(fields::SEX),
        );

        if update.is_empty() {
            self.prompt.notify(notices::FILL_ONE_FIELD);
            return Outcome::Aborted;
        }

        let patient_id = match form.read(fields::PATIENT_ID) {
            Some(id) => id,
            None => {
                return self.fail(
                    notices::UPDATE_FAILED,
                    &ClientError::MissingField(fields::PATIENT_ID),
                )
            }
        };

        match self.core.update_patient(&patient_id, &update).await {
            Ok(result) => self.finish_mutation(result, form, notices::UPDATED),
            Err(e) => self.fail(notices::UPDATE_FAILED, &e),
        }
    }

    /// Looks up the patient whose ID was typed into the search form.
    pub async fn search_patient<F: FormReader>(&self, form: &F) -> Outcome {
        match form.read(fields::PATIENT_ID).filter(|id| !id.is_empty()) {
            Some(patient_id) => self.view_patient(&patient_id).await,
            None => {
                self.prompt.notify(notices::ENTER_ID);
                Outcome::Aborted
            }
        }
    }

    /// Shared tail of create, update and delete.
    fn finish_mutation<F: FormReader>(
        &self,
        result: ApiResult,
        form: &mut F,
        success_notice: &str,
    ) -> Outcome {
        if !result.success {
            warn!("Request refused: {}", result.error_message());
            self.prompt
                .notify(&format!("Erro: {}", result.error_message()));
            return Outcome::Failed;
        }

        if let Some(message) = &result.message {
            info!("✅ {}", message);
        }

        self.prompt.notify(success_notice);
        form.reset();
        self.navigator.redirect_with_delay(
            &self.navigation.listing_path,
            self.navigation.redirect_delay(),
        );
        Outcome::Succeeded
    }

    /// Message for a failed lookup. The server's reason is always logged but
    /// only shown when `show_lookup_errors` is set.
    fn lookup_failure(&self, notice: &str, patient_id: &str, result: &ApiResult) -> String {
        warn!(
            "Lookup of patient {} failed: {}",
            patient_id,
            result.error_message()
        );

        if self.show_lookup_errors {
            format!("{}: {}", notice, result.error_message())
        } else {
            notice.to_string()
        }
    }

    fn fail(&self, prefix: &str, error: &ClientError) -> Outcome {
        error!("❌ {}: {}", prefix, error);
        self.prompt.notify(&format!("{}: {}", prefix, error));
        Outcome::Failed
    }
}

fn collect_patient_input<F: FormReader>(form: &F) -> ClientResult<PatientInput> {
    let field = |name: &'static str| form.read(name).ok_or(ClientError::MissingField(name));

    Ok(PatientInput {
        name: field(fields::NAME)?,
        birth_date: field(fields::BIRTH_DATE)?,
        gender: field(fields::GENDER)?,
        height: field(fields::HEIGHT)?,
        weight: field(fields::WEIGHT)?,
    })
}

/// Multi-line summary of a successful lookup.
fn render_summary(result: &ApiResult) -> ClientResult<String> {
    let patient = result
        .patient
        .as_ref()
        .ok_or(ClientError::MissingData("patient"))?;

    Ok(format!(
        "ID: {}\n\
         Nome: {}\n\
         Altura: {}m\n\
         Peso: {}kg\n\
         Genero: {}\n\
         Idade: {} anos\n\
         IMC: {} ({})\n\
         Taxa Metabolica Basal: {} kcal/dia",
        patient.id,
        patient.name,
        patient.height,
        patient.weight,
        gender_label(&patient.biological_gender),
        or_dash(&result.age),
        or_dash(&result.bmi),
        or_dash(&result.bmi_classification),
        or_dash(&result.basal_metabolic_rate),
    ))
}

fn or_dash<V: Display>(value: &Option<V>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_lists_record_and_metrics() {
        let result: ApiResult = serde_json::from_value(json!({
            "success": true,
            "patient": {
                "id": 3,
                "name": "João Lima",
                "height": 1.8,
                "weight": 81.0,
                "biological_gender": "M"
            },
            "age": 41,
            "bmi": 25.0,
            "bmi_classification": "Sobrepeso",
            "basal_metabolic_rate": 1765.5
        }))
        .unwrap();

        assert_eq!(
            render_summary(&result).unwrap(),
            "ID: 3\n\
             Nome: João Lima\n\
             Altura: 1.8m\n\
             Peso: 81kg\n\
             Genero: Masculino\n\
             Idade: 41 anos\n\
             IMC: 25 (Sobrepeso)\n\
             Taxa Metabolica Basal: 1765.5 kcal/dia"
        );
    }

    #[test]
    fn summary_marks_missing_metrics() {
        let result: ApiResult = serde_json::from_value(json!({
            "success": true,
            "patient": {
                "id": "p-9",
                "name": "Clara",
                "height": 1.6,
                "weight": 50.5,
                "biological_gender": "F"
            },
            "age": null,
            "bmi": null,
            "bmi_classification": null,
            "basal_metabolic_rate": null
        }))
        .unwrap();

        let summary = render_summary(&result).unwrap();
        assert!(summary.contains("Idade: - anos"));
        assert!(summary.contains("IMC: - (-)"));
        assert!(summary.contains("Genero: Feminino"));
    }

    #[test]
    fn summary_requires_patient() {
        let result: ApiResult = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(matches!(
            render_summary(&result),
            Err(ClientError::MissingData("patient"))
        ));
    }

    #[test]
    fn create_input_needs_every_field() {
        use crate::ui::form::FormState;

        let form = FormState::new()
            .with(fields::NAME, "Maria")
            .with(fields::BIRTH_DATE, "1980-01-01")
            .with(fields::GENDER, "F")
            .with(fields::HEIGHT, "1.65");

        assert!(matches!(
            collect_patient_input(&form),
            Err(ClientError::MissingField("peso"))
        ));
    }
}
