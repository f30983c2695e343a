//! Core business logic for the account system.

use anyhow::Context;
use serde_json::Value;

use crate::auth::models::{ConnexionRequest, InscriptionRequest, TokenResponse};
use crate::database::models::{Credential, Document, UtilisateurPublic};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::document_repository::DocumentRepository;
use crate::state::AppState;
use crate::validation::{self, FieldRules, PasswordPolicy, Rule};

/// Collection holding one credential document per account.
pub const COLLECTION: &str = "utilisateurs";

const COURRIEL_RULES: &[Rule] = &[Rule::NotEmpty, Rule::IsEmail];
const MDP_INSCRIPTION_RULES: &[Rule] = &[
    Rule::NotEmpty,
    Rule::Length { min: 8, max: 20 },
    Rule::StrongPassword(PasswordPolicy::DEFAULT),
];
const MDP_CONNEXION_RULES: &[Rule] = &[Rule::IsString, Rule::NotEmpty];

const INSCRIPTION_RULES: &[FieldRules] = &[
    FieldRules::required("courriel", COURRIEL_RULES),
    FieldRules::required("mdp", MDP_INSCRIPTION_RULES),
];
const CONNEXION_RULES: &[FieldRules] = &[
    FieldRules::required("courriel", COURRIEL_RULES),
    FieldRules::required("mdp", MDP_CONNEXION_RULES),
];

/// Account service handling registration, login, and account listing.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance over the shared state.
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn accounts(&self) -> DocumentRepository<'_> {
        DocumentRepository::new(&self.state.pool, COLLECTION)
    }

    /// Registers a new account and signs a token for it.
    ///
    /// The uniqueness check and the insert are two separate store operations
    /// with no isolation between them, so two concurrent registrations for
    /// the same email can both pass the check and both persist.
    ///
    /// # Arguments
    /// * `payload` - Raw request body, validated here before anything else
    ///
    /// # Returns
    /// * `ServiceResult<TokenResponse>` - A token for the new account
    pub async fn register(&self, payload: &Value) -> ServiceResult<TokenResponse> {
        let normalized = validation::validate(payload, INSCRIPTION_RULES)?;
        let request: InscriptionRequest = serde_json::from_value(normalized)
            .context("normalized inscription payload did not match its shape")?;

        let accounts = self.accounts();
        let existing = accounts.find_by_field("courriel", &request.courriel).await?;
        if !existing.is_empty() {
            return Err(ServiceError::EmailTaken);
        }

        let credential = Credential {
            courriel: request.courriel,
            mdp: self.state.hasher.hash(&request.mdp)?,
        };
        let document = accounts
            .insert(&serde_json::to_value(&credential).context("serialize credential")?)
            .await?;

        let token = self.state.tokens.issue(&document.id)?;
        Ok(TokenResponse { token })
    }

    /// Checks a password against the stored credential and signs a token.
    ///
    /// The unknown-email path still burns a hash verification so its timing
    /// stays comparable to the wrong-password path.
    pub async fn login(&self, payload: &Value) -> ServiceResult<TokenResponse> {
        let normalized = validation::validate(payload, CONNEXION_RULES)?;
        let request: ConnexionRequest = serde_json::from_value(normalized)
            .context("normalized connexion payload did not match its shape")?;

        let matches = self
            .accounts()
            .find_by_field("courriel", &request.courriel)
            .await?;
        let Some(document) = matches.into_iter().next() else {
            self.state.hasher.verify_fallback(&request.mdp);
            return Err(ServiceError::EmailNotFound);
        };

        let Document { id, data } = document;
        let credential: Credential =
            serde_json::from_value(data).context("stored credential is not readable")?;

        if !self.state.hasher.verify(&request.mdp, &credential.mdp)? {
            return Err(ServiceError::BadPassword);
        }

        let token = self.state.tokens.issue(&id)?;
        Ok(TokenResponse { token })
    }

    /// Lists every account, with the password hash redacted.
    pub async fn list_users(&self) -> ServiceResult<Vec<UtilisateurPublic>> {
        let documents = self.accounts().list_all().await?;

        let utilisateurs = documents
            .into_iter()
            .map(|document| {
                let credential: Credential = serde_json::from_value(document.data)
                    .context("stored credential is not readable")?;
                Ok(UtilisateurPublic {
                    id: document.id,
                    courriel: credential.courriel,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(utilisateurs)
    }
}
