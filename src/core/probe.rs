use crate::domain::model::{ProbeOutcome, ProbeTarget};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{ProbeError, Result};
use mongodb::bson::Document;
use std::time::Instant;

/// Runs the single lookup against a store and always releases it afterwards.
pub struct ProbeEngine<S: DocumentStore> {
    store: S,
    target: ProbeTarget,
}

impl<S: DocumentStore> ProbeEngine<S> {
    pub fn new(store: S, target: ProbeTarget) -> Self {
        Self { store, target }
    }

    /// Consumes the engine: the store is closed exactly once, whatever the
    /// lookup returned. A server-selection timeout is reported as
    /// [`ProbeOutcome::Unreachable`]; every other failure is returned as an error.
    pub async fn run(self) -> Result<ProbeOutcome> {
        tracing::info!("Fetching first document from {}", self.target);

        let started = Instant::now();
        let lookup = self.store.find_first(&self.target).await;
        tracing::debug!("Lookup finished in {:?}", started.elapsed());

        self.store.close().await;

        match lookup {
            Ok(Some(document)) => Ok(select_field(document, self.target.field)),
            Ok(None) => match &self.target.field {
                Some(field) => {
                    tracing::info!("No document in {} has field '{}'", self.target, field);
                    Ok(ProbeOutcome::FieldMissing {
                        field: field.clone(),
                    })
                }
                None => {
                    tracing::info!("Collection {} is empty", self.target);
                    Ok(ProbeOutcome::Empty)
                }
            },
            Err(ProbeError::ServerUnreachable { message }) => {
                tracing::warn!("Server selection timed out: {}", message);
                Ok(ProbeOutcome::Unreachable { detail: message })
            }
            Err(e) => Err(e),
        }
    }
}

fn select_field(mut document: Document, field: Option<String>) -> ProbeOutcome {
    let Some(field) = field else {
        return ProbeOutcome::Found { document };
    };

    match document.remove(&field) {
        Some(value) => ProbeOutcome::FieldFound { field, value },
        None => {
            tracing::info!("First document has no field '{}'", field);
            ProbeOutcome::FieldMissing { field }
        }
    }
}
