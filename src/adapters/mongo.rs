use crate::domain::model::ProbeTarget;
use crate::domain::ports::{ConfigProvider, DocumentStore};
use crate::utils::error::{ProbeError, Result};
use crate::utils::redact::redact_uri;
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion, Tls, TlsOptions};
use mongodb::{Client, Collection};

/// `DocumentStore` backed by the official MongoDB driver.
///
/// Building the store does not touch the network; the first round trip
/// happens in [`DocumentStore::find_first`], which is where server selection
/// (and therefore the configured timeout) applies.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    pub async fn connect(config: &impl ConfigProvider) -> Result<Self> {
        tracing::info!("Connecting to {}", redact_uri(config.uri()));

        let options = Self::client_options(config).await?;
        let client = Client::with_options(options)?;

        Ok(Self { client })
    }

    /// Resolves driver options. `mongodb+srv` URIs trigger a DNS lookup here.
    pub async fn client_options(config: &impl ConfigProvider) -> Result<ClientOptions> {
        let mut options = ClientOptions::parse(config.uri()).await?;

        options.server_api = Some(server_api(config.server_api_version())?);
        options.server_selection_timeout = Some(config.server_selection_timeout());

        if let Some(ca_file) = config.tls_ca_file() {
            let mut tls = TlsOptions::default();
            tls.ca_file_path = Some(ca_file.to_path_buf());
            options.tls = Some(Tls::Enabled(tls));
        }

        if let Some(app_name) = config.app_name() {
            options.app_name = Some(app_name.to_string());
        }

        tracing::debug!(
            "Client options: server_selection_timeout={:?}, app_name={:?}, tls={}",
            options.server_selection_timeout,
            options.app_name,
            options.tls.is_some()
        );

        Ok(options)
    }

    fn collection(&self, target: &ProbeTarget) -> Collection<Document> {
        self.client
            .database(&target.database)
            .collection::<Document>(&target.collection)
    }
}

/// Filter for the lookup. With a field, only documents carrying that key
/// match, since the collection keeps one document per key.
pub fn lookup_filter(target: &ProbeTarget) -> Document {
    let mut filter = Document::new();
    if let Some(field) = &target.field {
        filter.insert(field.clone(), doc! { "$exists": true });
    }
    filter
}

fn server_api(version: &str) -> Result<ServerApi> {
    match version {
        "1" => Ok(ServerApi::builder().version(ServerApiVersion::V1).build()),
        other => Err(ProbeError::InvalidConfigValueError {
            field: "connection.server_api_version".to_string(),
            value: other.to_string(),
            reason: "Only server API version 1 is supported".to_string(),
        }),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_first(&self, target: &ProbeTarget) -> Result<Option<Document>> {
        let filter = lookup_filter(target);
        tracing::debug!("find_one on {} with filter {}", target, filter);
        let document = self.collection(target).find_one(filter).await?;
        Ok(document)
    }

    async fn close(&self) {
        tracing::debug!("Shutting down MongoDB client");
        self.client.clone().shutdown().await;
    }
}
