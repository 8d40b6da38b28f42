use crate::domain::model::{OutputFormat, ProbeTarget};
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::Document;
use std::path::Path;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn uri(&self) -> &str;
    fn server_api_version(&self) -> &str;
    fn server_selection_timeout(&self) -> Duration;
    fn tls_ca_file(&self) -> Option<&Path>;
    fn app_name(&self) -> Option<&str>;
    fn target(&self) -> ProbeTarget;
    fn output_format(&self) -> OutputFormat;
}

/// A handle onto a document database that can serve a single lookup.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_first(&self, target: &ProbeTarget) -> Result<Option<Document>>;

    /// Releases the underlying connection. Called once, after the lookup.
    async fn close(&self);
}
