//! Deployment applications: the first resource type the sweeper handles.

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::errors::{BoxError, error_chain_text};
use crate::sweep::traits::ResourceKind;
use crate::sweep::types::{IdentityFormat, Page, ResourceConfig};

/// Registry key of the application sweeper.
pub const NAME: &str = "cloud_app";

const DESCRIPTION: &str = "deployment applications";

const NOT_FOUND_CODE: &str = "ApplicationDoesNotExistException";

/// One page of `ListApplications` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationPage {
    /// Application names. Entries may be absent.
    pub applications: Vec<Option<String>>,
    pub next_token: Option<String>,
}

/// The slice of the deployment service API the application sweeper needs.
#[async_trait]
pub trait AppsApi: Send + Sync + 'static {
    async fn list_applications(
        &self,
        next_token: Option<String>,
    ) -> Result<ApplicationPage, BoxError>;

    async fn delete_application(&self, name: &str) -> Result<(), BoxError>;
}

/// Lists applications by name and deletes them one by one.
pub struct AppKind<C> {
    format: IdentityFormat,
    _client: PhantomData<fn() -> C>,
}

impl<C: AppsApi> AppKind<C> {
    pub fn new(format: IdentityFormat) -> Self {
        Self {
            format,
            _client: PhantomData,
        }
    }
}

#[async_trait]
impl<C: AppsApi> ResourceKind for AppKind<C> {
    type Client = C;

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn identity_format(&self) -> &IdentityFormat {
        &self.format
    }

    async fn list_page(&self, client: &C, next_token: Option<String>) -> Result<Page, BoxError> {
        let output = client.list_applications(next_token).await?;
        Ok(Page::new(output.applications, output.next_token))
    }

    async fn delete(&self, client: &C, config: &ResourceConfig) -> Result<(), BoxError> {
        client.delete_application(&config.name).await
    }

    fn is_not_found(&self, error: &BoxError) -> bool {
        error_chain_text(error.as_ref()).contains(NOT_FOUND_CODE)
    }
}
