//! The listing client: mirrors the backend collection, drives the form,
//! and issues writes followed by a full reload.

use crate::api::{ApiError, PropertyApi};
use crate::models::{FormError, Property, PropertyForm, PropertyId};
use crate::view::{RowAction, Table};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this property?";

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid form input: {0}")]
    Form(#[from] FormError),

    #[error("could not load properties: {0}")]
    Load(#[source] ApiError),

    /// The create, update, or delete itself failed. The reload still ran.
    #[error("write was not applied: {0}")]
    Write(#[source] ApiError),

    /// The write succeeded but the listing could not be refreshed
    #[error("write applied but reload failed: {0}")]
    Reload(#[source] ApiError),
}

/// What a successful submit did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitKind {
    Created(Property),
    Updated(Property),
}

/// Everything the client remembers between events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    /// Last successfully fetched collection, in backend order
    pub properties: Vec<Property>,
    /// Property the form currently represents, `None` for a new entry
    pub editing_id: Option<PropertyId>,
    pub last_synced: Option<DateTime<Utc>>,
}

impl ClientState {
    pub fn find(&self, id: PropertyId) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == Some(id))
    }

    /// One-line freshness note shown under the table
    pub fn sync_status(&self) -> String {
        match self.last_synced {
            Some(at) => format!(
                "{} properties, synced at {}",
                self.properties.len(),
                at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            None => "not synced yet".to_string(),
        }
    }
}

pub struct ListingClient<A: PropertyApi> {
    api: A,
    state: ClientState,
    form: PropertyForm,
}

impl<A: PropertyApi> ListingClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ClientState::default(),
            form: PropertyForm::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn editing_id(&self) -> Option<PropertyId> {
        self.state.editing_id
    }

    pub fn form(&self) -> &PropertyForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PropertyForm {
        &mut self.form
    }

    /// Replace local state with the backend's collection.
    ///
    /// On failure the previous collection is kept and the error returned.
    pub async fn load(&mut self) -> Result<usize, ClientError> {
        match self.api.list().await {
            Ok(properties) => {
                let count = properties.len();
                self.state.properties = properties;
                self.state.last_synced = Some(Utc::now());
                info!("Loaded {} properties from {}", count, self.api.endpoint());
                Ok(count)
            }
            Err(e) => {
                warn!("Error fetching properties: {}", e);
                Err(ClientError::Load(e))
            }
        }
    }

    /// Send the form as an update (while editing) or a create, then reset
    /// the form and reload.
    ///
    /// The reload runs whether or not the write succeeded. A failed write is
    /// reported as [`ClientError::Write`] after the reload.
    pub async fn submit(&mut self) -> Result<SubmitKind, ClientError> {
        let input = self.form.parse()?;

        let written = match self.state.editing_id.take() {
            Some(id) => {
                debug!("Updating property {}", id);
                self.api.update(id, &input).await.map(SubmitKind::Updated)
            }
            None => {
                debug!("Creating property at {:?}", input.address);
                self.api.create(&input).await.map(SubmitKind::Created)
            }
        };

        self.form.reset();
        let reloaded = self.load().await;

        match written {
            Ok(kind) => {
                match &kind {
                    SubmitKind::Created(p) => info!("Created property {:?}", p.id),
                    SubmitKind::Updated(p) => info!("Updated property {:?}", p.id),
                }
                reloaded.map_err(reload_error)?;
                Ok(kind)
            }
            Err(e) => {
                warn!("Error saving property: {}", e);
                Err(ClientError::Write(e))
            }
        }
    }

    /// Load the property with `id` into the form for editing.
    /// Returns false, changing nothing, when it is not in local state.
    pub fn begin_edit(&mut self, id: PropertyId) -> bool {
        let Some(property) = self.state.find(id) else {
            debug!("Property {} not in listing, ignoring edit", id);
            return false;
        };

        self.form.fill(property);
        self.state.editing_id = Some(id);
        true
    }

    /// Discard the form and go back to creating a new entry
    pub fn cancel_edit(&mut self) {
        self.form.reset();
        self.state.editing_id = None;
    }

    /// Delete a property after confirmation, then reload.
    ///
    /// Returns `Ok(false)` without any request when the user declines.
    pub async fn remove(
        &mut self,
        id: PropertyId,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, ClientError> {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!("Delete of property {} cancelled", id);
            return Ok(false);
        }

        let deleted = self.api.delete(id).await;
        let reloaded = self.load().await;

        match deleted {
            Ok(()) => {
                info!("Deleted property {}", id);
                reloaded.map_err(reload_error)?;
                Ok(true)
            }
            Err(e) => {
                warn!("Error deleting property: {}", e);
                Err(ClientError::Write(e))
            }
        }
    }

    /// Run the handler bound to a row action
    pub async fn dispatch(
        &mut self,
        action: RowAction,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, ClientError> {
        match action {
            RowAction::Edit(id) => Ok(self.begin_edit(id)),
            RowAction::Delete(id) => self.remove(id, confirm).await,
        }
    }

    /// Fetch one property straight from the backend; local state is untouched
    pub async fn show(&self, id: PropertyId) -> Result<Property, ClientError> {
        self.api.get(id).await.map_err(|e| {
            warn!("Error fetching property {}: {}", id, e);
            ClientError::Load(e)
        })
    }

    /// Fresh table of the current collection
    pub fn render(&self) -> Table {
        Table::from_properties(&self.state.properties)
    }
}

fn reload_error(err: ClientError) -> ClientError {
    match err {
        ClientError::Load(e) => ClientError::Reload(e),
        other => other,
    }
}
