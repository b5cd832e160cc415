//! High-level roles client
//!
//! Typed CRUD and bulk-update operations over roles. Every operation is one
//! request/response exchange against the injected [`Transport`]; the client
//! holds no state between calls and the server stays the sole source of
//! truth. Role names are percent-encoded before being embedded in a path.

use crate::config::Config;
use crate::error::Result;
use crate::model::{BulkUpdateRolesResponse, Role, RolePayload};
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;

const ROLES_PATH: &str = "/api/roles";

/// Parameters for [`RolesClient::save_role`]
#[derive(Debug, Clone)]
pub struct SaveRoleParams {
    /// The role to persist, as currently held client-side
    pub role: Role,

    /// Ask the server to reject the save if the role already exists
    pub create_only: bool,
}

impl SaveRoleParams {
    /// Save parameters with `create_only` defaulting to false
    pub fn new(role: Role) -> Self {
        Self {
            role,
            create_only: false,
        }
    }

    /// Require the role to not exist yet
    pub fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }
}

/// Client for the Warden role-management endpoints
#[derive(Clone)]
pub struct RolesClient {
    transport: Arc<dyn Transport>,
}

impl RolesClient {
    /// Create a client backed by the default HTTP transport
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    fn role_path(role_name: &str) -> String {
        format!("{}/{}", ROLES_PATH, urlencoding::encode(role_name))
    }

    /// Fetch all roles
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        tracing::debug!("listing roles");
        let body = self.transport.get(ROLES_PATH).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetch one role by exact name
    ///
    /// A missing role surfaces as [`crate::Error::NotFound`].
    pub async fn get_role(&self, role_name: &str) -> Result<Role> {
        tracing::debug!(role = role_name, "fetching role");
        let body = self.transport.get(&Self::role_path(role_name)).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Delete a role by name
    ///
    /// Deleting a role that does not exist is a server error, not swallowed
    /// here.
    pub async fn delete_role(&self, role_name: &str) -> Result<()> {
        tracing::debug!(role = role_name, "deleting role");
        self.transport.delete(&Self::role_path(role_name)).await
    }

    /// Create or update a role
    ///
    /// The role is normalized via [`RolePayload::from_role`] before
    /// transmission; the caller's value is untouched. With
    /// `create_only` set, saving an existing role fails with
    /// [`crate::Error::Conflict`].
    pub async fn save_role(&self, params: &SaveRoleParams) -> Result<()> {
        tracing::debug!(
            role = %params.role.name,
            create_only = params.create_only,
            "saving role"
        );
        let payload = RolePayload::from_role(&params.role);
        let query = [("createOnly", params.create_only.to_string())];
        self.transport
            .put(
                &Self::role_path(&params.role.name),
                serde_json::to_value(payload)?,
                &query,
            )
            .await
    }

    /// Update many roles in a single exchange
    ///
    /// Each role is normalized independently; the whole set goes out as one
    /// request keyed by role name. Per-role failures are reported in the
    /// returned summary, not as an `Err` — only a transport-wide failure
    /// rejects the call.
    pub async fn bulk_update_roles(&self, roles_update: &[Role]) -> Result<BulkUpdateRolesResponse> {
        tracing::debug!(count = roles_update.len(), "bulk updating roles");
        let mut roles = serde_json::Map::with_capacity(roles_update.len());
        for role in roles_update {
            roles.insert(
                role.name.clone(),
                serde_json::to_value(RolePayload::from_role(role))?,
            );
        }
        let body = serde_json::json!({ "roles": roles });
        let response = self.transport.post(ROLES_PATH, body).await?;
        Ok(serde_json::from_value(response)?)
    }
}
