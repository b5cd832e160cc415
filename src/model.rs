//! Role data model and save-payload normalization
//!
//! `Role` is the representation the server returns on read. `RolePayload` is
//! the canonical representation written back on save: placeholder privilege
//! rows removed, empty query restrictions dropped, feature grants cleared when
//! a base privilege supersedes them, and read-only metadata stripped. The
//! payload type has no `name` field at all — the role name travels in the URL
//! path (or as the bulk map key), never in the body.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named bundle of index and feature privileges granted to users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name, immutable once persisted
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Arbitrary caller-owned metadata, round-tripped as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,

    /// Elasticsearch-level privileges
    pub elasticsearch: ElasticsearchPrivileges,

    /// Kibana feature privilege groups
    #[serde(default)]
    pub kibana: Vec<KibanaPrivilege>,

    /// Server-derived metadata, present only on read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient_metadata: Option<serde_json::Value>,

    /// Applications the server could not map to known features, read-only
    #[serde(
        default,
        rename = "_unrecognized_applications",
        skip_serializing_if = "Option::is_none"
    )]
    pub unrecognized_applications: Option<Vec<String>>,

    /// Transform diagnostics reported by the server, read-only
    #[serde(
        default,
        rename = "_transform_error",
        skip_serializing_if = "Option::is_none"
    )]
    pub transform_error: Option<Vec<String>>,
}

/// Elasticsearch privilege section of a role
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElasticsearchPrivileges {
    /// Cluster-level privilege names
    #[serde(default)]
    pub cluster: Vec<String>,

    /// Users this role may impersonate
    #[serde(default)]
    pub run_as: Vec<String>,

    /// Index privilege grants
    #[serde(default)]
    pub indices: Vec<IndexPrivilege>,

    /// Remote index privilege grants; absent when the cluster has no remotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_indices: Option<Vec<RemoteIndexPrivilege>>,
}

/// A grant over one or more index patterns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexPrivilege {
    /// Index name patterns
    #[serde(default)]
    pub names: Vec<String>,

    /// Privilege names granted over the matched indices
    #[serde(default)]
    pub privileges: Vec<String>,

    /// Optional document-level restriction query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// A grant over index patterns on remote clusters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoteIndexPrivilege {
    /// Remote cluster identifiers
    #[serde(default)]
    pub clusters: Vec<String>,

    /// Index name patterns
    #[serde(default)]
    pub names: Vec<String>,

    /// Privilege names granted over the matched indices
    #[serde(default)]
    pub privileges: Vec<String>,

    /// Optional document-level restriction query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// One Kibana privilege group: base privileges plus per-feature grants
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KibanaPrivilege {
    /// Base privileges; when non-empty they supersede `feature`
    #[serde(default)]
    pub base: Vec<String>,

    /// Per-feature privilege grants, keyed by feature id
    #[serde(default)]
    pub feature: BTreeMap<String, Vec<String>>,

    /// Spaces this group applies to
    #[serde(default)]
    pub spaces: Vec<String>,
}

impl IndexPrivilege {
    /// A placeholder is an empty editor row: no names and no privileges
    fn is_placeholder(&self) -> bool {
        self.names.is_empty() && self.privileges.is_empty()
    }
}

impl RemoteIndexPrivilege {
    /// Same rule as [`IndexPrivilege`], except a named remote cluster makes
    /// the entry meaningful even with empty names and privileges
    fn is_placeholder(&self) -> bool {
        if !self.clusters.is_empty() {
            return false;
        }
        self.names.is_empty() && self.privileges.is_empty()
    }
}

/// Drop an empty `query` so the key is omitted from the wire body
fn clean_query(query: &Option<String>) -> Option<String> {
    match query.as_deref() {
        None | Some("") => None,
        Some(q) => Some(q.to_string()),
    }
}

/// Elasticsearch section of the save payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticsearchPayload {
    pub cluster: Vec<String>,
    pub run_as: Vec<String>,
    pub indices: Vec<IndexPrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_indices: Option<Vec<RemoteIndexPrivilege>>,
}

/// The canonical wire body for a role save
///
/// Built from a [`Role`] by [`RolePayload::from_role`]; the input role is
/// never mutated. `name` and the server-derived read-only fields do not exist
/// on this type, so they can never round-trip back on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub elasticsearch: ElasticsearchPayload,
    pub kibana: Vec<KibanaPrivilege>,
}

impl RolePayload {
    /// Normalize a role into its canonical save representation
    ///
    /// - placeholder index and remote-index rows are removed;
    /// - empty `query` values are dropped entirely;
    /// - feature grants are cleared wherever a base privilege is set;
    /// - a present `remote_indices` array stays present even when filtering
    ///   empties it, while an absent one stays absent.
    pub fn from_role(role: &Role) -> Self {
        let indices = role
            .elasticsearch
            .indices
            .iter()
            .filter(|entry| !entry.is_placeholder())
            .map(|entry| IndexPrivilege {
                names: entry.names.clone(),
                privileges: entry.privileges.clone(),
                query: clean_query(&entry.query),
            })
            .collect();

        let remote_indices = role.elasticsearch.remote_indices.as_ref().map(|entries| {
            entries
                .iter()
                .filter(|entry| !entry.is_placeholder())
                .map(|entry| RemoteIndexPrivilege {
                    clusters: entry.clusters.clone(),
                    names: entry.names.clone(),
                    privileges: entry.privileges.clone(),
                    query: clean_query(&entry.query),
                })
                .collect()
        });

        let kibana = role
            .kibana
            .iter()
            .map(|group| {
                let mut group = group.clone();
                // A base privilege supersedes feature grants; the two must
                // not coexist in storage
                if !group.base.is_empty() {
                    group.feature.clear();
                }
                group
            })
            .collect();

        Self {
            description: role.description.clone(),
            metadata: role.metadata.clone(),
            elasticsearch: ElasticsearchPayload {
                cluster: role.elasticsearch.cluster.clone(),
                run_as: role.elasticsearch.run_as.clone(),
                indices,
                remote_indices,
            },
            kibana,
        }
    }
}

/// Per-role outcome summary returned by a bulk update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateRolesResponse {
    /// Names of the roles the server updated
    #[serde(default)]
    pub updated: Vec<String>,

    /// Per-role failures, keyed by role name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, BulkUpdateError>,
}

/// Why one role in a bulk update failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateError {
    /// HTTP-style status code the server assigned to this failure
    pub status: u16,

    /// Server-provided reason
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn index(names: &[&str], privileges: &[&str]) -> IndexPrivilege {
        IndexPrivilege {
            names: names.iter().map(|s| s.to_string()).collect(),
            privileges: privileges.iter().map(|s| s.to_string()).collect(),
            query: None,
        }
    }

    fn role_with_indices(indices: Vec<IndexPrivilege>) -> Role {
        Role {
            name: "test-role".into(),
            description: None,
            metadata: None,
            elasticsearch: ElasticsearchPrivileges {
                indices,
                ..Default::default()
            },
            kibana: Vec::new(),
            transient_metadata: None,
            unrecognized_applications: None,
            transform_error: None,
        }
    }

    #[test]
    fn test_placeholder_indices_removed() {
        let role = role_with_indices(vec![
            index(&[], &[]),
            index(&["logs-*"], &[]),
            index(&[], &["read"]),
            index(&["metrics-*"], &["read"]),
        ]);

        let payload = RolePayload::from_role(&role);
        assert_eq!(payload.elasticsearch.indices.len(), 3);
        assert_eq!(payload.elasticsearch.indices[0].names, vec!["logs-*"]);
    }

    #[test]
    fn test_remote_placeholder_kept_when_clusters_present() {
        let mut role = role_with_indices(Vec::new());
        role.elasticsearch.remote_indices = Some(vec![
            RemoteIndexPrivilege {
                clusters: vec!["cluster-a".into()],
                ..Default::default()
            },
            RemoteIndexPrivilege::default(),
        ]);

        let payload = RolePayload::from_role(&role);
        let remote = payload.elasticsearch.remote_indices.unwrap();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].clusters, vec!["cluster-a"]);
    }

    #[test]
    fn test_absent_remote_indices_stays_absent() {
        let role = role_with_indices(Vec::new());
        let payload = RolePayload::from_role(&role);
        assert!(payload.elasticsearch.remote_indices.is_none());

        let body = serde_json::to_value(&payload).unwrap();
        assert!(body["elasticsearch"].get("remote_indices").is_none());
    }

    #[test]
    fn test_empty_query_dropped_real_query_kept() {
        let mut with_empty = index(&["a"], &["read"]);
        with_empty.query = Some(String::new());
        let mut with_query = index(&["b"], &["read"]);
        with_query.query = Some("user.id: 1".into());

        let role = role_with_indices(vec![with_empty, with_query]);
        let payload = RolePayload::from_role(&role);

        assert_eq!(payload.elasticsearch.indices[0].query, None);
        assert_eq!(
            payload.elasticsearch.indices[1].query.as_deref(),
            Some("user.id: 1")
        );

        let body = serde_json::to_value(&payload).unwrap();
        assert!(body["elasticsearch"]["indices"][0].get("query").is_none());
        assert_eq!(body["elasticsearch"]["indices"][1]["query"], "user.id: 1");
    }

    #[test]
    fn test_base_privilege_clears_feature_grants() {
        let mut role = role_with_indices(Vec::new());
        role.kibana = vec![
            KibanaPrivilege {
                base: vec!["all".into()],
                feature: BTreeMap::from([("dashboard".into(), vec!["read".into()])]),
                spaces: vec!["*".into()],
            },
            KibanaPrivilege {
                base: Vec::new(),
                feature: BTreeMap::from([("dashboard".into(), vec!["read".into()])]),
                spaces: vec!["marketing".into()],
            },
        ];

        let payload = RolePayload::from_role(&role);
        assert!(payload.kibana[0].feature.is_empty());
        assert_eq!(payload.kibana[0].base, vec!["all"]);
        assert_eq!(
            payload.kibana[1].feature.get("dashboard"),
            Some(&vec!["read".to_string()])
        );
    }

    #[test]
    fn test_input_role_never_mutated() {
        let mut role = role_with_indices(vec![index(&[], &[]), index(&["logs-*"], &["read"])]);
        role.kibana = vec![KibanaPrivilege {
            base: vec!["all".into()],
            feature: BTreeMap::from([("discover".into(), vec!["read".into()])]),
            spaces: vec!["*".into()],
        }];
        let before = role.clone();

        let _ = RolePayload::from_role(&role);
        assert_eq!(role, before);
    }

    #[test]
    fn test_read_only_fields_never_serialized() {
        let mut role = role_with_indices(Vec::new());
        role.transient_metadata = Some(json!({"enabled": true}));
        role.unrecognized_applications = Some(vec!["legacy-app".into()]);
        role.transform_error = Some(vec!["kibana".into()]);

        let body = serde_json::to_value(RolePayload::from_role(&role)).unwrap();
        let obj = body.as_object().unwrap();
        assert!(!obj.contains_key("name"));
        assert!(!obj.contains_key("transient_metadata"));
        assert!(!obj.contains_key("_unrecognized_applications"));
        assert!(!obj.contains_key("_transform_error"));
    }

    #[test]
    fn test_role_deserializes_read_only_fields() {
        let role: Role = serde_json::from_value(json!({
            "name": "auditor",
            "elasticsearch": {"cluster": [], "indices": [], "run_as": []},
            "kibana": [],
            "transient_metadata": {"enabled": false},
            "_unrecognized_applications": ["old"],
            "_transform_error": ["kibana"]
        }))
        .unwrap();

        assert_eq!(role.name, "auditor");
        assert_eq!(role.unrecognized_applications, Some(vec!["old".to_string()]));
        assert_eq!(role.transform_error, Some(vec!["kibana".to_string()]));
    }

    #[test]
    fn test_bulk_response_deserializes() {
        let response: BulkUpdateRolesResponse = serde_json::from_value(json!({
            "updated": ["viewer"],
            "errors": {
                "editor": {"status": 409, "message": "role already exists"}
            }
        }))
        .unwrap();

        assert_eq!(response.updated, vec!["viewer"]);
        assert_eq!(response.errors["editor"].status, 409);
    }
}
