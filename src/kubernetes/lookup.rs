// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Get-by-name capability shared by every registered kind

use crate::error::Result;
use crate::types::{ResourceIdentity, ResourceKind};
use futures::future::{BoxFuture, FutureExt};
use kube::{
    api::DynamicObject,
    discovery::ApiResource,
    Api, Client,
};
use tracing::{debug, debug_span, Instrument};

/// Fetches objects of one kind by name.
///
/// `Ok(None)` means the object does not exist; every other failure is an error.
pub trait KindReader: Send + Sync {
    fn kind(&self) -> &ResourceKind;

    fn get_by_name<'a>(
        &'a self,
        client: &'a Client,
        namespace: Option<&'a str>,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceIdentity>>>;
}

/// Reader backed by `Api<DynamicObject>`, so any kind can be served from its
/// `ApiResource` alone.
pub struct DynamicReader {
    kind: ResourceKind,
    api_resource: ApiResource,
}

impl DynamicReader {
    pub fn new(kind: ResourceKind) -> Self {
        let api_resource = kind.api_resource();
        Self { kind, api_resource }
    }

    fn api(&self, client: &Client, namespace: Option<&str>) -> Api<DynamicObject> {
        match (self.kind.namespaced, namespace) {
            (true, Some(ns)) => Api::namespaced_with(client.clone(), ns, &self.api_resource),
            (true, None) => Api::default_namespaced_with(client.clone(), &self.api_resource),
            (false, _) => Api::all_with(client.clone(), &self.api_resource),
        }
    }
}

impl KindReader for DynamicReader {
    fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    fn get_by_name<'a>(
        &'a self,
        client: &'a Client,
        namespace: Option<&'a str>,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ResourceIdentity>>> {
        let span = debug_span!("get_by_name", kind = %self.kind.gvk, namespace, name);

        async move {
            let api = self.api(client, namespace);

            match api.get(name).await {
                Ok(obj) => Ok(Some(ResourceIdentity::from_dynamic(self.kind.gvk.clone(), &obj))),
                Err(kube::Error::Api(err)) if err.code == 404 => {
                    debug!("{} {} not found", self.kind.gvk, name);
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        }
        .instrument(span)
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{object_json, status_json, MockService};
    use crate::types::Gvk;
    use k8s_openapi::api::apps::v1::ReplicaSet;
    use k8s_openapi::api::rbac::v1::ClusterRole;

    #[tokio::test]
    async fn test_get_by_name_returns_identity() {
        let body = object_json(
            "apps/v1",
            "ReplicaSet",
            Some("test"),
            "web-rs",
            &[("apps/v1", "Deployment", "web")],
            &[],
        );
        let path = "/apis/apps/v1/namespaces/test/replicasets/web-rs";
        let mock = MockService::new().on_get(path, 200, &body);
        let client = mock.clone().into_client();
        let reader = DynamicReader::new(ResourceKind::namespaced::<ReplicaSet>());

        let identity = reader
            .get_by_name(&client, Some("test"), "web-rs")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(identity.gvk, Gvk::new("apps", "v1", "ReplicaSet"));
        assert_eq!(identity.namespace.as_deref(), Some("test"));
        assert_eq!(identity.owner_references[0].name, "web");
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_get_by_name_not_found_is_none() {
        let client = MockService::new().into_client();
        let reader = DynamicReader::new(ResourceKind::namespaced::<ReplicaSet>());

        let result = reader.get_by_name(&client, Some("test"), "gone").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_name_cluster_scoped_ignores_namespace() {
        let path = "/apis/rbac.authorization.k8s.io/v1/clusterroles/admin";
        let body =
            object_json("rbac.authorization.k8s.io/v1", "ClusterRole", None, "admin", &[], &[]);
        let mock = MockService::new().on_get(path, 200, &body);
        let client = mock.clone().into_client();
        let reader = DynamicReader::new(ResourceKind::cluster::<ClusterRole>());

        let identity = reader.get_by_name(&client, Some("test"), "admin").await.unwrap().unwrap();

        assert!(identity.namespace.is_none());
        assert_eq!(mock.requests(), vec![("GET".to_string(), path.to_string())]);
    }

    #[tokio::test]
    async fn test_get_by_name_forbidden_is_error() {
        let mock = MockService::new().on_get(
            "/apis/apps/v1/namespaces/test/replicasets/web-rs",
            403,
            &status_json(403, "Forbidden"),
        );
        let client = mock.into_client();
        let reader = DynamicReader::new(ResourceKind::namespaced::<ReplicaSet>());

        let err = reader.get_by_name(&client, Some("test"), "web-rs").await.unwrap_err();
        assert!(!err.is_not_found());
    }
}
