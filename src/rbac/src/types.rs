// Copyright 2025 Red Hat, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Constructors for the resource and subject references RBAC reports to the
//! inventory.

use kessel_inventory::v1beta2::{
    ReporterReference, RepresentationType, ResourceReference, SubjectReference,
};

const REPORTER: &str = "rbac";

/// The representation type of RBAC workspaces.
pub fn workspace_type() -> RepresentationType {
    RepresentationType {
        resource_type: "workspace".into(),
        reporter_type: Some(REPORTER.into()),
    }
}

/// The representation type of RBAC roles.
pub fn role_type() -> RepresentationType {
    RepresentationType {
        resource_type: "role".into(),
        reporter_type: Some(REPORTER.into()),
    }
}

fn rbac_resource(resource_type: &str, resource_id: String) -> ResourceReference {
    ResourceReference {
        resource_type: resource_type.into(),
        resource_id,
        reporter: Some(ReporterReference {
            r#type: REPORTER.into(),
            instance_id: None,
        }),
    }
}

/// A reference to the principal `id` in the identity `domain`.
pub fn principal_resource(id: &str, domain: &str) -> ResourceReference {
    rbac_resource("principal", format!("{domain}/{id}"))
}

/// A reference to the role `resource_id`.
pub fn role_resource(resource_id: impl Into<String>) -> ResourceReference {
    rbac_resource("role", resource_id.into())
}

/// A reference to the workspace `resource_id`.
pub fn workspace_resource(resource_id: impl Into<String>) -> ResourceReference {
    rbac_resource("workspace", resource_id.into())
}

/// The principal `id` in `domain`, as the subject of a relationship query.
pub fn principal_subject(id: &str, domain: &str) -> SubjectReference {
    SubjectReference {
        resource: Some(principal_resource(id, domain)),
        relation: None,
    }
}

/// An arbitrary resource as a subject, optionally through a relation
/// (a subject set). An empty `relation` means the resource itself.
pub fn subject(resource: ResourceReference, relation: &str) -> SubjectReference {
    SubjectReference {
        resource: Some(resource),
        relation: (!relation.is_empty()).then(|| relation.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_ids_are_domain_qualified() {
        let resource = principal_resource("alice", "redhat");
        assert_eq!(resource.resource_type, "principal");
        assert_eq!(resource.resource_id, "redhat/alice");
        assert_eq!(resource.reporter.unwrap().r#type, "rbac");
    }

    #[test]
    fn subject_with_relation() {
        let subject = subject(workspace_resource("w1"), "member");
        assert_eq!(subject.relation.as_deref(), Some("member"));
    }

    #[test]
    fn subject_without_relation() {
        let subject = subject(workspace_resource("w1"), "");
        assert_eq!(subject.relation, None);
    }

    #[test]
    fn well_known_types_are_reported_by_rbac() {
        assert_eq!(workspace_type().resource_type, "workspace");
        assert_eq!(workspace_type().reporter_type.as_deref(), Some("rbac"));
        assert_eq!(role_type().resource_type, "role");
    }
}
