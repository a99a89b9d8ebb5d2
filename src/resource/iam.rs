//! IAM policies

use super::{str_field, string_list};
use serde::Serialize;
use serde_json::Value;

/// One role granted to a list of principals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub role: String,
    pub members: Vec<String>,
}

impl Binding {
    pub fn has_member(&self, principal: &str) -> bool {
        self.members.iter().any(|m| m == principal)
    }
}

impl From<&Value> for Binding {
    fn from(value: &Value) -> Self {
        Self {
            role: str_field(value, "role"),
            members: string_list(value, "members"),
        }
    }
}

/// Canonical IAM policy (project or bucket)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IamPolicy {
    pub bindings: Vec<Binding>,
}

impl From<&Value> for IamPolicy {
    fn from(value: &Value) -> Self {
        Self {
            bindings: value
                .get("bindings")
                .and_then(|v| v.as_array())
                .map(|arr| arr.iter().map(Binding::from).collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_from_api_response() {
        let policy = IamPolicy::from(&json!({
            "version": 1,
            "etag": "BwX=",
            "bindings": [
                {"role": "roles/owner", "members": ["user:a@example.com"]},
                {"role": "roles/viewer", "members": ["user:b@example.com", "group:g@example.com"]}
            ]
        }));
        assert_eq!(policy.bindings.len(), 2);
        assert_eq!(policy.bindings[0].role, "roles/owner");
        assert!(policy.bindings[1].has_member("group:g@example.com"));
    }

    #[test]
    fn test_binding_without_role_or_members() {
        let binding = Binding::from(&json!({"members": ["allUsers"]}));
        assert_eq!(binding.role, "");
        assert!(binding.has_member("allUsers"));

        let binding = Binding::from(&json!({"role": "roles/viewer"}));
        assert!(binding.members.is_empty());
    }

    #[test]
    fn test_empty_policy() {
        let policy = IamPolicy::from(&json!({"etag": "ACAB"}));
        assert_eq!(serde_json::to_value(&policy).unwrap(), json!({"bindings": []}));
    }
}
