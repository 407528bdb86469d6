use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Configuration types shared across all remediate crates
pub mod config;
pub mod error;
pub mod parameters;

pub use config::{AuditConfig, AwsConfig, ConfigError, RemediateConfig};
pub use error::InputError;
pub use parameters::{Parameters, parse_bool};

/// Key under which a resource descriptor carries its identifier.
pub const RESOURCE_ID_KEY: &str = "Id";

/// Identifying metadata for a cloud resource, as supplied by the
/// compliance/discovery system.
///
/// Serializes as a flat JSON object. `Id` is mandatory; every other key is
/// kept verbatim in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Resource {
    id: String,
    attributes: Map<String, Value>,
}

impl Resource {
    /// Create a descriptor carrying only an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, InputError> {
        let id = id.into();
        if id.is_empty() {
            return Err(InputError::MissingResourceId);
        }
        Ok(Self {
            id,
            attributes: Map::new(),
        })
    }

    /// Parse a descriptor from an arbitrary JSON value.
    pub fn from_value(value: Value) -> Result<Self, InputError> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(InputError::InvalidResource(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Attach an extra attribute. `Id` cannot be overwritten this way.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if key != RESOURCE_ID_KEY {
            self.attributes.insert(key, value);
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl TryFrom<Map<String, Value>> for Resource {
    type Error = InputError;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match map.remove(RESOURCE_ID_KEY) {
            None | Some(Value::Null) => return Err(InputError::MissingResourceId),
            Some(Value::String(s)) if s.is_empty() => return Err(InputError::MissingResourceId),
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(InputError::InvalidResource(format!(
                    "'{}' must be a string, got {}",
                    RESOURCE_ID_KEY,
                    json_kind(&other)
                )));
            }
        };
        Ok(Self {
            id,
            attributes: map,
        })
    }
}

impl From<Resource> for Map<String, Value> {
    fn from(resource: Resource) -> Self {
        let mut map = resource.attributes;
        map.insert(RESOURCE_ID_KEY.to_string(), Value::String(resource.id));
        map
    }
}

/// A request to run one named remediation against one resource.
///
/// Matches how analysis policies reference remediations
/// (`autoRemediationId` + `autoRemediationParameters`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationRequest {
    pub remediation_id: String,
    pub resource: Resource,
    #[serde(default)]
    pub parameters: Parameters,
}

impl RemediationRequest {
    pub fn new(remediation_id: impl Into<String>, resource: Resource, parameters: Parameters) -> Self {
        Self {
            remediation_id: remediation_id.into(),
            resource,
            parameters,
        }
    }

    /// Parse a request from JSON text.
    pub fn from_json(content: &str) -> Result<Self, InputError> {
        serde_json::from_str(content).map_err(InputError::InvalidRequest)
    }
}

/// Envelope accepted by the runner, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Invocation {
    /// Return every available remediation with its default parameters.
    ListRemediations,
    /// Run one remediation.
    Remediate { payload: RemediationRequest },
}

impl Invocation {
    pub fn from_json(content: &str) -> Result<Self, InputError> {
        serde_json::from_str(content).map_err(InputError::InvalidRequest)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn resource_keeps_extra_attributes() {
        let resource: Resource = serde_json::from_value(json!({
            "Id": "db-1",
            "Region": "us-west-2",
            "Engine": "postgres"
        }))
        .unwrap();

        assert_eq!(resource.id(), "db-1");
        assert_eq!(resource.attribute("Region"), Some(&json!("us-west-2")));

        let back = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            back,
            json!({"Id": "db-1", "Region": "us-west-2", "Engine": "postgres"})
        );
    }

    #[test]
    fn resource_requires_id() {
        let err = Resource::from_value(json!({"Region": "us-east-1"})).unwrap_err();
        assert!(matches!(err, InputError::MissingResourceId));

        let err = Resource::from_value(json!({"Id": ""})).unwrap_err();
        assert!(matches!(err, InputError::MissingResourceId));

        let err = Resource::from_value(json!({"Id": 42})).unwrap_err();
        assert!(matches!(err, InputError::InvalidResource(_)));

        let err = Resource::from_value(json!(["db-1"])).unwrap_err();
        assert!(matches!(err, InputError::InvalidResource(_)));
    }

    #[test]
    fn with_attribute_does_not_touch_id() {
        let resource = Resource::new("db-1")
            .unwrap()
            .with_attribute("Id", json!("other"))
            .with_attribute("AccountId", json!("123456789012"));
        assert_eq!(resource.id(), "db-1");
        assert_eq!(resource.attributes().len(), 1);
    }

    #[test]
    fn request_uses_camel_case() {
        let request = RemediationRequest::from_json(
            r#"{
                "remediationId": "AWS.RDS.EnableAutoMinorVersionUpgrade",
                "resource": {"Id": "TestDBInstanceIdentifier"},
                "parameters": {"ApplyImmediately": "true"}
            }"#,
        )
        .unwrap();

        assert_eq!(request.remediation_id, "AWS.RDS.EnableAutoMinorVersionUpgrade");
        assert_eq!(request.resource.id(), "TestDBInstanceIdentifier");
        assert_eq!(request.parameters.get("ApplyImmediately"), Some("true"));
    }

    #[test]
    fn request_parameters_default_to_empty() {
        let request = RemediationRequest::from_json(
            r#"{"remediationId": "x", "resource": {"Id": "db-1"}}"#,
        )
        .unwrap();
        assert!(request.parameters.is_empty());
    }

    #[test]
    fn request_without_resource_id_is_rejected() {
        let err = RemediationRequest::from_json(
            r#"{"remediationId": "x", "resource": {"Name": "db-1"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, InputError::InvalidRequest(_)));
    }

    #[test]
    fn invocation_envelope() {
        let list = Invocation::from_json(r#"{"action": "listRemediations"}"#).unwrap();
        assert_eq!(list, Invocation::ListRemediations);

        let run = Invocation::from_json(
            r#"{
                "action": "remediate",
                "payload": {
                    "remediationId": "AWS.RDS.EnableAutoMinorVersionUpgrade",
                    "resource": {"Id": "db-1"},
                    "parameters": {"ApplyImmediately": "false"}
                }
            }"#,
        )
        .unwrap();
        match run {
            Invocation::Remediate { payload } => {
                assert_eq!(payload.resource.id(), "db-1");
                assert!(!payload.parameters.bool("ApplyImmediately").unwrap());
            }
            other => panic!("unexpected invocation: {:?}", other),
        }

        assert!(Invocation::from_json(r#"{"action": "scan"}"#).is_err());
    }
}
