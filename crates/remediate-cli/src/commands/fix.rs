//! `remediate fix` - run one remediation against one resource.

use anyhow::{Context, Result};
use remediate_core::{Parameters, RemediationRequest, Resource};

use super::{build_remediator, load_config};
use crate::GlobalArgs;

pub async fn run(
    global: &GlobalArgs,
    remediation_id: &str,
    resource_id: Option<&str>,
    resource_json: Option<&str>,
    params: Vec<(String, String)>,
) -> Result<()> {
    let request = build_request(remediation_id, resource_id, resource_json, params)?;
    let config = load_config(global)?;
    let remediator = build_remediator(&config).await?;

    remediator.remediate(&request).await.with_context(|| {
        format!(
            "Remediation {} failed for resource {}",
            request.remediation_id,
            request.resource.id()
        )
    })?;

    println!(
        "{}",
        serde_json::json!({
            "remediationId": request.remediation_id,
            "resourceId": request.resource.id(),
            "status": "succeeded"
        })
    );
    Ok(())
}

/// Assemble the request from command-line pieces.
pub fn build_request(
    remediation_id: &str,
    resource_id: Option<&str>,
    resource_json: Option<&str>,
    params: Vec<(String, String)>,
) -> Result<RemediationRequest> {
    let resource = match (resource_id, resource_json) {
        (_, Some(json)) => {
            let value: serde_json::Value =
                serde_json::from_str(json).context("--resource is not valid JSON")?;
            Resource::from_value(value)?
        }
        (Some(id), None) => Resource::new(id)?,
        (None, None) => anyhow::bail!("Either --resource-id or --resource is required"),
    };

    Ok(RemediationRequest::new(
        remediation_id,
        resource,
        params.into_iter().collect::<Parameters>(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_resource_id() {
        let request = build_request(
            "AWS.RDS.EnableAutoMinorVersionUpgrade",
            Some("db-1"),
            None,
            vec![("ApplyImmediately".to_string(), "true".to_string())],
        )
        .unwrap();

        assert_eq!(request.resource.id(), "db-1");
        assert_eq!(request.parameters.get("ApplyImmediately"), Some("true"));
    }

    #[test]
    fn request_from_resource_json() {
        let request = build_request(
            "AWS.RDS.EnableAutoMinorVersionUpgrade",
            None,
            Some(r#"{"Id": "db-2", "Region": "us-west-2"}"#),
            vec![],
        )
        .unwrap();

        assert_eq!(request.resource.id(), "db-2");
        assert!(request.parameters.is_empty());
    }

    #[test]
    fn resource_json_without_id_is_rejected() {
        let err = build_request("x", None, Some(r#"{"Region": "us-west-2"}"#), vec![]).unwrap_err();
        assert!(err.to_string().contains("Id"));
    }
}
