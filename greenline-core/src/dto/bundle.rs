//! Deployment bundle DTOs

use serde::{Deserialize, Serialize};

/// Placeholder in the task definition template replaced with the image URI
pub const IMAGE_PLACEHOLDER: &str = "<IMAGE_NAME>";

/// Placeholder in the appspec template replaced with the registered task
/// definition identifier, verbatim
pub const TASK_DEFINITION_PLACEHOLDER: &str = "<TASK_DEFINITION>";

/// Source bundle fetched for the triggering revision
///
/// Holds the deployment descriptor templates the Build stage renders: the
/// task definition (JSON, with an image placeholder) and the appspec manifest
/// (with a task definition placeholder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceBundle {
    pub task_definition: String,
    pub appspec: String,
}

/// Build output contract: one container name mapped to the image reference
/// that was just built
///
/// Serialized as a single-file JSON artifact consumed by the next stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDefinition {
    pub name: String,
    #[serde(rename = "imageUri")]
    pub image_uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_definition_wire_format() {
        let def = ImageDefinition {
            name: "containerRepo".to_string(),
            image_uri: "registry/app:rc-42".to_string(),
        };
        let json = serde_json::to_string(&def).unwrap();
        assert_eq!(
            json,
            r#"{"name":"containerRepo","imageUri":"registry/app:rc-42"}"#
        );
    }
}
