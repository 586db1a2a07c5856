use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub id: u64,
    pub node_id: String,
    pub url: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "default")]
    pub is_default: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"[{
            "id": 208045946,
            "node_id": "MDU6TGFiZWwyMDgwNDU5NDY=",
            "url": "https://api.github.com/repos/octocat/Hello-World/labels/bug",
            "name": "bug",
            "description": "Something isn't working",
            "color": "f29513",
            "default": true
        }]"#;

        let labels: Vec<Label> = serde_json::from_str(json).unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "bug");
        assert!(labels[0].is_default);
        assert_eq!(
            labels[0].description.as_deref(),
            Some("Something isn't working")
        );
    }

    #[test]
    fn test_default_flag_round_trips_under_api_name() {
        let label = Label {
            id: 1,
            node_id: "n".to_string(),
            url: "https://example.com/labels/x".to_string(),
            name: "x".to_string(),
            color: "ffffff".to_string(),
            is_default: false,
            description: None,
        };
        let value = serde_json::to_value(&label).unwrap();
        assert_eq!(value["default"], false);
        assert!(value.get("is_default").is_none());
    }
}
