use crate::domain::model::{OutputFormat, ProbeOutcome};
use crate::utils::error::Result;
use mongodb::bson::Bson;

pub const EMPTY_MESSAGE: &str = "No documents found in the collection.";
pub const CONNECTIVITY_HINT: &str = "Please check your internet connection and the MongoDB URI.";

/// Console text for a probe outcome.
pub fn render_outcome(outcome: &ProbeOutcome, format: OutputFormat) -> Result<String> {
    let text = match outcome {
        ProbeOutcome::Found { document } => format!(
            "First document in the collection:\n{}",
            render_value(Bson::Document(document.clone()), format)?
        ),
        ProbeOutcome::FieldFound { field, value } => format!(
            "Field '{}' of the first document:\n{}",
            field,
            render_value(value.clone(), format)?
        ),
        ProbeOutcome::Empty => EMPTY_MESSAGE.to_string(),
        ProbeOutcome::FieldMissing { field } => {
            format!("No document with field '{}' found in the collection.", field)
        }
        ProbeOutcome::Unreachable { detail } => format!(
            "Unable to connect to the MongoDB server. Error: {}\n{}",
            detail, CONNECTIVITY_HINT
        ),
    };
    Ok(text)
}

/// Relaxed Extended JSON, so ObjectIds and dates stay readable.
pub fn render_value(value: Bson, format: OutputFormat) -> Result<String> {
    let json = value.into_relaxed_extjson();
    let text = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(&json)?,
        OutputFormat::Compact => serde_json::to_string(&json)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn test_render_found_pretty() {
        let outcome = ProbeOutcome::Found {
            document: doc! { "name": "channel", "subscribers": 12 },
        };
        let text = render_outcome(&outcome, OutputFormat::Pretty).unwrap();
        assert_eq!(
            text,
            "First document in the collection:\n{\n  \"name\": \"channel\",\n  \"subscribers\": 12\n}"
        );
    }

    #[test]
    fn test_render_field_compact() {
        let outcome = ProbeOutcome::FieldFound {
            field: "229202".to_string(),
            value: Bson::Document(doc! { "views": 7, "likes": 2 }),
        };
        let text = render_outcome(&outcome, OutputFormat::Compact).unwrap();
        assert_eq!(
            text,
            "Field '229202' of the first document:\n{\"views\":7,\"likes\":2}"
        );
    }

    #[test]
    fn test_render_object_id_as_extended_json() {
        let oid = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let text = render_value(Bson::ObjectId(oid), OutputFormat::Compact).unwrap();
        assert_eq!(text, "{\"$oid\":\"65a1f0c2e4b0a1b2c3d4e5f6\"}");
    }

    #[test]
    fn test_render_fixed_messages() {
        assert_eq!(
            render_outcome(&ProbeOutcome::Empty, OutputFormat::Pretty).unwrap(),
            "No documents found in the collection."
        );
        assert_eq!(
            render_outcome(
                &ProbeOutcome::FieldMissing {
                    field: "229202".to_string()
                },
                OutputFormat::Pretty
            )
            .unwrap(),
            "No document with field '229202' found in the collection."
        );
    }

    #[test]
    fn test_render_unreachable() {
        let outcome = ProbeOutcome::Unreachable {
            detail: "Server selection timeout: No available servers".to_string(),
        };
        let text = render_outcome(&outcome, OutputFormat::Pretty).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Unable to connect to the MongoDB server. Error: Server selection timeout: No available servers"
        );
        assert_eq!(lines[1], CONNECTIVITY_HINT);
    }
}
