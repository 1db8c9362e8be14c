use std::path::Path;

use tracing::warn;

/// System instruction sent with every classification request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a data governance expert. Respond only with valid JSON.";

/// Built-in governance concern categories, used when no criteria file is
/// supplied.
pub const DEFAULT_CRITERIA: &str = "\
- Data privacy and security
- Data quality or integrity
- Data access control and permissions
- Data compliance and regulatory requirements
- Data architecture and integration
- Master data management
- Data retention and disposal
- Data classification and sensitivity";

/// Render the classification prompt for one ticket. The description is
/// interpolated verbatim, quote characters included.
pub fn render_prompt(criteria: &str, description: &str) -> String {
    format!(
        r#"You are a data governance expert. Analyze the following Jira ticket description and determine if it has data governance implications that the data governance council should review.

Consider issues related to:
{criteria}

Ticket Description: "{description}"

Respond in JSON format with exactly these fields:
{{
    "governanceFlag": true/false,
    "reasoning": "Brief explanation if flag is true, empty string if false",
    "category": "The most relevant category from the list above, or N/A if flag is false"
}}"#
    )
}

/// Load operator-supplied criteria text, substituting the built-in list
/// when the file is missing, unreadable, or empty.
pub fn load_criteria(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            warn!(
                path = %path.display(),
                "Criteria file is empty, using built-in criteria"
            );
            DEFAULT_CRITERIA.to_string()
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Could not read criteria file, using built-in criteria"
            );
            DEFAULT_CRITERIA.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn prompt_embeds_criteria_and_description() {
        let prompt = render_prompt(DEFAULT_CRITERIA, "Implement PII encryption at rest");
        assert!(prompt.contains("- Master data management"));
        assert!(prompt.contains("Ticket Description: \"Implement PII encryption at rest\""));
        assert!(prompt.contains("\"governanceFlag\": true/false"));
    }

    #[test]
    fn description_quotes_are_not_escaped() {
        let prompt = render_prompt(DEFAULT_CRITERIA, "Rename the \"extras\" table");
        assert!(prompt.contains("Ticket Description: \"Rename the \"extras\" table\""));
    }

    #[test]
    fn missing_criteria_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let criteria = load_criteria(&dir.path().join("does-not-exist.txt"));
        assert_eq!(criteria, DEFAULT_CRITERIA);
    }

    #[test]
    fn empty_criteria_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("criteria.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"  \n")
            .unwrap();
        assert_eq!(load_criteria(&path), DEFAULT_CRITERIA);
    }

    #[test]
    fn supplied_criteria_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("criteria.txt");
        std::fs::write(&path, "- Vendor data sharing\n- Consent tracking\n").unwrap();
        let criteria = load_criteria(&path);
        assert_eq!(criteria, "- Vendor data sharing\n- Consent tracking");
    }
}
