use anyhow::Result;
use serde_json::Value;

use crate::archive;
use crate::errors::ForgeError;
use crate::extract;
use crate::parse::{self, FileSet};
use crate::prompt;
use crate::provider::Provider;

/// Result of the extension path: the parsed files, the packaged archive, and
/// the instruction/raw text pair (kept for transaction artifact logging).
#[derive(Debug)]
pub struct ExtensionOutput {
    pub instruction: String,
    pub raw: String,
    pub files: FileSet,
    pub archive: Vec<u8>,
}

/// Result of the workflow path. The document is returned as parsed, so
/// formatting quirks of the original model text are not observable.
#[derive(Debug)]
pub struct WorkflowOutput {
    pub instruction: String,
    pub raw: String,
    pub document: Value,
}

/// Reject empty or whitespace-only prompts before any upstream call.
pub fn validate_prompt(prompt: &str) -> Result<&str> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ForgeError::InvalidRequest("prompt must be a non-empty string".into()).into());
    }
    Ok(trimmed)
}

/// Parse model text into a file set: primary parser first, fallback only when
/// the primary yields nothing. A parse failure is declared only after both
/// come back empty; any non-empty result is success.
pub fn parse_response(text: &str) -> Result<FileSet> {
    let files = parse::parse_primary(text);
    if !files.is_empty() {
        return Ok(files);
    }
    let files = parse::parse_fallback(text);
    if files.is_empty() {
        return Err(ForgeError::Parse(
            "model response contained no recognizable extension files".into(),
        )
        .into());
    }
    Ok(files)
}

/// Extension path: prompt -> model text -> parsed files -> zip archive.
pub async fn generate_extension(
    provider: &dyn Provider,
    prompt_text: &str,
    debug: bool,
) -> Result<ExtensionOutput> {
    let prompt_text = validate_prompt(prompt_text)?;
    let instruction = prompt::extension_instruction(prompt_text);
    let raw = provider.generate(&instruction, debug).await?;
    let files = parse_response(&raw)?;
    let archive = archive::assemble(&files)?;
    Ok(ExtensionOutput {
        instruction,
        raw,
        files,
        archive,
    })
}

/// Workflow path: prompt -> model text -> extracted JSON document.
pub async fn generate_workflow(
    provider: &dyn Provider,
    prompt_text: &str,
    debug: bool,
) -> Result<WorkflowOutput> {
    let prompt_text = validate_prompt(prompt_text)?;
    let instruction = prompt::workflow_instruction(prompt_text);
    let raw = provider.generate(&instruction, debug).await?;
    let document = extract::extract_json(&raw)?;
    Ok(WorkflowOutput {
        instruction,
        raw,
        document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::classify;

    #[test]
    fn empty_prompt_is_invalid_request() {
        for p in ["", "   ", "\n\t"] {
            let err = validate_prompt(p).unwrap_err();
            assert_eq!(classify(&err).kind(), "invalid_request");
        }
    }

    #[test]
    fn non_empty_prompt_is_trimmed() {
        assert_eq!(validate_prompt("  a tab counter  ").unwrap(), "a tab counter");
    }

    #[test]
    fn primary_result_short_circuits_fallback() {
        let text = "manifest.json:\n{\"v\":3}\n";
        let files = parse_response(text).unwrap();
        assert_eq!(files.names(), vec!["manifest.json"]);
    }

    #[test]
    fn fallback_rescues_unlabelled_responses() {
        // No `name.ext:` + newline headers, but the known names appear.
        let text = "manifest.json {\"v\":3}\nbackground.js console.log(1)";
        let files = parse_response(text).unwrap();
        assert!(!files.is_empty());
        assert!(files.get("manifest.json").is_some());
    }

    #[test]
    fn prose_only_text_is_a_parse_failure() {
        let err = parse_response("just some prose").unwrap_err();
        assert_eq!(classify(&err).kind(), "parse_failure");
    }

    #[test]
    fn partial_parse_counts_as_success() {
        // Two of the "expected" files is still a non-empty set, not an error.
        let text = "manifest.json:\n{}\npopup.html:\n<p></p>";
        let files = parse_response(text).unwrap();
        assert_eq!(files.len(), 2);
    }
}
