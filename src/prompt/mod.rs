/// Instruction templates sent to the generative model. The wording matters:
/// the extension template pins the `filename:` labelling the primary parser
/// expects, the workflow template pins raw-JSON-only output for the extractor.

pub fn extension_instruction(prompt: &str) -> String {
    format!(
        r#"You are a coding assistant. Generate a complete Chrome Extension based on the following user prompt:

"{prompt}"

Provide output as raw code blocks labeled with file names. Use this format:

manifest.json:
<code>

popup.html:
<code>

background.js:
<code>

content.js:
<code>

Only include required files. Use Manifest V3 format. Do not wrap code in markdown or explanations."#
    )
}

pub fn workflow_instruction(prompt: &str) -> String {
    format!(
        r#"You are a technical assistant. Generate a valid n8n workflow JSON based on the user's request below.

User Request:
"{prompt}"

Instructions:

Output ONLY raw JSON, no explanations.
JSON must be valid and importable into n8n.
Use realistic node names (e.g., Gmail Trigger, Slack).
Ensure it includes: name, nodes, parameters, credentials (dummy names), positions, and connections."#
    )
}
