use thiserror::Error;

/// Closed error taxonomy for the generation pipeline. Every failure that
/// reaches the boundary is classified into exactly one of these kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForgeError {
    #[error("configuration error: {0}")] Configuration(String),
    #[error("upstream unavailable: {0}")] Upstream(String),
    #[error("parse failure: {0}")] Parse(String),
    #[error("assembly failure: {0}")] Assembly(String),
    #[error("invalid request: {0}")] InvalidRequest(String),
    #[error("internal error: {0}")] Internal(String),
}

impl ForgeError {
    pub fn kind(&self) -> &'static str {
        match self {
            ForgeError::Configuration(_) => "configuration",
            ForgeError::Upstream(_) => "upstream_unavailable",
            ForgeError::Parse(_) => "parse_failure",
            ForgeError::Assembly(_) => "assembly_failure",
            ForgeError::InvalidRequest(_) => "invalid_request",
            ForgeError::Internal(_) => "internal",
        }
    }

    /// Status band for any HTTP-style boundary embedding this pipeline.
    pub fn status(&self) -> u16 {
        match self {
            ForgeError::Configuration(_) => 500,
            ForgeError::Upstream(_) => 503,
            ForgeError::Parse(_) => 500,
            ForgeError::Assembly(_) => 500,
            ForgeError::InvalidRequest(_) => 400,
            ForgeError::Internal(_) => 500,
        }
    }

    /// Message safe to show an end user: no credentials, no internal detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            ForgeError::Configuration(_) => "The AI service API key is not configured properly.",
            ForgeError::Upstream(_) => {
                "The AI service is temporarily unavailable. Please try again later."
            }
            ForgeError::Parse(_) => {
                "The AI response could not be turned into a usable artifact. Please try again."
            }
            ForgeError::Assembly(_) => "Failed to package the generated files. Please try again.",
            ForgeError::InvalidRequest(_) => "A non-empty prompt is required.",
            ForgeError::Internal(_) => "Something went wrong on our side. Please try again.",
        }
    }
}

/// Map any error reaching the boundary into exactly one taxonomy kind.
/// Typed `ForgeError`s (and extraction errors) anywhere in the chain win;
/// otherwise message heuristics apply; `Internal` is the catch-all. Total:
/// there is no unclassifiable outcome.
pub fn classify(err: &anyhow::Error) -> ForgeError {
    for cause in err.chain() {
        if let Some(forge) = cause.downcast_ref::<ForgeError>() {
            return forge.clone();
        }
        if cause.downcast_ref::<crate::extract::ExtractError>().is_some() {
            return ForgeError::Parse(cause.to_string());
        }
    }

    let text = err
        .chain()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("; ")
        .to_lowercase();

    if text.contains("api key") || text.contains("api_key") {
        return ForgeError::Configuration(text);
    }
    if text.contains("quota")
        || text.contains("rate limit")
        || text.contains("overloaded")
        || text.contains("unavailable")
        || text.contains("timed out")
    {
        return ForgeError::Upstream(text);
    }

    ForgeError::Internal(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractError;
    use anyhow::anyhow;

    #[test]
    fn typed_errors_win_over_heuristics() {
        let err = anyhow::Error::from(ForgeError::Parse("no files".into()))
            .context("generating extension");
        assert_eq!(classify(&err).kind(), "parse_failure");
    }

    #[test]
    fn extract_errors_map_to_parse_failure() {
        let err = anyhow::Error::from(ExtractError::NoJsonFound);
        assert_eq!(classify(&err).kind(), "parse_failure");
    }

    #[test]
    fn api_key_messages_map_to_configuration() {
        let err = anyhow!("GEMINI_API_KEY env var is not set").context("building provider");
        assert_eq!(classify(&err).kind(), "configuration");
        assert_eq!(classify(&err).status(), 500);
    }

    #[test]
    fn quota_messages_map_to_upstream() {
        let err = anyhow!("quota exceeded for model");
        let classified = classify(&err);
        assert_eq!(classified.kind(), "upstream_unavailable");
        assert_eq!(classified.status(), 503);
    }

    #[test]
    fn unknown_errors_fall_back_to_internal() {
        let err = anyhow!("something very strange happened");
        assert_eq!(classify(&err).kind(), "internal");
    }

    #[test]
    fn status_bands_are_stable() {
        assert_eq!(ForgeError::InvalidRequest(String::new()).status(), 400);
        assert_eq!(ForgeError::Upstream(String::new()).status(), 503);
        assert_eq!(ForgeError::Configuration(String::new()).status(), 500);
        assert_eq!(ForgeError::Parse(String::new()).status(), 500);
        assert_eq!(ForgeError::Assembly(String::new()).status(), 500);
        assert_eq!(ForgeError::Internal(String::new()).status(), 500);
    }

    #[test]
    fn user_messages_do_not_leak_detail() {
        let err = ForgeError::Configuration("key AIzaSy-secret was rejected".into());
        assert!(!err.user_message().contains("AIzaSy"));
    }
}
