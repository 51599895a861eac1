//! Seam for an external explanation service.
//!
//! The simulator never calls into this module; the front end asks an
//! [`ExplanationService`] to explain a hint topic and prints the fragments
//! as they arrive.

/// Text shown when no service is configured
pub const NOT_CONFIGURED: &str = "Explanation service is not configured. Please set your API_KEY.";

/// A finished explanation or a finite stream of fragments
pub enum Explanation {
    Text(String),
    Stream(Box<dyn Iterator<Item = String>>),
}

impl Explanation {
    /// Concatenate every fragment, consuming the stream
    pub fn into_text(self) -> String {
        match self {
            Explanation::Text(text) => text,
            Explanation::Stream(fragments) => fragments.collect(),
        }
    }
}

impl std::fmt::Debug for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Explanation::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Explanation::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

pub trait ExplanationService {
    fn explain(&self, topic: &str) -> Explanation;
}

/// Service used when nothing else is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackExplainer;

impl ExplanationService for FallbackExplainer {
    fn explain(&self, topic: &str) -> Explanation {
        log::debug!("No explanation service configured for {topic:?}");
        Explanation::Text(NOT_CONFIGURED.to_string())
    }
}

/// Collapse a concrete command into the topic a learner is asking about
pub fn normalize_topic(topic: &str) -> String {
    if topic.starts_with("git commit -m") {
        return "git commit -m".to_string();
    }
    if topic.starts_with("git add") {
        return "git add".to_string();
    }
    for verb in ["touch", "echo"] {
        if topic.starts_with(verb) {
            return format!("the {verb} command");
        }
    }
    topic.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Vec<&'static str>);

    impl ExplanationService for Scripted {
        fn explain(&self, _topic: &str) -> Explanation {
            let fragments: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
            Explanation::Stream(Box::new(fragments.into_iter()))
        }
    }

    #[test]
    fn test_fallback_message() {
        let text = FallbackExplainer.explain("git rebase").into_text();
        assert_eq!(text, NOT_CONFIGURED);
    }

    #[test]
    fn test_stream_concatenates() {
        let service = Scripted(vec!["Alright ", "class, ", "settle in!"]);
        assert_eq!(service.explain("git log").into_text(), "Alright class, settle in!");
    }

    #[test]
    fn test_normalize_topic() {
        assert_eq!(normalize_topic("git commit -m \"Initial commit\""), "git commit -m");
        assert_eq!(normalize_topic("git add README.md"), "git add");
        assert_eq!(normalize_topic("touch temp.log"), "the touch command");
        assert_eq!(normalize_topic("echo \"Hello Git\" > README.md"), "the echo command");
        assert_eq!(normalize_topic("git rebase main"), "git rebase main");
    }
}
