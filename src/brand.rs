//! Deployment branding
//!
//! Two variants ship from the same code. They differ in presentation, in the
//! wording of the system instructions and in where the API key comes from.

use crate::topic::Topic;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Brand {
    /// PRL Site Solutions deployment, key supplied by the host's secret store
    #[default]
    Prl,
    /// Unbranded deployment, key read from a local `.env` file
    Generic,
}

/// Where the API key is expected to come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// Process environment only
    Environment,
    /// `.env` in the working directory, then the process environment
    DotEnv,
}

/// Presentation values handed to the page
#[derive(Debug, Clone, Serialize)]
pub struct BrandInfo {
    pub page_title: &'static str,
    /// Highlighted part of the heading, drawn in the primary colour
    pub heading_accent: &'static str,
    pub heading: &'static str,
    pub tagline: &'static str,
    pub greeting: &'static str,
    pub logo: &'static str,
    pub primary_color: &'static str,
}

impl Brand {
    pub fn secret_source(self) -> SecretSource {
        match self {
            Brand::Prl => SecretSource::Environment,
            Brand::Generic => SecretSource::DotEnv,
        }
    }

    pub fn info(self) -> BrandInfo {
        match self {
            Brand::Prl => BrandInfo {
                page_title: "PRL Site Solutions OfficeWhiz",
                heading_accent: "PRL Site Solutions",
                heading: "OfficeWhiz",
                tagline: "Your AI-powered Recruitment Specialist buddy",
                greeting: "👋 Hi there! How can I help with Office today?",
                logo: "assets/prl-logo.svg",
                primary_color: "#e4002b",
            },
            Brand::Generic => BrandInfo {
                page_title: "OfficeWhiz AI Helper",
                heading_accent: "🧠",
                heading: "OfficeWhiz",
                tagline: "Your AI-powered Office assistant",
                greeting: "👋 Hi there! How can I help with Office today?",
                logo: "assets/officewhiz-logo.svg",
                primary_color: "#00f0ff",
            },
        }
    }

    /// System instruction for a chat turn on `topic`
    pub fn topic_prompt(self, topic: Topic) -> String {
        match self {
            Brand::Prl => format!(
                "You are PRL Site Solutions’ OfficeWhiz for {topic}. \
                 Explain step-by-step and include a bonus tip."
            ),
            Brand::Generic => format!(
                "You are OfficeWhiz, a friendly assistant for Microsoft {topic} users. \
                 Explain step-by-step and include a bonus tip."
            ),
        }
    }

    /// System instruction for single-shot search queries
    pub fn search_prompt(self) -> &'static str {
        match self {
            Brand::Prl => "You are PRL Site Solutions’ AI Office assistant.",
            Brand::Generic => "You are a helpful assistant.",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown brand '{0}' (expected 'prl' or 'generic')")]
pub struct UnknownBrand(String);

impl FromStr for Brand {
    type Err = UnknownBrand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prl" => Ok(Brand::Prl),
            "generic" | "officewhiz" => Ok(Brand::Generic),
            _ => Err(UnknownBrand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_prompt_names_topic() {
        assert_eq!(
            Brand::Prl.topic_prompt(Topic::Excel),
            "You are PRL Site Solutions’ OfficeWhiz for Excel. Explain step-by-step and include a bonus tip."
        );
        assert_eq!(
            Brand::Generic.topic_prompt(Topic::Word),
            "You are OfficeWhiz, a friendly assistant for Microsoft Word users. Explain step-by-step and include a bonus tip."
        );
    }

    #[test]
    fn test_secret_sources_differ() {
        assert_eq!(Brand::Prl.secret_source(), SecretSource::Environment);
        assert_eq!(Brand::Generic.secret_source(), SecretSource::DotEnv);
    }

    #[test]
    fn test_parse_brand() {
        assert_eq!("PRL".parse::<Brand>(), Ok(Brand::Prl));
        assert_eq!("generic".parse::<Brand>(), Ok(Brand::Generic));
        assert!("acme".parse::<Brand>().is_err());
    }
}
