//! Model id resolution.
//!
//! A model id is resolved in three steps:
//!
//! 1. A cross-region inference profile prefix (`us.`, `eu.`, `apac.`,
//!    `us-gov.`, `global.`) is stripped.
//! 2. The longest registered family tag that the id starts with, followed by
//!    a `-`, wins.
//! 3. Sibling redirects apply when the id carries a modality or version
//!    marker the tag boundary did not catch (`amazon.titan` + `embed`,
//!    `anthropic.claude` + `-3`, ...).

use bedrock_fm_core::error::{FmError, Result};
use bedrock_fm_core::transcoder::{EmbeddingTranscoder, ImageTranscoder, TextTranscoder};
use bedrock_fm_provider::{EmbeddingFamily, ImageFamily, TextFamily};
use once_cell::sync::Lazy;

/// Inference profile prefixes that wrap a regular model id.
pub const PROFILE_PREFIXES: &[&str] = &["us.", "eu.", "apac.", "us-gov.", "global."];

/// `(resolved tag, marker, redirect tag)`
const REDIRECTS: &[(&str, &str, &str)] = &[
    ("amazon.titan", "embed", "amazon.titan-embed"),
    ("amazon.titan", "image", "amazon.titan-image"),
    ("anthropic.claude", "-3", "anthropic.claude-3"),
    ("cohere.command", "-r", "cohere.command-r"),
    ("mistral.mistral", "-large", "mistral.mistral-large"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
    Embedding,
}

impl Modality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Embedding => "embedding",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved family, tagged by modality.
#[derive(Debug, Clone, Copy)]
pub enum Family {
    Text(TextFamily),
    Image(ImageFamily),
    Embedding(EmbeddingFamily),
}

impl Family {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text(f) => f.family(),
            Self::Image(f) => f.family(),
            Self::Embedding(f) => f.family(),
        }
    }

    pub const fn modality(&self) -> Modality {
        match self {
            Self::Text(_) => Modality::Text,
            Self::Image(_) => Modality::Image,
            Self::Embedding(_) => Modality::Embedding,
        }
    }
}

/// Every family, longest tag first. Built once, read-only afterwards.
static FAMILY_TABLE: Lazy<Vec<Family>> = Lazy::new(|| {
    let mut table: Vec<Family> = TextFamily::ALL
        .into_iter()
        .map(Family::Text)
        .chain(ImageFamily::ALL.into_iter().map(Family::Image))
        .chain(EmbeddingFamily::ALL.into_iter().map(Family::Embedding))
        .collect();
    table.sort_by_key(|f| std::cmp::Reverse(f.tag().len()));
    tracing::debug!(target: "bedrock_fm::registry", families = table.len(), "family table built");
    table
});

/// All registered families.
pub fn families() -> &'static [Family] {
    &FAMILY_TABLE
}

/// Exact tag lookup.
pub fn family_by_tag(tag: &str) -> Option<Family> {
    FAMILY_TABLE.iter().find(|f| f.tag() == tag).copied()
}

/// Strip a cross-region inference profile prefix, if any.
pub fn base_model_id(model_id: &str) -> &str {
    PROFILE_PREFIXES
        .iter()
        .find_map(|prefix| model_id.strip_prefix(prefix))
        .unwrap_or(model_id)
}

fn matches_tag(model_id: &str, tag: &str) -> bool {
    model_id
        .strip_prefix(tag)
        .is_some_and(|rest| rest.starts_with('-'))
}

/// Map a model id to its family. Never touches the network.
pub fn resolve(model_id: &str) -> Result<Family> {
    let unsupported = || {
        tracing::debug!(target: "bedrock_fm::registry", model_id, "model id not resolved");
        FmError::UnsupportedModel(model_id.to_string())
    };

    let base = base_model_id(model_id);
    let Some(dash) = base.find('-') else {
        return Err(unsupported());
    };
    if base[..dash].contains(':') {
        return Err(unsupported());
    }

    let mut family = FAMILY_TABLE
        .iter()
        .find(|f| matches_tag(base, f.tag()))
        .copied()
        .ok_or_else(unsupported)?;

    if let Some((_, marker, target)) = REDIRECTS
        .iter()
        .find(|(tag, marker, _)| *tag == family.tag() && base.contains(marker))
        && let Some(redirected) = family_by_tag(target)
    {
        tracing::trace!(target: "bedrock_fm::registry", model_id, marker, to = target, "family redirect");
        family = redirected;
    }

    tracing::debug!(
        target: "bedrock_fm::registry",
        model_id,
        family = family.tag(),
        modality = family.modality().as_str(),
        "model id resolved"
    );
    Ok(family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use proptest::prelude::*;

    fn tag(model_id: &str) -> &'static str {
        resolve(model_id).unwrap().tag()
    }

    #[test]
    fn resolves_base_families() {
        assert_eq!(tag("amazon.titan-text-express-v1"), "amazon.titan");
        assert_eq!(tag("anthropic.claude-v2:1"), "anthropic.claude");
        assert_eq!(tag("anthropic.claude-instant-v1"), "anthropic.claude");
        assert_eq!(tag("ai21.j2-ultra-v1"), "ai21.j2");
        assert_eq!(tag("ai21.jamba-instruct-v1:0"), "ai21.jamba");
        assert_eq!(tag("cohere.command-text-v14"), "cohere.command");
        assert_eq!(tag("cohere.command-light-text-v14"), "cohere.command");
        assert_eq!(tag("meta.llama2-13b-chat-v1"), "meta.llama2");
        assert_eq!(tag("meta.llama3-70b-instruct-v1:0"), "meta.llama3");
        assert_eq!(tag("mistral.mistral-7b-instruct-v0:2"), "mistral.mistral");
        assert_eq!(tag("mistral.mixtral-8x7b-instruct-v0:1"), "mistral.mixtral");
        assert_eq!(tag("stability.stable-diffusion-xl-v1"), "stability.stable");
        assert_eq!(tag("cohere.embed-english-v3"), "cohere.embed");
    }

    #[test]
    fn sibling_families_win_over_their_base() {
        assert_eq!(tag("amazon.titan-embed-g1-text-02"), "amazon.titan-embed");
        assert_eq!(tag("amazon.titan-embed-text-v2:0"), "amazon.titan-embed");
        assert_eq!(tag("amazon.titan-image-generator-v1"), "amazon.titan-image");
        assert_eq!(tag("anthropic.claude-3-haiku-20240307-v1:0"), "anthropic.claude-3");
        assert_eq!(tag("anthropic.claude-3-5-sonnet-20240620-v1:0"), "anthropic.claude-3");
        assert_eq!(tag("cohere.command-r-plus-v1:0"), "cohere.command-r");
        assert_eq!(tag("mistral.mistral-large-2402-v1:0"), "mistral.mistral-large");
    }

    #[test]
    fn markers_outside_the_tag_boundary_redirect() {
        assert_eq!(tag("amazon.titan-g1-embed-v1"), "amazon.titan-embed");
        assert_eq!(tag("anthropic.claude-v2-3"), "anthropic.claude-3");
    }

    #[test]
    fn inference_profiles_resolve_to_the_underlying_family() {
        assert_eq!(
            tag("us.anthropic.claude-3-5-sonnet-20240620-v1:0"),
            "anthropic.claude-3"
        );
        assert_eq!(tag("eu.meta.llama3-8b-instruct-v1:0"), "meta.llama3");
        assert_eq!(tag("us-gov.amazon.titan-text-express-v1"), "amazon.titan");
        assert_eq!(base_model_id("apac.ai21.j2-mid-v1"), "ai21.j2-mid-v1");
        assert_eq!(base_model_id("ai21.j2-mid-v1"), "ai21.j2-mid-v1");
    }

    #[test]
    fn colons_are_only_allowed_after_the_first_dash() {
        assert_eq!(
            tag("anthropic.claude-3-sonnet-20240229-v1:0:200k"),
            "anthropic.claude-3"
        );
        match resolve("anthropic.claude:3-sonnet").unwrap_err() {
            FmError::UnsupportedModel(id) => assert_eq!(id, "anthropic.claude:3-sonnet"),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_and_separator_free_ids() {
        for id in ["amazontitan", "amazon.titan", "openai.gpt-4", "", "-", "us."] {
            assert!(
                matches!(resolve(id), Err(FmError::UnsupportedModel(_))),
                "{id} resolved"
            );
        }
    }

    #[test]
    fn every_catalogued_model_resolves() {
        for id in catalog::known_models() {
            assert!(resolve(id).is_ok(), "{id} did not resolve");
        }
    }

    #[test]
    fn table_is_longest_tag_first_and_complete() {
        let lengths: Vec<usize> = families().iter().map(|f| f.tag().len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(families().len(), 16);
        assert_eq!(
            family_by_tag("amazon.titan-embed").map(|f| f.modality()),
            Some(Modality::Embedding)
        );
        assert!(family_by_tag("amazon").is_none());
    }

    proptest! {
        #[test]
        fn ids_without_a_dash_never_resolve(id in "[a-z0-9.:]{0,30}") {
            prop_assert!(resolve(&id).is_err());
        }

        #[test]
        fn resolution_never_leaves_the_matched_family_line(
            family in proptest::sample::select(families().iter().map(|f| f.tag()).collect::<Vec<_>>()),
            suffix in "[a-z0-9]{1,8}(-v[0-9]:[0-9])?",
        ) {
            let id = format!("{family}-{suffix}");
            let resolved = resolve(&id).unwrap();
            prop_assert!(resolved.tag().starts_with(family));
            let profiled = format!("us.{id}");
            prop_assert_eq!(resolve(&profiled).unwrap().tag(), resolved.tag());
        }
    }
}
