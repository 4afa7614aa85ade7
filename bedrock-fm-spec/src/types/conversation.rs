//! Conversation turns and the well-formedness rules shared by every family.

use super::image::Image;
use crate::error::{ConversationRule, FmError, Result};
use serde::{Deserialize, Serialize};

/// Speaker of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Assistant,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Human => "human",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a conversation.
///
/// Images are reference-counted; cloning a turn never copies pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub images: Vec<Image>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(Role::Human, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Attach an image to this turn.
    pub fn with_image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }

    pub fn with_images(mut self, images: impl IntoIterator<Item = Image>) -> Self {
        self.images.extend(images);
        self
    }

    pub const fn is_system(&self) -> bool {
        matches!(self.role, Role::System)
    }
}

/// Validate a conversation before it is handed to a transcoder.
///
/// Rules, first failure wins:
/// 1. at least one turn
/// 2. a System turn, if any, is unique and at index 0
/// 3. no two consecutive turns share a role
/// 4. the last turn is a Human turn
pub fn validate_conversation(turns: &[Turn]) -> Result<()> {
    check(turns).map_err(FmError::ConversationValidation)
}

fn check(turns: &[Turn]) -> std::result::Result<(), ConversationRule> {
    if turns.is_empty() {
        return Err(ConversationRule::Empty);
    }

    let mut systems = turns
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_system())
        .map(|(i, _)| i);
    if let Some(first) = systems.next() {
        if systems.next().is_some() {
            return Err(ConversationRule::MultipleSystem);
        }
        if first != 0 {
            return Err(ConversationRule::SystemNotFirst { index: first });
        }
    }

    if let Some(index) = (1..turns.len()).find(|&i| turns[i].role == turns[i - 1].role) {
        return Err(ConversationRule::ConsecutiveRole {
            index,
            role: turns[index].role,
        });
    }

    match turns.last() {
        Some(last) if last.role == Role::Human => Ok(()),
        _ => Err(ConversationRule::MustEndWithHuman),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rule(turns: &[Turn]) -> ConversationRule {
        match validate_conversation(turns) {
            Err(FmError::ConversationValidation(rule)) => rule,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_system_then_human() {
        validate_conversation(&[Turn::system("S"), Turn::human("H")]).expect("valid");
        validate_conversation(&[
            Turn::system("S"),
            Turn::human("H"),
            Turn::assistant("A"),
            Turn::human("H"),
        ])
        .expect("valid");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(rule(&[]), ConversationRule::Empty);
    }

    #[test]
    fn rejects_two_system_turns() {
        assert_eq!(
            rule(&[Turn::system("a"), Turn::system("b"), Turn::human("H")]),
            ConversationRule::MultipleSystem
        );
    }

    #[test]
    fn rejects_late_system_turn() {
        assert_eq!(
            rule(&[Turn::human("bye"), Turn::system("hello"), Turn::assistant("Ok")]),
            ConversationRule::SystemNotFirst { index: 1 }
        );
    }

    #[test]
    fn rejects_consecutive_humans() {
        assert_eq!(
            rule(&[Turn::human("Ok"), Turn::human("Hello")]),
            ConversationRule::ConsecutiveRole {
                index: 1,
                role: Role::Human
            }
        );
    }

    #[test]
    fn rejects_lone_assistant_or_system() {
        assert_eq!(
            rule(&[Turn::assistant("Ok")]),
            ConversationRule::MustEndWithHuman
        );
        assert_eq!(rule(&[Turn::system("Ok")]), ConversationRule::MustEndWithHuman);
    }

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::System), Just(Role::Human), Just(Role::Assistant)]
    }

    proptest! {
        #[test]
        fn adjacent_same_role_never_validates(
            prefix in proptest::collection::vec(role_strategy(), 0..6),
            repeated in role_strategy(),
        ) {
            let mut turns: Vec<Turn> = prefix.into_iter().map(|r| Turn::new(r, "x")).collect();
            turns.push(Turn::new(repeated, "x"));
            turns.push(Turn::new(repeated, "x"));
            prop_assert!(validate_conversation(&turns).is_err());
        }

        #[test]
        fn alternating_dialogue_ending_in_human_validates(pairs in 0usize..8, with_system: bool) {
            let mut turns = Vec::new();
            if with_system {
                turns.push(Turn::system("s"));
            }
            for _ in 0..pairs {
                turns.push(Turn::human("h"));
                turns.push(Turn::assistant("a"));
            }
            turns.push(Turn::human("h"));
            prop_assert!(validate_conversation(&turns).is_ok());
        }
    }
}
