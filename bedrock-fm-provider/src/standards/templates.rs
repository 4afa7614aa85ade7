//! Prompt templates shared by more than one family.

use crate::error::{FmError, Result};
use crate::types::{Role, Turn};

/// Split off a leading System turn.
pub(crate) fn split_system(conversation: &[Turn]) -> (Option<&str>, &[Turn]) {
    match conversation.split_first() {
        Some((first, rest)) if first.is_system() => (Some(first.content.as_str()), rest),
        _ => (None, conversation),
    }
}

/// Families without multimodal input refuse turns carrying images.
pub(crate) fn reject_images(family: &str, conversation: &[Turn]) -> Result<()> {
    if conversation.iter().any(|t| !t.images.is_empty()) {
        return Err(FmError::unsupported_argument(family, ["images"]));
    }
    Ok(())
}

/// Flatten a conversation into a role-labelled transcript ending with an open
/// assistant cue:
///
/// ```text
/// S
/// User: H
/// Bot: A
/// User: H
/// Bot:
/// ```
pub(crate) fn transcript(conversation: &[Turn], human: &str, assistant: &str) -> String {
    let (system, turns) = split_system(conversation);
    let mut out = String::new();
    if let Some(system) = system {
        out.push_str(system);
        out.push('\n');
    }
    for turn in turns {
        let label = match turn.role {
            Role::Assistant => assistant,
            _ => human,
        };
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&turn.content);
        out.push('\n');
    }
    out.push_str(assistant);
    out.push(':');
    out
}

/// `[INST]` chat rendering, without the outer `[INST] … [/INST]` wrapper.
///
/// Three regions: an optional `<<SYS>>` block glued to the first Human turn,
/// then the first answer and every complete Human/Assistant pair as
/// `<s>[INST] … [/INST] … </s>` blocks, then the final open Human turn. A
/// conversation with a single Human turn yields just that turn.
pub(crate) fn inst_chat(conversation: &[Turn]) -> String {
    let (system, turns) = split_system(conversation);
    let mut out = String::new();
    if let Some(system) = system {
        out.push_str("<<SYS>>\n");
        out.push_str(system);
        out.push_str("\n<</SYS>>\n\n");
    }

    let Some((first, rest)) = turns.split_first() else {
        return out;
    };
    out.push_str(&first.content);

    let Some((answer, rest)) = rest.split_first() else {
        return out;
    };
    out.push_str(" [/INST] ");
    out.push_str(&answer.content);
    out.push_str(" </s>");

    if let Some((last, pairs)) = rest.split_last() {
        for pair in pairs.chunks_exact(2) {
            out.push_str("<s>[INST] ");
            out.push_str(&pair[0].content);
            out.push_str(" [/INST] ");
            out.push_str(&pair[1].content);
            out.push_str(" </s>");
        }
        out.push_str("<s>[INST] ");
        out.push_str(&last.content);
    }
    out
}

/// Wrap a prompt in a single instruction block.
pub(crate) fn inst_wrap(prompt: &str) -> String {
    format!("[INST] {prompt} [/INST]")
}
