//! Conversation turn macros, exported at the crate root.

/// Creates a Human turn, optionally carrying images.
///
/// ```rust,ignore
/// let turn = human!("Describe this", images: [image]);
/// ```
#[macro_export]
macro_rules! human {
    ($content:expr) => {
        $crate::types::Turn::human($content)
    };
    ($content:expr, images: [$($image:expr),* $(,)?]) => {
        $crate::types::Turn::human($content).with_images([$($image),*])
    };
}

/// Creates a System turn. Only valid as the first turn of a conversation.
#[macro_export]
macro_rules! system {
    ($content:expr) => {
        $crate::types::Turn::system($content)
    };
}

/// Creates an Assistant turn
#[macro_export]
macro_rules! assistant {
    ($content:expr) => {
        $crate::types::Turn::assistant($content)
    };
}
