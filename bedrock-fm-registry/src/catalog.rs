//! Well-known Bedrock model ids.
//!
//! Not exhaustive: any id the resolver accepts can be used directly. Every
//! constant here is expected to resolve.

/// Amazon Titan models
pub mod amazon {
    pub const TITAN_TEXT_LITE: &str = "amazon.titan-text-lite-v1";
    pub const TITAN_TEXT_EXPRESS: &str = "amazon.titan-text-express-v1";
    pub const TITAN_TEXT_PREMIER: &str = "amazon.titan-text-premier-v1:0";

    pub const TITAN_EMBED_TEXT_G1: &str = "amazon.titan-embed-g1-text-02";
    pub const TITAN_EMBED_TEXT_V1: &str = "amazon.titan-embed-text-v1";
    pub const TITAN_EMBED_TEXT_V2: &str = "amazon.titan-embed-text-v2:0";

    pub const TITAN_IMAGE_GENERATOR_V1: &str = "amazon.titan-image-generator-v1";
    pub const TITAN_IMAGE_GENERATOR_V2: &str = "amazon.titan-image-generator-v2:0";

    pub const ALL: &[&str] = &[
        TITAN_TEXT_LITE,
        TITAN_TEXT_EXPRESS,
        TITAN_TEXT_PREMIER,
        TITAN_EMBED_TEXT_G1,
        TITAN_EMBED_TEXT_V1,
        TITAN_EMBED_TEXT_V2,
        TITAN_IMAGE_GENERATOR_V1,
        TITAN_IMAGE_GENERATOR_V2,
    ];
}

/// Anthropic Claude models
pub mod anthropic {
    pub const CLAUDE_INSTANT_V1: &str = "anthropic.claude-instant-v1";
    pub const CLAUDE_V2: &str = "anthropic.claude-v2";
    pub const CLAUDE_V2_1: &str = "anthropic.claude-v2:1";

    pub const CLAUDE_3_HAIKU: &str = "anthropic.claude-3-haiku-20240307-v1:0";
    pub const CLAUDE_3_SONNET: &str = "anthropic.claude-3-sonnet-20240229-v1:0";
    pub const CLAUDE_3_OPUS: &str = "anthropic.claude-3-opus-20240229-v1:0";
    pub const CLAUDE_3_5_SONNET: &str = "anthropic.claude-3-5-sonnet-20240620-v1:0";

    pub const ALL: &[&str] = &[
        CLAUDE_INSTANT_V1,
        CLAUDE_V2,
        CLAUDE_V2_1,
        CLAUDE_3_HAIKU,
        CLAUDE_3_SONNET,
        CLAUDE_3_OPUS,
        CLAUDE_3_5_SONNET,
    ];
}

/// AI21 Labs models
pub mod ai21 {
    pub const J2_MID: &str = "ai21.j2-mid-v1";
    pub const J2_ULTRA: &str = "ai21.j2-ultra-v1";
    pub const JAMBA_INSTRUCT: &str = "ai21.jamba-instruct-v1:0";

    pub const ALL: &[&str] = &[J2_MID, J2_ULTRA, JAMBA_INSTRUCT];
}

/// Cohere models
pub mod cohere {
    pub const COMMAND_TEXT: &str = "cohere.command-text-v14";
    pub const COMMAND_LIGHT_TEXT: &str = "cohere.command-light-text-v14";
    pub const COMMAND_R: &str = "cohere.command-r-v1:0";
    pub const COMMAND_R_PLUS: &str = "cohere.command-r-plus-v1:0";

    pub const EMBED_ENGLISH_V3: &str = "cohere.embed-english-v3";
    pub const EMBED_MULTILINGUAL_V3: &str = "cohere.embed-multilingual-v3";

    pub const ALL: &[&str] = &[
        COMMAND_TEXT,
        COMMAND_LIGHT_TEXT,
        COMMAND_R,
        COMMAND_R_PLUS,
        EMBED_ENGLISH_V3,
        EMBED_MULTILINGUAL_V3,
    ];
}

/// Meta Llama models
pub mod meta {
    pub const LLAMA2_13B_CHAT: &str = "meta.llama2-13b-chat-v1";
    pub const LLAMA2_70B_CHAT: &str = "meta.llama2-70b-chat-v1";
    pub const LLAMA3_8B_INSTRUCT: &str = "meta.llama3-8b-instruct-v1:0";
    pub const LLAMA3_70B_INSTRUCT: &str = "meta.llama3-70b-instruct-v1:0";

    pub const ALL: &[&str] = &[
        LLAMA2_13B_CHAT,
        LLAMA2_70B_CHAT,
        LLAMA3_8B_INSTRUCT,
        LLAMA3_70B_INSTRUCT,
    ];
}

/// Mistral AI models
pub mod mistral {
    pub const MISTRAL_7B_INSTRUCT: &str = "mistral.mistral-7b-instruct-v0:2";
    pub const MIXTRAL_8X7B_INSTRUCT: &str = "mistral.mixtral-8x7b-instruct-v0:1";
    pub const MISTRAL_LARGE: &str = "mistral.mistral-large-2402-v1:0";

    pub const ALL: &[&str] = &[MISTRAL_7B_INSTRUCT, MIXTRAL_8X7B_INSTRUCT, MISTRAL_LARGE];
}

/// Stability AI models
pub mod stability {
    pub const SDXL_V1: &str = "stability.stable-diffusion-xl-v1";

    pub const ALL: &[&str] = &[SDXL_V1];
}

/// Every catalogued model id.
pub static KNOWN_MODELS: &[&[&str]] = &[
    amazon::ALL,
    anthropic::ALL,
    ai21::ALL,
    cohere::ALL,
    meta::ALL,
    mistral::ALL,
    stability::ALL,
];

/// Flattened view of [`KNOWN_MODELS`].
pub fn known_models() -> impl Iterator<Item = &'static str> {
    KNOWN_MODELS.iter().flat_map(|ids| ids.iter().copied())
}
