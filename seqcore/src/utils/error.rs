use semver::{Version, VersionReq};
use seqformal::parser::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeqError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    MalformedInput(#[from] ParseError),

    #[error("Failed to parse rule configuration '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    /// No configuration entry exists for a connective/side pair, or the connective itself is
    /// not one the rule engine knows.
    #[error("Unknown connective `{connective}`{}", .side.as_ref().map(|s| format!(" on side `{s}`")).unwrap_or_default())]
    UnknownConnective {
        connective: String,
        side: Option<String>,
    },

    #[error(
        "Invalid discipline `{value}` for connective `{connective}` on side `{side}`, expected `add` or `mul`"
    )]
    InvalidDiscipline {
        connective: String,
        side: String,
        value: String,
    },

    #[error("Proof tree rooted at `{sequent}` has already been grown")]
    AlreadyGrown { sequent: String },

    #[error("`{name}` cannot be used as a witness: expected an identifier that is not a keyword")]
    InvalidWitness { name: String },

    #[error("No rule applies to `{subject}`: it contains no complex proposition")]
    EmptyDecomposition { subject: String },

    #[error(
        "Context of {size} propositions is too large to enumerate its partitions (maximum {max})"
    )]
    ContextTooLarge { size: usize, max: usize },

    #[error("Failed to encode proof tree: {0}")]
    EncodeError(String),

    #[error("Failed to decode proof tree: {0}")]
    DecodeError(String),

    #[error("Incompatible proof tree storage. Required: {req}, found: {version}")]
    IncompatibleStorage { req: VersionReq, version: Version },

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

pub type SeqResult<T> = Result<T, SeqError>;
