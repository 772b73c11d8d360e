/// Environment variable overriding the location of the rule configuration file.
pub const ENV_RULES_CONFIG_PATH: &str = "SEQTREE_RULES";

/// Witness substituted for a bound variable when the witness pool is exhausted.
pub const PLACEHOLDER_WITNESS: &str = "NONE";

/// Magic bytes prefixed to binary proof tree storage.
pub const TREE_STORAGE_MAGIC: [u8; 8] = *b"SEQTREE\0";
