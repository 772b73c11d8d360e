//! Rule configuration: additive or multiplicative discipline per connective and side.
//!
//! The configuration is a TOML table keyed by connective symbol, each entry choosing a
//! discipline for the antecedent (`ant`) and consequent (`con`) rule:
//!
//! ```toml
//! ["~"]
//! ant = "mul"
//! con = "mul"
//!
//! ["&"]
//! ant = "add"
//! con = "mul"
//!
//! ["v"]
//! ant = "mul"
//! con = "mul"
//!
//! ["->"]
//! ant = "mul"
//! con = "add"
//! ```
//!
//! Every one of `~`, `&`, `v`, `->` must be present with both sides. A [`RuleConfig`] is
//! loaded once and handed to the [`Decomposer`](crate::decomposer::Decomposer) by value; it
//! is never mutated afterwards.
pub mod engine;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use seqformal::prop::Connective;
use seqformal::sequent::Side;
use strum::{EnumIs, IntoEnumIterator};

use crate::magic::ENV_RULES_CONFIG_PATH;
use crate::utils::error::{SeqError, SeqResult};

/// Proof discipline of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum Discipline {
    Additive,
    Multiplicative,
}

impl Discipline {
    /// Configuration spelling: `add` or `mul`.
    pub fn key(self) -> &'static str {
        match self {
            Discipline::Additive => "add",
            Discipline::Multiplicative => "mul",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "add" => Some(Discipline::Additive),
            "mul" => Some(Discipline::Multiplicative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Disciplines of the antecedent and consequent rule of one connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideDisciplines {
    pub ant: Discipline,
    pub con: Discipline,
}

impl SideDisciplines {
    pub fn both(discipline: Discipline) -> Self {
        Self {
            ant: discipline,
            con: discipline,
        }
    }

    #[inline]
    pub fn get(&self, side: Side) -> Discipline {
        match side {
            Side::Antecedent => self.ant,
            Side::Consequent => self.con,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut Discipline {
        match side {
            Side::Antecedent => &mut self.ant,
            Side::Consequent => &mut self.con,
        }
    }
}

/// Connectives whose rules are configurable. Quantifier rules have a single variant.
pub const CONFIGURABLE_CONNECTIVES: [Connective; 4] = [
    Connective::Negation,
    Connective::Conjunction,
    Connective::Disjunction,
    Connective::Conditional,
];

/// Per-connective, per-side rule disciplines for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleConfig {
    negation: SideDisciplines,
    conjunction: SideDisciplines,
    disjunction: SideDisciplines,
    conditional: SideDisciplines,
}

impl RuleConfig {
    /// Configuration using `discipline` for every connective and side.
    pub fn uniform(discipline: Discipline) -> Self {
        let both = SideDisciplines::both(discipline);
        Self {
            negation: both,
            conjunction: both,
            disjunction: both,
            conditional: both,
        }
    }

    /// Copy of this configuration with one entry replaced.
    pub fn with(
        mut self,
        connective: Connective,
        side: Side,
        discipline: Discipline,
    ) -> SeqResult<Self> {
        *self.entry_mut(connective)?.get_mut(side) = discipline;
        Ok(self)
    }

    /// Discipline configured for `connective` on `side`.
    ///
    /// Fails with [`SeqError::UnknownConnective`] for quantifiers, which have no
    /// configurable variant.
    pub fn discipline(&self, connective: Connective, side: Side) -> SeqResult<Discipline> {
        let entry = match connective {
            Connective::Negation => &self.negation,
            Connective::Conjunction => &self.conjunction,
            Connective::Disjunction => &self.disjunction,
            Connective::Conditional => &self.conditional,
            Connective::Universal | Connective::Existential => {
                return Err(SeqError::UnknownConnective {
                    connective: connective.symbol().to_string(),
                    side: Some(side.key().to_string()),
                });
            }
        };
        Ok(entry.get(side))
    }

    fn entry_mut(&mut self, connective: Connective) -> SeqResult<&mut SideDisciplines> {
        match connective {
            Connective::Negation => Ok(&mut self.negation),
            Connective::Conjunction => Ok(&mut self.conjunction),
            Connective::Disjunction => Ok(&mut self.disjunction),
            Connective::Conditional => Ok(&mut self.conditional),
            Connective::Universal | Connective::Existential => Err(SeqError::UnknownConnective {
                connective: connective.symbol().to_string(),
                side: None,
            }),
        }
    }

    /// Build a configuration from the raw `{connective: {side: discipline}}` table.
    ///
    /// Every configurable connective must be present with both sides; unknown keys and
    /// values other than `add`/`mul` are rejected.
    pub fn from_table(table: &BTreeMap<String, BTreeMap<String, String>>) -> SeqResult<Self> {
        if let Some(unknown) = table
            .keys()
            .find(|k| !CONFIGURABLE_CONNECTIVES.iter().any(|c| c.symbol() == k.as_str()))
        {
            return Err(SeqError::UnknownConnective {
                connective: unknown.clone(),
                side: None,
            });
        }

        let mut config = Self::uniform(Discipline::Multiplicative);
        for connective in CONFIGURABLE_CONNECTIVES {
            let symbol = connective.symbol();
            let sides = table.get(symbol).ok_or_else(|| SeqError::UnknownConnective {
                connective: symbol.to_string(),
                side: None,
            })?;

            if let Some(unknown) = sides
                .keys()
                .find(|k| !Side::iter().any(|s| s.key() == k.as_str()))
            {
                return Err(SeqError::UnknownConnective {
                    connective: symbol.to_string(),
                    side: Some(unknown.clone()),
                });
            }

            let entry = config.entry_mut(connective)?;
            for side in Side::iter() {
                let value = sides.get(side.key()).ok_or_else(|| SeqError::UnknownConnective {
                    connective: symbol.to_string(),
                    side: Some(side.key().to_string()),
                })?;
                *entry.get_mut(side) =
                    Discipline::from_key(value).ok_or_else(|| SeqError::InvalidDiscipline {
                        connective: symbol.to_string(),
                        side: side.key().to_string(),
                        value: value.clone(),
                    })?;
            }
        }

        Ok(config)
    }

    /// Raw `{connective: {side: discipline}}` table of this configuration.
    pub fn to_table(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        CONFIGURABLE_CONNECTIVES
            .iter()
            .map(|&connective| {
                let sides = Side::iter()
                    .map(|side| {
                        let discipline = self
                            .discipline(connective, side)
                            .unwrap_or(Discipline::Multiplicative);
                        (side.key().to_string(), discipline.key().to_string())
                    })
                    .collect();
                (connective.symbol().to_string(), sides)
            })
            .collect()
    }

    /// Parse a configuration from TOML text. `file` names the source in error messages.
    pub fn from_toml_str(text: &str, file: &str) -> SeqResult<Self> {
        let table: BTreeMap<String, BTreeMap<String, String>> =
            toml::from_str(text).map_err(|e| SeqError::ConfigParseError {
                source: e,
                file: file.to_string(),
            })?;
        let config = Self::from_table(&table)?;
        debug!("Loaded rule configuration from {}: {:?}", file, config);
        Ok(config)
    }

    /// Get the default path to the rule configuration file.
    pub fn default_path() -> PathBuf {
        // Check if the environment variable is set
        if let Ok(config_path) = std::env::var(ENV_RULES_CONFIG_PATH) {
            return config_path.into();
        }

        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            } else {
                // Fallback to current directory if HOME is not set
            }
        }

        path.push("seqtree");
        path.push("rules.toml");
        path
    }

    /// Load a configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> SeqResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str, &path.display().to_string())
    }

    /// Save this configuration to a TOML file, creating parent directories as needed.
    pub fn save_to_toml(&self, path: &Path) -> SeqResult<()> {
        let toml_str = toml::to_string(&self.to_table()).map_err(|e| {
            SeqError::Unknown(format!(
                "Failed during serialization of TOML to path `{}`: {}",
                path.display(),
                e
            ))
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }
}
