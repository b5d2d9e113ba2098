//! Grammar table: the operand layout each instruction keyword expects.
//!
//! The table is a JSON document mapping a keyword kind to an ordered list of
//! slots:
//!
//! ```json
//! {
//!     "PhaseShift": [
//!         { "Type": "Number", "Error": "expected angle operand after 'R'" },
//!         { "Type": "Comma", "Error": "expected ',' after angle operand" },
//!         { "Type": "Qubit", "Error": "expected qubit operand after ','" }
//!     ]
//! }
//! ```
//!
//! `MEASURE` takes no operands and has no entry. Loading validates the whole
//! table up front; a bad table is a [`GrammarError`], never a parse error.

use std::fmt;
use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use tracing::debug;

use crate::ast::Statement;
use crate::error::{GrammarError, GrammarResult};
use crate::token::TokenKind;

const BUILTIN_GRAMMAR: &str = include_str!("grammar.json");

/// One expected token after a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrammarSlot {
    /// Token kind that must appear in this position.
    #[serde(rename = "Type")]
    pub expected: TokenKind,
    /// Message reported when it does not.
    #[serde(rename = "Error")]
    pub message: String,
}

impl GrammarSlot {
    /// Whether this slot is a separator that produces no operand.
    pub fn is_separator(&self) -> bool {
        self.expected == TokenKind::Comma
    }
}

/// Ordered slots for one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarRule {
    slots: Vec<GrammarSlot>,
}

impl GrammarRule {
    pub fn slots(&self) -> &[GrammarSlot] {
        &self.slots
    }

    /// Kinds of the operand (non-separator) slots, in order.
    pub fn operand_kinds(&self) -> Vec<TokenKind> {
        self.slots
            .iter()
            .filter(|slot| !slot.is_separator())
            .map(|slot| slot.expected)
            .collect()
    }
}

/// Raw table entries in document order, duplicates included.
struct RuleEntries(Vec<(String, Vec<GrammarSlot>)>);

impl<'de> Deserialize<'de> for RuleEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RuleEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from instruction kind to slot list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RuleEntries, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, Vec<GrammarSlot>>()? {
                    entries.push(entry);
                }
                Ok(RuleEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Validated grammar table keyed by instruction kind.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: FxHashMap<TokenKind, GrammarRule>,
}

impl Grammar {
    /// The grammar shipped with the crate.
    pub fn builtin() -> GrammarResult<Self> {
        Self::from_json(BUILTIN_GRAMMAR)
    }

    /// Load and validate a grammar file.
    pub fn from_path(path: impl AsRef<Path>) -> GrammarResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| GrammarError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Parse and validate a grammar document.
    pub fn from_json(source: &str) -> GrammarResult<Self> {
        let RuleEntries(entries) = serde_json::from_str(source)?;

        let mut rules = FxHashMap::default();
        for (name, slots) in entries {
            let instruction: TokenKind = serde_json::from_value(serde_json::Value::String(name))?;
            let rule = GrammarRule { slots };
            validate_rule(instruction, &rule)?;
            if rules.insert(instruction, rule).is_some() {
                return Err(GrammarError::DuplicateRule(instruction));
            }
        }

        for instruction in TokenKind::INSTRUCTIONS {
            if instruction != TokenKind::Measure && !rules.contains_key(&instruction) {
                return Err(GrammarError::MissingRule(instruction));
            }
        }

        debug!(rules = rules.len(), "Loaded grammar table");
        Ok(Self { rules })
    }

    /// The rule for an instruction keyword, if it takes operands.
    pub fn rule(&self, instruction: TokenKind) -> Option<&GrammarRule> {
        self.rules.get(&instruction)
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn validate_rule(instruction: TokenKind, rule: &GrammarRule) -> GrammarResult<()> {
    if !instruction.is_instruction() || instruction == TokenKind::Measure {
        return Err(GrammarError::NotAnInstruction(instruction));
    }

    for (slot, entry) in rule.slots.iter().enumerate() {
        if !entry.expected.is_operand() {
            return Err(GrammarError::InvalidSlot {
                instruction,
                slot,
                expected: entry.expected,
            });
        }
    }

    let expected = Statement::signature(instruction).unwrap_or_default();
    let found = rule.operand_kinds();
    if found != expected {
        return Err(GrammarError::SignatureMismatch {
            instruction,
            expected: expected.to_vec(),
            found,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_grammar_loads() {
        let grammar = Grammar::builtin().unwrap();
        assert_eq!(grammar.len(), 6);
        assert!(grammar.rule(TokenKind::Measure).is_none());

        let rule = grammar.rule(TokenKind::PhaseShift).unwrap();
        assert_eq!(rule.slots().len(), 3);
        assert!(rule.slots()[1].is_separator());
        assert_eq!(
            rule.operand_kinds(),
            vec![TokenKind::Number, TokenKind::Qubit]
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = Grammar::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GrammarError::Malformed(_)));
    }

    #[test]
    fn test_unknown_kind_name() {
        let err = Grammar::from_json(r#"{ "CNOT": [] }"#).unwrap_err();
        assert!(matches!(err, GrammarError::Malformed(_)));
    }

    #[test]
    fn test_measure_rule_rejected() {
        let err = Grammar::from_json(r#"{ "Measure": [] }"#).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::NotAnInstruction(TokenKind::Measure)
        ));
    }

    #[test]
    fn test_missing_rule() {
        let source = r#"{ "PauliX": [ { "Type": "Qubit", "Error": "qubit" } ] }"#;
        let err = Grammar::from_json(source).unwrap_err();
        assert!(matches!(err, GrammarError::MissingRule(_)));
    }

    #[test]
    fn test_signature_mismatch() {
        let source = BUILTIN_GRAMMAR.replace(
            r#"{ "Type": "Qubit", "Error": "expected qubit operand after 'H'" }"#,
            r#"{ "Type": "Number", "Error": "expected number" }"#,
        );
        let err = Grammar::from_json(&source).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::SignatureMismatch {
                instruction: TokenKind::Hadamard,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_slot_kind() {
        let source = BUILTIN_GRAMMAR.replace(
            r#"{ "Type": "Comma", "Error": "expected ',' after angle operand" }"#,
            r#"{ "Type": "EOF", "Error": "expected end" }"#,
        );
        let err = Grammar::from_json(&source).unwrap_err();
        assert!(matches!(err, GrammarError::InvalidSlot { slot: 1, .. }));
    }

    #[test]
    fn test_duplicate_rule() {
        let source = BUILTIN_GRAMMAR.replacen(
            "{",
            r#"{ "Hadamard": [ { "Type": "Qubit", "Error": "first" } ],"#,
            1,
        );
        let err = Grammar::from_json(&source).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::DuplicateRule(TokenKind::Hadamard)
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Grammar::from_path("/nonexistent/grammar.json").unwrap_err();
        assert!(matches!(err, GrammarError::Io { .. }));
    }
}
