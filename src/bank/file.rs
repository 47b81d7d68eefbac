use super::{QuestionBank, StatementDef};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk layout of a custom bank:
///
/// ```toml
/// [[statement]]
/// id = "nature-1"
/// text = "I enjoy observing animals, plants, or natural environments."
/// primary = "Nature & Environment"
/// secondary = { "Scientific Curiosity" = 0.4 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankFile {
    #[serde(rename = "statement", default)]
    pub statements: Vec<StatementDef>,
}

impl QuestionBank {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed reading question bank {}", path.display()))?;
        Self::parse_toml(&content)
            .with_context(|| format!("invalid question bank {}", path.display()))
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let file = toml::from_str::<BankFile>(content).context("failed parsing bank TOML")?;
        let bank = Self::from_definitions(file.statements)?;
        tracing::debug!(
            statements = bank.len(),
            dimensions = bank.dimensions().len(),
            "loaded question bank"
        );
        Ok(bank)
    }

    /// Serialises the bank back into its authoring form.
    pub fn to_toml(&self) -> Result<String> {
        let file = BankFile {
            statements: self
                .all_statements()
                .map(|statement| StatementDef {
                    id: statement.id().to_string(),
                    text: statement.text().to_string(),
                    primary: statement.primary().to_string(),
                    secondary: statement
                        .secondary()
                        .iter()
                        .map(|(dim, weight)| (dim.to_string(), weight.as_f64()))
                        .collect(),
                })
                .collect(),
        };
        toml::to_string_pretty(&file).context("failed to serialize question bank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BankError;
    use pretty_assertions::assert_eq;

    const SMALL_BANK: &str = r#"
[[statement]]
id = "s1"
text = "I like maps."
primary = "A"
secondary = { "B" = 0.5 }

[[statement]]
id = "s2"
text = "I like graphs."
primary = "B"
"#;

    #[test]
    fn parses_statement_tables() {
        let bank = QuestionBank::parse_toml(SMALL_BANK).unwrap();
        assert_eq!(bank.len(), 2);
        let names: Vec<&str> = bank.dimensions().iter().map(|dim| dim.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(bank.statement("s2").unwrap().secondary().is_empty());
    }

    #[test]
    fn validation_errors_surface_as_bank_errors() {
        let bad = SMALL_BANK.replace("0.5", "1.5");
        let err = QuestionBank::parse_toml(&bad).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BankError>(),
            Some(BankError::WeightOutOfRange { .. })
        ));
    }

    #[test]
    fn load_reads_from_disk_and_round_trips_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.toml");
        fs::write(&path, QuestionBank::builtin().to_toml().unwrap()).unwrap();

        let loaded = QuestionBank::load(&path).unwrap();
        let builtin = QuestionBank::builtin();
        assert_eq!(loaded.len(), builtin.len());
        assert_eq!(loaded.dimensions(), builtin.dimensions());
        for (a, b) in loaded.all_statements().zip(builtin.all_statements()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = QuestionBank::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }
}
