use serde::Deserialize;

use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Static column-mapping config, checked once at load time.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub name: String,
    pub sales: TableConfig,
    pub returns: TableConfig,
}

/// One uploaded table: its file and the header literals that locate the
/// canonical fields in it.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub file: String,
    pub columns: ColumnMapping,
}

/// Canonical field → source header literal.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    pub date: String,
    pub client: String,
    pub product: String,
    pub qty: String,
    pub amount: String,
}

impl ColumnMapping {
    /// Header literals of the source system's sales export.
    pub fn sales_defaults() -> Self {
        Self {
            date: "Период".into(),
            client: "Контрагент".into(),
            product: "Номенклатура".into(),
            qty: "Количество".into(),
            amount: "Сумма".into(),
        }
    }

    /// Header literals of the source system's returns export.
    /// The misspelled quantity header is what the upstream export emits.
    pub fn returns_defaults() -> Self {
        Self {
            date: "Период".into(),
            client: "Контрагент".into(),
            product: "Номенклатура".into(),
            qty: "Возрат количество".into(),
            amount: "Возврат сумма".into(),
        }
    }

    fn field_literals(&self) -> [(&'static str, &str); 5] {
        [
            ("date", &self.date),
            ("client", &self.client),
            ("product", &self.product),
            ("qty", &self.qty),
            ("amount", &self.amount),
        ]
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawConfig {
    name: String,
    sales: RawTableConfig,
    returns: RawTableConfig,
}

#[derive(Debug, Deserialize)]
struct RawTableConfig {
    file: String,
    #[serde(default)]
    columns: Option<ColumnMapping>,
}

impl PipelineConfig {
    pub fn from_toml(input: &str) -> Result<Self, PipelineError> {
        let raw: RawConfig =
            toml::from_str(input).map_err(|e| PipelineError::ConfigParse(e.to_string()))?;

        let config = Self {
            name: raw.name,
            sales: TableConfig {
                file: raw.sales.file,
                columns: raw.sales.columns.unwrap_or_else(ColumnMapping::sales_defaults),
            },
            returns: TableConfig {
                file: raw.returns.file,
                columns: raw
                    .returns
                    .columns
                    .unwrap_or_else(ColumnMapping::returns_defaults),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.name.trim().is_empty() {
            return Err(PipelineError::ConfigValidation("name must not be empty".into()));
        }

        for (side, table) in [("sales", &self.sales), ("returns", &self.returns)] {
            if table.file.trim().is_empty() {
                return Err(PipelineError::ConfigValidation(format!(
                    "{side}: file must not be empty"
                )));
            }
            for (field, literal) in table.columns.field_literals() {
                if literal.trim().is_empty() {
                    return Err(PipelineError::ConfigValidation(format!(
                        "{side}: column literal for '{field}' must not be empty"
                    )));
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name = "December close"

[sales]
file = "sales.xlsx"

[returns]
file = "returns.xlsx"
"#;

    #[test]
    fn parse_minimal_uses_locale_defaults() {
        let config = PipelineConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.name, "December close");
        assert_eq!(config.sales.columns.date, "Период");
        assert_eq!(config.sales.columns.amount, "Сумма");
        assert_eq!(config.returns.columns.qty, "Возрат количество");
        assert_eq!(config.returns.columns.amount, "Возврат сумма");
    }

    #[test]
    fn parse_with_column_override() {
        let input = r#"
name = "CSV export"

[sales]
file = "sales.csv"

[sales.columns]
date    = "period"
client  = "counterparty"
product = "sku"
qty     = "qty"
amount  = "amount"

[returns]
file = "returns.csv"
"#;
        let config = PipelineConfig::from_toml(input).unwrap();
        assert_eq!(config.sales.columns.date, "period");
        assert_eq!(config.sales.columns.client, "counterparty");
        // Returns side untouched by the sales override
        assert_eq!(config.returns.columns.client, "Контрагент");
    }

    #[test]
    fn reject_missing_side() {
        let input = r#"
name = "Half"

[sales]
file = "sales.csv"
"#;
        let err = PipelineConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigParse(_)));
    }

    #[test]
    fn reject_empty_name() {
        let input = r#"
name = "  "

[sales]
file = "sales.csv"

[returns]
file = "returns.csv"
"#;
        let err = PipelineConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn reject_empty_column_literal() {
        let input = r#"
name = "Bad mapping"

[sales]
file = "sales.csv"

[sales.columns]
date    = "period"
client  = ""
product = "sku"
qty     = "qty"
amount  = "amount"

[returns]
file = "returns.csv"
"#;
        let err = PipelineConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("'client'"));
    }

    #[test]
    fn reject_empty_file() {
        let input = r#"
name = "No file"

[sales]
file = ""

[returns]
file = "returns.csv"
"#;
        let err = PipelineConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("sales"));
    }
}
