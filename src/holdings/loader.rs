// CSV loader: turns a brokerage holdings export into a MutualFund.
//
// Two export layouts are recognized, told apart by the name column:
//
//   Zerodha: Company Name, % Portfolio Weight, Sector, Market Value,
//            Share Change %, 1-Year Return
//   Axis:    Holding Name, % Portfolio, Sector, Market Value (INR),
//            Share Change %, 1Yr Return (%)
//
// Ingestion is best-effort: a row with a blank name or an unusable weight is
// skipped and reported, never fatal. Only file-level problems (broken CSV,
// unknown layout) fail the load.

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::warn;

use super::models::{MutualFund, StockHolding, UNKNOWN_SECTOR};

/// Why a single row was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("row {row}: missing {field}")]
    MissingEssentialField { row: usize, field: &'static str },

    #[error("row {row}: weight '{raw}' is not a non-negative number")]
    MalformedWeight { row: usize, raw: String },
}

/// Why a whole file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unrecognized holdings layout (headers: {headers})")]
    UnrecognizedLayout { headers: String },

    #[error("{layout} layout is missing required column '{column}'")]
    MissingColumn {
        layout: &'static str,
        column: &'static str,
    },
}

/// Column names for one brokerage export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub label: &'static str,
    pub name: &'static str,
    pub weight: &'static str,
    pub sector: &'static str,
    pub market_value: &'static str,
    pub share_change: &'static str,
    pub one_year_return: &'static str,
}

pub const ZERODHA_LAYOUT: ColumnLayout = ColumnLayout {
    label: "Zerodha",
    name: "Company Name",
    weight: "% Portfolio Weight",
    sector: "Sector",
    market_value: "Market Value",
    share_change: "Share Change %",
    one_year_return: "1-Year Return",
};

pub const AXIS_LAYOUT: ColumnLayout = ColumnLayout {
    label: "Axis",
    name: "Holding Name",
    weight: "% Portfolio",
    sector: "Sector",
    market_value: "Market Value (INR)",
    share_change: "Share Change %",
    one_year_return: "1Yr Return (%)",
};

impl ColumnLayout {
    /// Pick the layout matching a header row.
    pub fn detect(headers: &StringRecord) -> Result<Self, LoadError> {
        let has = |col: &str| headers.iter().any(|h| h == col);

        let layout = if has(ZERODHA_LAYOUT.name) {
            ZERODHA_LAYOUT
        } else if has(AXIS_LAYOUT.name) {
            AXIS_LAYOUT
        } else {
            return Err(LoadError::UnrecognizedLayout {
                headers: headers.iter().collect::<Vec<_>>().join(", "),
            });
        };

        if !has(layout.weight) {
            return Err(LoadError::MissingColumn {
                layout: layout.label,
                column: layout.weight,
            });
        }
        Ok(layout)
    }
}

/// Result of loading one file: the fund plus every row that was dropped.
#[derive(Debug)]
pub struct FundLoad {
    pub fund: MutualFund,
    pub layout: ColumnLayout,
    pub skipped: Vec<RowError>,
}

/// Parse CSV text into a fund named `fund_name`.
pub fn parse_fund(csv_text: &str, fund_name: &str) -> Result<FundLoad, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::detect(&headers)?;
    let columns = ColumnIndex::resolve(&headers, &layout);

    let mut holdings = Vec::new();
    let mut skipped = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        match columns.holding(&record, i + 1) {
            Ok(holding) => holdings.push(holding),
            Err(e) => {
                warn!(fund = %fund_name, error = %e, "Skipping holdings row");
                skipped.push(e);
            }
        }
    }

    Ok(FundLoad {
        fund: MutualFund::new(fund_name, holdings),
        layout,
        skipped,
    })
}

/// Check only the header row. Used to reject uploads before storing them.
pub fn detect_layout(csv_text: &str) -> Result<ColumnLayout, LoadError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());
    let headers = reader.headers()?.clone();
    ColumnLayout::detect(&headers)
}

/// Parse a weight cell: surrounding whitespace and one trailing `%` are
/// ignored. Negative or non-finite values are rejected.
pub fn parse_weight(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
}

/// Parse a market value cell, ignoring thousands separators.
pub fn parse_market_value(raw: &str) -> Option<f64> {
    raw.replace(',', "").trim().parse::<f64>().ok()
}

/// Header positions for one file. Optional columns may be absent.
struct ColumnIndex {
    name: Option<usize>,
    weight: Option<usize>,
    sector: Option<usize>,
    market_value: Option<usize>,
    share_change: Option<usize>,
    one_year_return: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, layout: &ColumnLayout) -> Self {
        let find = |col: &str| headers.iter().position(|h| h == col);
        Self {
            name: find(layout.name),
            weight: find(layout.weight),
            sector: find(layout.sector),
            market_value: find(layout.market_value),
            share_change: find(layout.share_change),
            one_year_return: find(layout.one_year_return),
        }
    }

    fn holding(&self, record: &StringRecord, row: usize) -> Result<StockHolding, RowError> {
        let name = cell(record, self.name).ok_or(RowError::MissingEssentialField {
            row,
            field: "holding name",
        })?;
        let raw_weight = cell(record, self.weight).ok_or(RowError::MissingEssentialField {
            row,
            field: "portfolio weight",
        })?;
        let portfolio_weight = parse_weight(raw_weight).ok_or_else(|| RowError::MalformedWeight {
            row,
            raw: raw_weight.to_string(),
        })?;

        Ok(StockHolding {
            company_name: name.to_string(),
            portfolio_weight,
            sector: cell(record, self.sector)
                .unwrap_or(UNKNOWN_SECTOR)
                .to_string(),
            market_value: cell(record, self.market_value).and_then(parse_market_value),
            share_change: cell(record, self.share_change).map(str::to_string),
            one_year_return: cell(record, self.one_year_return)
                .and_then(|r| r.parse::<f64>().ok()),
        })
    }
}

/// A non-blank cell, or None when the column or value is missing.
fn cell(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_accepts_percent_suffix() {
        assert_eq!(parse_weight("8.5%"), Some(8.5));
        assert_eq!(parse_weight(" 6.2 % "), Some(6.2));
        assert_eq!(parse_weight("3"), Some(3.0));
    }

    #[test]
    fn weight_rejects_garbage() {
        assert_eq!(parse_weight("n/a"), None);
        assert_eq!(parse_weight("-1.0"), None);
        assert_eq!(parse_weight("NaN"), None);
        assert_eq!(parse_weight(""), None);
    }

    #[test]
    fn market_value_strips_commas() {
        assert_eq!(parse_market_value("1,23,456.50"), Some(123456.5));
        assert_eq!(parse_market_value("—"), None);
    }

    #[test]
    fn detect_prefers_zerodha_name_column() {
        let headers = StringRecord::from(vec!["Company Name", "% Portfolio Weight", "Sector"]);
        assert_eq!(ColumnLayout::detect(&headers).unwrap(), ZERODHA_LAYOUT);

        let headers = StringRecord::from(vec!["Holding Name", "% Portfolio"]);
        assert_eq!(ColumnLayout::detect(&headers).unwrap(), AXIS_LAYOUT);
    }

    #[test]
    fn detect_rejects_unknown_headers() {
        let headers = StringRecord::from(vec!["Ticker", "Weight"]);
        assert!(matches!(
            ColumnLayout::detect(&headers),
            Err(LoadError::UnrecognizedLayout { .. })
        ));
    }

    #[test]
    fn detect_requires_weight_column() {
        let headers = StringRecord::from(vec!["Holding Name", "Sector"]);
        assert!(matches!(
            ColumnLayout::detect(&headers),
            Err(LoadError::MissingColumn {
                column: "% Portfolio",
                ..
            })
        ));
    }
}
