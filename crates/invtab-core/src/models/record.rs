//! Companies, header bundles, and the per-company tabular record types.
//!
//! Each known vendor has a fixed ordered column schema that is a contract
//! with the output sink: column names are emitted verbatim, including
//! formatting quirks carried over from the historical export files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A known vendor whose invoice layout can be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Company {
    /// Nimbus Infotech Pvt. Ltd.: IT services, intra-state (CGST + SGST).
    Nimbus,
    /// Meridian Industrial Supplies: goods, inter-state (IGST).
    Meridian,
    /// Stellar Facility Services: facility/manpower services, intra-state.
    Stellar,
}

impl Company {
    /// All known companies, in output order.
    pub const ALL: [Company; 3] = [Company::Nimbus, Company::Meridian, Company::Stellar];

    /// Full legal name as printed on the invoice letterhead.
    pub fn display_name(&self) -> &'static str {
        match self {
            Company::Nimbus => "Nimbus Infotech Pvt. Ltd.",
            Company::Meridian => "Meridian Industrial Supplies",
            Company::Stellar => "Stellar Facility Services",
        }
    }

    /// Short identifier used for output file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Company::Nimbus => "nimbus_infotech",
            Company::Meridian => "meridian_industrial",
            Company::Stellar => "stellar_facility",
        }
    }

    /// The fixed ordered column schema for this company's records.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Company::Nimbus => &NIMBUS_COLUMNS,
            Company::Meridian => &MERIDIAN_COLUMNS,
            Company::Stellar => &STELLAR_COLUMNS,
        }
    }
}

/// Column schema for Nimbus Infotech records.
pub const NIMBUS_COLUMNS: [&str; 18] = [
    "Invoice No",
    "Invoice Date",
    "Vendor GSTIN",
    "Buyer Name",
    "Buyer GSTIN",
    "Place of Supply",
    "Description",
    "SAC Code",
    "Qty",
    "Rate",
    "Taxable Value",
    "CGST %",
    "CGST Amount",
    "SGST %",
    "SGST Amount",
    "IGST %",
    "IGST Amount",
    "Total",
];

/// Column schema for Meridian Industrial records.
pub const MERIDIAN_COLUMNS: [&str; 13] = [
    "Invoice No",
    "Invoice Date",
    "Vendor GSTIN",
    "Buyer Name",
    "Buyer GSTIN",
    "Description",
    "HSN Code",
    "Qty",
    "Unit Rate",
    "Taxable Value",
    "IGST %",
    "IGST Amount",
    "Total Amount",
];

/// Column schema for Stellar Facility records.
///
/// The double space in "Invoice  No" is present in the historical export
/// files and downstream tooling keys on it; it must be emitted verbatim.
pub const STELLAR_COLUMNS: [&str; 17] = [
    "Invoice  No",
    "Invoice Date",
    "Site Name",
    "Service Type",
    "Vendor GSTIN",
    "Buyer Name",
    "Buyer GSTIN",
    "Description",
    "SAC Code",
    "Qty",
    "Rate",
    "Taxable Value",
    "CGST %",
    "CGST Amount",
    "SGST %",
    "SGST Amount",
    "Total",
];

/// An invoice date: either a parsed calendar date or the unparsed literal
/// when none of the known formats matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// Successfully parsed calendar date.
    Parsed(NaiveDate),
    /// Literal text kept as-is when parsing failed.
    Raw(String),
}

impl DateValue {
    /// True when no date text was found at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, DateValue::Raw(s) if s.is_empty())
    }

    /// Render for display or CSV output (ISO for parsed dates).
    pub fn display(&self) -> String {
        match self {
            DateValue::Parsed(d) => d.to_string(),
            DateValue::Raw(s) => s.clone(),
        }
    }
}

impl Default for DateValue {
    fn default() -> Self {
        DateValue::Raw(String::new())
    }
}

/// Per-document header field bundle.
///
/// Every field defaults to empty: a missed pattern yields an explicit empty
/// value, never a missing key, so every downstream row can read every header
/// field unconditionally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderFields {
    /// Vendor legal name.
    pub vendor_name: String,

    /// Vendor GST registration number.
    pub vendor_gstin: String,

    /// Buyer legal name.
    pub buyer_name: String,

    /// Buyer GST registration number.
    pub buyer_gstin: String,

    /// Invoice number/identifier.
    pub invoice_number: String,

    /// Invoice date (parsed or literal).
    pub invoice_date: DateValue,

    /// Place of supply, when the layout prints one.
    pub place_of_supply: String,

    /// Site name from the Stellar annexure, when present.
    pub site_name: String,

    /// Service type from the Stellar annexure, when present.
    pub service_type: String,
}

/// A single output cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Text value.
    Text(String),
    /// Monetary or numeric value.
    Number(Decimal),
    /// Calendar date.
    Date(NaiveDate),
}

impl Cell {
    /// Render for CSV output.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.to_string(),
        }
    }
}

impl From<&DateValue> for Cell {
    fn from(value: &DateValue) -> Self {
        match value {
            DateValue::Parsed(d) => Cell::Date(*d),
            DateValue::Raw(s) => Cell::Text(s.clone()),
        }
    }
}

/// One line item from a Nimbus Infotech invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NimbusRow {
    pub invoice_number: String,
    pub invoice_date: DateValue,
    pub vendor_gstin: String,
    pub buyer_name: String,
    pub buyer_gstin: String,
    pub place_of_supply: String,
    pub description: String,
    pub sac_code: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub taxable_value: Decimal,
    pub cgst_pct: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_pct: Decimal,
    pub sgst_amount: Decimal,
    /// Structurally zero on this intra-state layout.
    pub igst_pct: Decimal,
    pub igst_amount: Decimal,
    pub total: Decimal,
}

impl NimbusRow {
    /// Ordered cell values matching [`NIMBUS_COLUMNS`].
    pub fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.invoice_number.clone()),
            Cell::from(&self.invoice_date),
            Cell::Text(self.vendor_gstin.clone()),
            Cell::Text(self.buyer_name.clone()),
            Cell::Text(self.buyer_gstin.clone()),
            Cell::Text(self.place_of_supply.clone()),
            Cell::Text(self.description.clone()),
            Cell::Text(self.sac_code.clone()),
            Cell::Number(self.quantity),
            Cell::Number(self.rate),
            Cell::Number(self.taxable_value),
            Cell::Number(self.cgst_pct),
            Cell::Number(self.cgst_amount),
            Cell::Number(self.sgst_pct),
            Cell::Number(self.sgst_amount),
            Cell::Number(self.igst_pct),
            Cell::Number(self.igst_amount),
            Cell::Number(self.total),
        ]
    }
}

/// One line item from a Meridian Industrial invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeridianRow {
    pub invoice_number: String,
    pub invoice_date: DateValue,
    pub vendor_gstin: String,
    pub buyer_name: String,
    pub buyer_gstin: String,
    pub description: String,
    pub hsn_code: String,
    pub quantity: Decimal,
    pub unit_rate: Decimal,
    pub taxable_value: Decimal,
    pub igst_pct: Decimal,
    pub igst_amount: Decimal,
    pub total_amount: Decimal,
}

impl MeridianRow {
    /// Ordered cell values matching [`MERIDIAN_COLUMNS`].
    pub fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.invoice_number.clone()),
            Cell::from(&self.invoice_date),
            Cell::Text(self.vendor_gstin.clone()),
            Cell::Text(self.buyer_name.clone()),
            Cell::Text(self.buyer_gstin.clone()),
            Cell::Text(self.description.clone()),
            Cell::Text(self.hsn_code.clone()),
            Cell::Number(self.quantity),
            Cell::Number(self.unit_rate),
            Cell::Number(self.taxable_value),
            Cell::Number(self.igst_pct),
            Cell::Number(self.igst_amount),
            Cell::Number(self.total_amount),
        ]
    }
}

/// One line item from a Stellar Facility invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StellarRow {
    pub invoice_number: String,
    pub invoice_date: DateValue,
    pub site_name: String,
    pub service_type: String,
    pub vendor_gstin: String,
    pub buyer_name: String,
    pub buyer_gstin: String,
    pub description: String,
    pub sac_code: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub taxable_value: Decimal,
    pub cgst_pct: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_pct: Decimal,
    pub sgst_amount: Decimal,
    pub total: Decimal,
}

impl StellarRow {
    /// Ordered cell values matching [`STELLAR_COLUMNS`].
    pub fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.invoice_number.clone()),
            Cell::from(&self.invoice_date),
            Cell::Text(self.site_name.clone()),
            Cell::Text(self.service_type.clone()),
            Cell::Text(self.vendor_gstin.clone()),
            Cell::Text(self.buyer_name.clone()),
            Cell::Text(self.buyer_gstin.clone()),
            Cell::Text(self.description.clone()),
            Cell::Text(self.sac_code.clone()),
            Cell::Number(self.quantity),
            Cell::Number(self.rate),
            Cell::Number(self.taxable_value),
            Cell::Number(self.cgst_pct),
            Cell::Number(self.cgst_amount),
            Cell::Number(self.sgst_pct),
            Cell::Number(self.sgst_amount),
            Cell::Number(self.total),
        ]
    }
}

/// A line-item record from any known company, tagged by schema.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "company", rename_all = "snake_case")]
pub enum LineRecord {
    Nimbus(NimbusRow),
    Meridian(MeridianRow),
    Stellar(StellarRow),
}

impl LineRecord {
    /// The company whose schema this record conforms to.
    pub fn company(&self) -> Company {
        match self {
            LineRecord::Nimbus(_) => Company::Nimbus,
            LineRecord::Meridian(_) => Company::Meridian,
            LineRecord::Stellar(_) => Company::Stellar,
        }
    }

    /// Ordered cell values matching `self.company().columns()`.
    pub fn to_cells(&self) -> Vec<Cell> {
        match self {
            LineRecord::Nimbus(row) => row.to_cells(),
            LineRecord::Meridian(row) => row.to_cells(),
            LineRecord::Stellar(row) => row.to_cells(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cells_match_schema_width() {
        let nimbus = LineRecord::Nimbus(NimbusRow::default());
        let meridian = LineRecord::Meridian(MeridianRow::default());
        let stellar = LineRecord::Stellar(StellarRow::default());

        for record in [nimbus, meridian, stellar] {
            assert_eq!(
                record.to_cells().len(),
                record.company().columns().len(),
                "schema width mismatch for {:?}",
                record.company()
            );
        }
    }

    #[test]
    fn test_stellar_invoice_no_column_keeps_double_space() {
        assert_eq!(STELLAR_COLUMNS[0], "Invoice  No");
    }

    #[test]
    fn test_date_value_display() {
        let parsed = DateValue::Parsed(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(parsed.display(), "2024-01-15");

        let raw = DateValue::Raw("sometime in March".to_string());
        assert_eq!(raw.display(), "sometime in March");
    }

    #[test]
    fn test_header_fields_default_to_empty() {
        let header = HeaderFields::default();
        assert_eq!(header.vendor_gstin, "");
        assert_eq!(header.buyer_gstin, "");
        assert!(header.invoice_date.is_empty());
    }
}
