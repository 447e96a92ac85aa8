//! Common regex patterns for electricity invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number patterns
    pub static ref INVOICE_NO_VAT: Regex = Regex::new(
        r"(?i)Faktura\s+VAT\s+nr\s+([A-Za-z0-9/\-]+)"
    ).unwrap();

    pub static ref INVOICE_NO_PLAIN: Regex = Regex::new(
        r"(?i)Faktura\s+nr\s+([A-Za-z0-9/\-]+)"
    ).unwrap();

    pub static ref INVOICE_NO_LABELED: Regex = Regex::new(
        r"(?i)(?:Nr|Numer)\s+faktury:?\s*([A-Za-z0-9/\-]+)"
    ).unwrap();

    // Issue date patterns (dd.mm.yyyy or dd/mm/yyyy)
    pub static ref ISSUE_DATE_Z_DNIA: Regex = Regex::new(
        r"(?i)z\s+dnia\s+(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();

    pub static ref ISSUE_DATE_LABELED: Regex = Regex::new(
        r"(?i)Data\s+(?:faktury|wystawienia):?[ \t]*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();

    // Billing period patterns; both boundary dates are captured atomically
    pub static ref PERIOD_OD_DO: Regex = Regex::new(
        r"(?i)(?:w\s+okresie|za\s+okres)\s+od\s+(\d{2}[./]\d{2}[./]\d{4})\s+do\s+(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();

    pub static ref PERIOD_DASH: Regex = Regex::new(
        r"(?i)okres(?:\s+rozliczeniowy)?:?\s*(\d{2}[./]\d{2}[./]\d{4})\s*[-–]\s*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();

    // Numeric tokens (Polish comma-decimal convention)
    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"\d+(?:[.,]\d+)?"
    ).unwrap();

    pub static ref COMMA_NUMBER: Regex = Regex::new(
        r"\d+(?:[ \u{00a0}]\d{3})*,\d+"
    ).unwrap();

    // A dot between 1-3 digits and exactly 3 digits is a thousands
    // separator in the Tauron layout, not a decimal point.
    pub static ref THOUSANDS_DOT: Regex = Regex::new(
        r"^\d{1,3}\.\d{3}(?:,\d+)?$"
    ).unwrap();

    // Totals patterns
    pub static ref EON_SETTLEMENT: Regex = Regex::new(
        r"Należność za faktyczne zużycie\s+([\d,]+)\s+(\d{1,2})\s+([\d,]+)\s+([\d,]+)"
    ).unwrap();

    pub static ref AMOUNT_DUE: Regex = Regex::new(
        r"(?i)(?:kwota\s+)?do\s+zapłaty:?\s*(\d+(?:[ \u{00a0}]\d{3})*,\d{2})"
    ).unwrap();

    // Consumption patterns
    pub static ref KWH_LABELED: Regex = Regex::new(
        r"(?i)Zużycie:?\s*(\d+(?:[.,]\d+)?)\s*kWh"
    ).unwrap();

    pub static ref KWH_ENERGIA: Regex = Regex::new(
        r"(?i)Energia\s+czynna\D{0,60}?(\d+(?:[.,]\d+)?)\s*kWh"
    ).unwrap();

    pub static ref KWH_RAZEM: Regex = Regex::new(
        r"(?i)Razem\s+energia\D{0,60}?(\d+(?:[.,]\d+)?)\s*kWh"
    ).unwrap();

    pub static ref KWH_ANY: Regex = Regex::new(
        r"(?i)(\d+(?:[.,]\d+)?)\s*kWh"
    ).unwrap();

    pub static ref KWH_TAURON: Regex = Regex::new(
        r"(?i)(?:energia\s+(?:czynna|pobrana)|zużycie)\D{0,60}?(\d{1,3}\.\d{3}|\d+(?:,\d+)?)\s*kWh"
    ).unwrap();

    // Leading run of letters: the item name at the start of a data line
    pub static ref ITEM_NAME_PREFIX: Regex = Regex::new(
        r"^([A-Za-ząćęłńóśźżĄĆĘŁŃÓŚŹŻ .\-]+)"
    ).unwrap();

    // Whitespace-separated tokens with their positions
    pub static ref LINE_TOKEN: Regex = Regex::new(
        r"\S+"
    ).unwrap();
}
