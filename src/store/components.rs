use super::types::ComponentRef;

/// DJIA constituents. The membership changes rarely enough that the dashboard
/// ships it as a constant rather than persisting it.
const DJIA_COMPONENTS: [(&str, &str); 30] = [
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corp."),
    ("UNH", "UnitedHealth Group Inc."),
    ("GS", "Goldman Sachs Group Inc."),
    ("HD", "Home Depot Inc."),
    ("CAT", "Caterpillar Inc."),
    ("AMGN", "Amgen Inc."),
    ("MCD", "McDonald's Corp."),
    ("V", "Visa Inc."),
    ("BA", "Boeing Co."),
    ("TRV", "Travelers Companies Inc."),
    ("AXP", "American Express Co."),
    ("JPM", "JPMorgan Chase & Co."),
    ("IBM", "International Business Machines Corp."),
    ("WMT", "Walmart Inc."),
    ("JNJ", "Johnson & Johnson"),
    ("PG", "Procter & Gamble Co."),
    ("CVX", "Chevron Corp."),
    ("MRK", "Merck & Co. Inc."),
    ("DIS", "Walt Disney Co."),
    ("NKE", "Nike Inc."),
    ("KO", "Coca-Cola Co."),
    ("CRM", "Salesforce Inc."),
    ("VZ", "Verizon Communications Inc."),
    ("INTC", "Intel Corp."),
    ("CSCO", "Cisco Systems Inc."),
    ("WBA", "Walgreens Boots Alliance Inc."),
    ("DOW", "Dow Inc."),
    ("HON", "Honeywell International Inc."),
    ("MMM", "3M Co."),
];

pub fn djia_components() -> Vec<ComponentRef> {
    DJIA_COMPONENTS
        .iter()
        .map(|(symbol, name)| ComponentRef {
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
        .collect()
}
