//! Currency formatting for rendered documents
//!
//! Amounts always carry exactly two decimal digits and space-grouped
//! thousands with a comma decimal separator, matching the bank's document
//! style for every language. Symbol placement is total over all currency
//! codes: ruble codes take a suffix symbol, a small set of majors take a
//! prefix symbol, and anything else falls back to the code itself.

/// Where the currency marker sits relative to the grouped number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// Space-separated symbol after the number, e.g. `1 000,00 ₽`.
    Suffix(&'static str),
    /// Symbol directly before the number, e.g. `$1 000,00`.
    Prefix(&'static str),
    /// No mapped symbol; the code itself prefixes the number, e.g.
    /// `SEK 1 000,00`.
    Code,
}

/// Symbol placement for any currency code. Total by construction.
pub fn symbol_placement(currency: &str) -> SymbolPlacement {
    match currency {
        "RUB" | "RUR" => SymbolPlacement::Suffix("₽"),
        "USD" => SymbolPlacement::Prefix("$"),
        "EUR" => SymbolPlacement::Prefix("€"),
        "GBP" => SymbolPlacement::Prefix("£"),
        "CHF" => SymbolPlacement::Prefix("Fr."),
        "JPY" | "CNY" => SymbolPlacement::Prefix("¥"),
        _ => SymbolPlacement::Code,
    }
}

/// Format an amount with its currency marker.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let grouped = group_two_decimals(amount);
    match symbol_placement(currency) {
        SymbolPlacement::Suffix(sym) => format!("{grouped} {sym}"),
        SymbolPlacement::Prefix(sym) => format!("{sym}{grouped}"),
        SymbolPlacement::Code => format!("{currency} {grouped}"),
    }
}

/// Two fixed decimals, thousands grouped with spaces, comma separator.
fn group_two_decimals(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some(parts) => parts,
        None => (unsigned, "00"),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*b as char);
    }

    format!("{sign}{grouped},{frac_part}")
}
