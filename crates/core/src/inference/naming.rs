//! Header cell to Go identifier conversion

/// Characters that start a new capitalized segment and are dropped
const NAME_SEPARATORS: &[char] = &['-', ':', '_'];

/// Convert a header cell into an exported Go field name.
///
/// `Id` is first rewritten to `ID`, then every segment delimited by `-`, `:` or
/// `_` is capitalized and the separators dropped. A segment that capitalizes
/// to exactly `Id` is rewritten as well, so `billing-id` becomes `BillingID`.
///
/// ```
/// use shapegen_core::inference::to_field_name;
///
/// assert_eq!(to_field_name("billing-id"), "BillingID");
/// assert_eq!(to_field_name("amount_usd"), "AmountUsd");
/// assert_eq!(to_field_name("UserId"), "UserID");
/// ```
pub fn to_field_name(header: &str) -> String {
    let header = header.replace("Id", "ID");
    let mut name = String::with_capacity(header.len());
    for segment in header.split(NAME_SEPARATORS) {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let rest = chars.as_str();
        if first.eq_ignore_ascii_case(&'i') && rest == "d" {
            name.push_str("ID");
            continue;
        }
        name.extend(first.to_uppercase());
        name.push_str(rest);
    }
    name
}

/// Lower-case the first character of a field name, as used for tag values
pub fn camelcase(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
