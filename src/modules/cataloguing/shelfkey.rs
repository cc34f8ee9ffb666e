//! Shelf-key generation: lopping of volume/part/date suffixes and sortable
//! forward/reverse key encodings per scheme.
//!
//! Forward keys are byte-comparable in physical shelf order. Reverse keys
//! are the per-character order complement of the forward key, padded to a
//! fixed width, so a descending browse is exactly the ascending browse
//! walked backwards.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::parsed::{ParsedCallNumber, ShelfKey};

/// Marker appended to a lopped call number so the base of a multi-volume
/// family never collides with a complete call number of the same text.
pub const ELLIPSIS: &str = " ...";

/// Reverse keys are padded to this width with `~` so that shorter keys sort
/// after their extensions, mirroring (in reverse) how shorter forward keys
/// sort before theirs.
pub const REVERSE_PAD_WIDTH: usize = 50;

const PAD_DIGITS: usize = 6;

// A trailing volume/part/date token with its separator: "V.2", "NO.4-6",
// "PT. 3", "BD.2", a 4-digit year, or a year range. The keyword must be
// followed by a period or space so Cutters like ".V35" are never mistaken
// for volume markers.
static TRAILING_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[ .,:;/]+(?:(?:V|VOL|NO|PT|BD)(?:\.\s?|\s)\d+(?:-\d+)?[A-Z]*\.?|\d{4}(?:[-/]\d{2,4})?\.?)$")
        .expect("trailing-token pattern compiles")
});

static LC_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{1,3}) ?(\d+)(\.\d+)? ?(.*)$").expect("LC key pattern compiles"));

static DEWEY_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3})(\.\d+)? ?(.*)$").expect("Dewey key pattern compiles"));

/// Strip trailing volume/part/date tokens. Returns the base and the removed
/// suffix (original text order). Never lops the entire string away.
pub fn lop(full: &str) -> (String, String) {
    let trimmed = full.trim();
    let mut end = trimmed.len();

    loop {
        let base = &trimmed[..end];
        let Some(m) = TRAILING_TOKEN.find(base) else {
            break;
        };
        if m.start() == 0 {
            break;
        }
        end = m.start();
    }

    // Drop separator residue left at the cut point.
    while end > 0 && matches!(trimmed.as_bytes()[end - 1], b' ' | b'.' | b',' | b':' | b';' | b'/')
    {
        end -= 1;
    }
    if end == 0 {
        return (trimmed.to_string(), String::new());
    }

    let base = trimmed[..end].to_string();
    let suffix = trimmed[end..]
        .trim_start_matches([' ', '.', ',', ':', ';', '/'])
        .to_string();
    (base, suffix)
}

/// The lopped display form: the base, with the ellipsis marker appended when
/// anything was stripped.
pub fn lopped_display(full: &str) -> String {
    let (base, suffix) = lop(full);
    if suffix.is_empty() {
        base
    } else {
        format!("{}{}", base, ELLIPSIS)
    }
}

/// Compute the shelf keys for one parsed call number. `None` only for
/// excluded items, which have no shelf presence at all.
pub fn shelf_key(parsed: &ParsedCallNumber) -> Option<ShelfKey> {
    let (full, forward_of): (&str, fn(&str) -> String) = match parsed {
        ParsedCallNumber::Excluded => return None,
        ParsedCallNumber::Lc { full, .. } => (full, lc_forward_key),
        ParsedCallNumber::Dewey { full, .. } => (full, dewey_forward_key),
        ParsedCallNumber::Other { full, .. } => (full, generic_forward_key),
        ParsedCallNumber::Unclassified { raw } => (raw, generic_forward_key),
    };

    let (base, suffix) = lop(full);
    let forward = forward_of(&base);
    let reverse = reverse_key(&forward);
    let lopped = if suffix.is_empty() {
        base
    } else {
        format!("{}{}", base, ELLIPSIS)
    };

    Some(ShelfKey {
        lopped,
        forward,
        reverse,
        volume_sort: numeric_aware_key(&suffix),
    })
}

// LC: letters, then the class number with a digit-count prefix on the whole
// part (so class "2" sorts before "10"), fraction verbatim, Cutter digits
// raw (Cutters compare as decimals, digit by digit).
fn lc_forward_key(base: &str) -> String {
    let upper = base.to_uppercase();
    let Some(caps) = LC_KEY_PATTERN.captures(&upper) else {
        return generic_forward_key(base);
    };

    let letters = &caps[1];
    let whole = &caps[2];
    let fraction = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    let rest = caps.get(4).map(|m| m.as_str()).unwrap_or("");

    let mut key = String::with_capacity(upper.len() + 4);
    key.push_str(letters);
    key.push(' ');
    key.push(char::from_digit(whole.len().min(9) as u32, 10).unwrap_or('9'));
    key.push_str(whole);
    key.push_str(fraction);

    let rest_key = cutter_key(rest);
    if !rest_key.is_empty() {
        key.push(' ');
        key.push_str(&rest_key);
    }
    key
}

// Dewey: whole part zero-padded to 3 digits (canonical form), fraction
// verbatim, Cutter digits raw.
fn dewey_forward_key(base: &str) -> String {
    let upper = base.to_uppercase();
    let Some(caps) = DEWEY_KEY_PATTERN.captures(&upper) else {
        return generic_forward_key(base);
    };

    let whole = &caps[1];
    let fraction = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let rest = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    let mut key = String::with_capacity(upper.len() + 4);
    key.push_str(&format!("{:0>3}", whole));
    key.push_str(fraction);

    let rest_key = cutter_key(rest);
    if !rest_key.is_empty() {
        key.push(' ');
        key.push_str(&rest_key);
    }
    key
}

// Catch-all for SUDOC/ALPHANUM/local schemes: case folded, numeric runs
// zero-padded, punctuation reduced to word breaks.
fn generic_forward_key(base: &str) -> String {
    let upper = base.to_uppercase();
    let mut key = String::with_capacity(upper.len() + 8);
    let mut digits = String::new();
    let mut pending_space = false;

    for c in upper.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if !digits.is_empty() {
            push_padded(&mut key, &digits, &mut pending_space);
            digits.clear();
        }
        if c.is_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.push(c);
        } else {
            pending_space = true;
        }
    }
    if !digits.is_empty() {
        push_padded(&mut key, &digits, &mut pending_space);
    }
    key
}

fn push_padded(key: &mut String, digits: &str, pending_space: &mut bool) {
    if *pending_space && !key.is_empty() {
        key.push(' ');
    }
    *pending_space = false;
    for _ in digits.len()..PAD_DIGITS {
        key.push('0');
    }
    key.push_str(digits);
}

// Cutter sections keep letters and digits verbatim (digit-by-digit decimal
// comparison) with periods dropped and spaces collapsed.
fn cutter_key(rest: &str) -> String {
    let mut key = String::with_capacity(rest.len());
    let mut pending_space = false;
    for c in rest.chars() {
        if c.is_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.push(c);
        } else if c.is_whitespace() {
            pending_space = true;
        }
        // other punctuation (periods before Cutters) is dropped
    }
    key
}

/// Per-character order complement over printable ASCII, padded with `~`.
/// For any two forward keys, the complements compare in exactly the
/// opposite order.
pub fn reverse_key(forward: &str) -> String {
    let mut out = String::with_capacity(REVERSE_PAD_WIDTH.max(forward.len()));
    let mut count = 0usize;
    for c in forward.chars() {
        let code = c as u32;
        if (0x20..=0x7E).contains(&code) {
            // complement within the printable range
            out.push(char::from_u32(0x20 + (0x7E - code)).unwrap_or('~'));
        } else {
            out.push(c);
        }
        count += 1;
    }
    while count < REVERSE_PAD_WIDTH {
        out.push('~');
        count += 1;
    }
    out
}

/// Numeric-aware encoding of a volume/part/date suffix: digit runs are
/// zero-padded so "V.2" sorts before "V.10".
pub fn numeric_aware_key(suffix: &str) -> String {
    let upper = suffix.to_uppercase();
    let mut key = String::with_capacity(upper.len() + 8);
    let mut digits = String::new();

    for c in upper.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if !digits.is_empty() {
            for _ in digits.len()..PAD_DIGITS {
                key.push('0');
            }
            key.push_str(&digits);
            digits.clear();
        }
        key.push(c);
    }
    if !digits.is_empty() {
        for _ in digits.len()..PAD_DIGITS {
            key.push('0');
        }
        key.push_str(&digits);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::CallNumberScheme;

    #[test]
    fn test_lop_volume_tokens() {
        assert_eq!(
            lop("QA76 .C35 V.2"),
            ("QA76 .C35".to_string(), "V.2".to_string())
        );
        assert_eq!(
            lop("QA76 .C35 NO.4-6"),
            ("QA76 .C35".to_string(), "NO.4-6".to_string())
        );
        assert_eq!(
            lop("HD123 .A4 2014"),
            ("HD123 .A4".to_string(), "2014".to_string())
        );
        assert_eq!(
            lop("HD123 .A4 1999-2001"),
            ("HD123 .A4".to_string(), "1999-2001".to_string())
        );
    }

    #[test]
    fn test_lop_iterates_over_stacked_tokens() {
        assert_eq!(
            lop("QA76 .C35 V.2 1995"),
            ("QA76 .C35".to_string(), "V.2 1995".to_string())
        );
    }

    #[test]
    fn test_lop_leaves_cutters_alone() {
        // ".V35" is a Cutter, not a volume marker.
        assert_eq!(lop("PS3572 .V35"), ("PS3572 .V35".to_string(), String::new()));
        assert_eq!(lop("M123 .M456"), ("M123 .M456".to_string(), String::new()));
    }

    #[test]
    fn test_lop_never_empties_the_string() {
        assert_eq!(lop("1999"), ("1999".to_string(), String::new()));
    }

    #[test]
    fn test_lopped_display_marker() {
        assert_eq!(lopped_display("QA76 .C35 V.2"), "QA76 .C35 ...");
        assert_eq!(lopped_display("QA76 .C35"), "QA76 .C35");
    }

    #[test]
    fn test_lc_forward_key_digit_length_order() {
        // Class number 2 shelves before 10 despite "10" < "2" as strings.
        let short = lc_forward_key("M2 .B5");
        let long = lc_forward_key("M10 .B5");
        assert!(short < long, "{:?} should sort before {:?}", short, long);
    }

    #[test]
    fn test_lc_forward_key_cutters_compare_as_decimals() {
        // .V35 < .V4 on the shelf (Cutters are decimals).
        let a = lc_forward_key("PS3572 .V35");
        let b = lc_forward_key("PS3572 .V4");
        assert!(a < b, "{:?} should sort before {:?}", a, b);
    }

    #[test]
    fn test_dewey_forward_key_canonicalizes_leading_zeros() {
        assert_eq!(dewey_forward_key("2 U73"), dewey_forward_key("002 U73"));
        assert_eq!(dewey_forward_key("2 U73"), "002 U73");
    }

    #[test]
    fn test_generic_forward_key_pads_numbers() {
        let a = generic_forward_key("CALIF A125 .B9");
        let b = generic_forward_key("CALIF A1250 .B9");
        assert!(a < b);
        assert_eq!(generic_forward_key("Y 4.AG 8/1:985"), "Y 000004 AG 000008 000001 000985");
    }

    #[test]
    fn test_reverse_key_inverts_order() {
        let keys = [
            lc_forward_key("M2 .B5"),
            lc_forward_key("M10 .B5"),
            lc_forward_key("M123 .M456"),
            lc_forward_key("PS3572 .V35"),
        ];
        for a in &keys {
            for b in &keys {
                if a < b {
                    assert!(
                        reverse_key(a) > reverse_key(b),
                        "reverse order must invert {:?} vs {:?}",
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_reverse_key_padded_width() {
        let rev = reverse_key("M 12 B5");
        assert_eq!(rev.chars().count(), REVERSE_PAD_WIDTH);
    }

    #[test]
    fn test_volume_sort_is_numeric() {
        let v2 = numeric_aware_key("V.2");
        let v10 = numeric_aware_key("V.10");
        assert!(v2 < v10);
    }

    #[test]
    fn test_shelf_key_for_other_scheme() {
        let parsed = ParsedCallNumber::Other {
            scheme: CallNumberScheme::Sudoc,
            lopped: "Y 4.AG 8/1:985".to_string(),
            full: "Y 4.AG 8/1:985".to_string(),
        };
        let key = shelf_key(&parsed).unwrap();
        assert_eq!(key.lopped, "Y 4.AG 8/1:985");
        assert!(key.volume_sort.is_empty());
    }
}
