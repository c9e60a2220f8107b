use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// The possible statuses of a [`Table`](crate::Table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The table is focused.
    Focused,
    /// The table is unfocused.
    Unfocused,
    /// The table cannot be interacted with.
    Disabled,
}

/// Creates a random GUID in the canonical hyphenated 8-4-4-4-12 form.
pub fn create_guid() -> String {
    uuid::Uuid::new_v4().to_string()
}

static CRON: LazyLock<Regex> = LazyLock::new(|| {
    // minute, hour, day of month, month, day of week
    let fields = [
        r"[0-5]?\d",
        r"(?:[01]?\d|2[0-3])",
        r"(?:0?[1-9]|[12]\d|3[01])",
        r"(?:0?[1-9]|1[0-2])",
        r"[0-7]",
    ];

    let pattern = fields
        .iter()
        .map(|value| {
            let element = format!("{value}(?:-{value})?");
            format!(r"(?:\*(?:/\d+)?|{element}(?:,{element})*)")
        })
        .collect::<Vec<_>>()
        .join(" ");

    Regex::new(&format!("^{pattern}$")).expect("cron pattern is valid")
});

/// Whether the given string is a valid five-field cron expression.
///
/// Accepts `*`, `*/step`, single values, ranges, and comma lists, with each
/// field's values range-checked (minutes 0-59, hours 0-23, days 1-31,
/// months 1-12, weekdays 0-7).
pub fn is_cron(expression: &str) -> bool {
    CRON.is_match(expression.trim())
}

/// The display width of a string in terminal columns, used to estimate
/// column sizes for derived column lists.
pub fn text_width(text: &str) -> usize {
    text.width()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guid_has_the_canonical_shape() {
        let guid = create_guid();

        assert_eq!(guid.len(), 36);

        let groups: Vec<&str> = guid.split('-').collect();
        assert_eq!(
            groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(
            guid.chars()
                .all(|c| c == '-' || c.is_ascii_hexdigit()),
            "unexpected character in {guid}"
        );
    }

    #[test]
    fn guids_are_unique() {
        assert_ne!(create_guid(), create_guid());
    }

    #[test]
    fn accepts_common_cron_expressions() {
        assert!(is_cron("*/5 * * * *"));
        assert!(is_cron("* * * * *"));
        assert!(is_cron("0 0 1 1 0"));
        assert!(is_cron("15,45 8-17 * * 1-5"));
        assert!(is_cron("59 23 31 12 7"));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(!is_cron("60 * * * *"), "minute out of range");
        assert!(!is_cron("* 24 * * *"), "hour out of range");
        assert!(!is_cron("* * 0 * *"), "day of month out of range");
        assert!(!is_cron("* * * 13 *"), "month out of range");
        assert!(!is_cron("* * * * 8"), "weekday out of range");
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(!is_cron(""));
        assert!(!is_cron("* * * *"), "too few fields");
        assert!(!is_cron("* * * * * *"), "too many fields");
        assert!(!is_cron("every five minutes"));
    }

    #[test]
    fn width_counts_display_columns() {
        assert_eq!(text_width("Meter"), 5);
        assert_eq!(text_width(""), 0);
        // fullwidth characters take two columns
        assert_eq!(text_width("変電所"), 6);
    }
}
