use std::str::FromStr;
use std::time::Duration;

/// Durations written like `10s`, `1m30s` or `2h`. A bare number is seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

const TOO_LARGE: &str = "Duration too large";

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3600),
        _ => None,
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total: u64 = 0;
        let mut pending: Option<u64> = None;
        let mut seen_number = false;

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            if let Some(digit) = c.to_digit(10) {
                let value = pending
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(digit)))
                    .ok_or(TOO_LARGE)?;
                pending = Some(value);
                seen_number = true;
                continue;
            }

            let factor = unit_seconds(c).ok_or_else(|| format!("Invalid duration unit: {}", c))?;
            let value = pending
                .take()
                .ok_or_else(|| format!("Unit '{}' must follow a number", c))?;
            total = value
                .checked_mul(factor)
                .and_then(|secs| total.checked_add(secs))
                .ok_or(TOO_LARGE)?;
        }

        if let Some(value) = pending {
            total = total.checked_add(value).ok_or(TOO_LARGE)?;
        }
        if !seen_number {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> u64 {
        s.parse::<HumanDuration>().unwrap().0.as_secs()
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(secs("10s"), 10);
        assert_eq!(secs("1m30s"), 90);
        assert_eq!(secs("2h"), 7200);
        assert_eq!(secs("1h 15m"), 4500);
        assert_eq!(secs("45"), 45);
        assert_eq!(secs("0"), 0);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("s".parse::<HumanDuration>().is_err());
        assert!("10x".parse::<HumanDuration>().is_err());
        assert!("ten".parse::<HumanDuration>().is_err());
        assert!("10sm".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_parse_overflow_is_an_error() {
        for input in [
            "99999999999999999h",
            "99999999999999999999",
            "18446744073709551615s 1s",
        ] {
            assert_eq!(
                input.parse::<HumanDuration>(),
                Err("Duration too large".to_string())
            );
        }
    }
}
