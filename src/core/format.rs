const RUPEE: &str = "₹";
const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

pub fn format_inr(value: f64) -> String {
    if value.is_nan() {
        return format!("{RUPEE}NaN");
    }
    let sign = if value < 0.0 && value.round() != 0.0 {
        "-"
    } else {
        ""
    };
    if value.is_infinite() {
        return format!("{sign}{RUPEE}∞");
    }

    let digits = format!("{:.0}", value.abs().round());
    format!("{sign}{RUPEE}{}", group_indian(&digits))
}

pub fn format_abbreviated(value: f64) -> String {
    if value >= CRORE {
        format!("{RUPEE}{} Cr", format_tenths(value / CRORE))
    } else if value >= LAKH {
        format!("{RUPEE}{} L", format_tenths(value / LAKH))
    } else {
        format_inr(value)
    }
}

/// One decimal place with exact ties rounded away from zero, so `1.25` is
/// `1.3` and `-1.25` is `-1.3`.
pub fn format_tenths(value: f64) -> String {
    let magnitude = value.abs();
    let exact = format!("{magnitude:.64}");
    let is_tie = exact.split_once('.').is_some_and(|(_, frac)| {
        frac[1..]
            .strip_prefix('5')
            .is_some_and(|rest| rest.bytes().all(|b| b == b'0'))
    });
    let rounded = if is_tie {
        format!("{:.1}", ((magnitude * 10.0).floor() + 1.0) / 10.0)
    } else {
        format!("{magnitude:.1}")
    };
    if value < 0.0 {
        format!("-{rounded}")
    } else {
        rounded
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    let lead = head.len() % 2;
    if lead == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[lead..].chunks(2).enumerate() {
        if i > 0 || lead == 1 {
            out.push(',');
        }
        out.push(pair[0] as char);
        out.push(pair[1] as char);
    }
    out.push(',');
    out.push_str(tail);
    out
}
