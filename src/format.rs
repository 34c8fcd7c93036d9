//! 화면 표시용 숫자 서식.

use crate::sizing::round_to;

/// 통화 금액을 정수로 반올림하고 천 단위 쉼표를 넣는다. 예: `₹80,000`
pub fn currency(symbol: &str, amount: f64) -> String {
    let rounded = amount.round_ties_even();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}{symbol}{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 소수 `digits` 자리 표시.
pub fn decimal(value: f64, digits: i32) -> String {
    let width = digits.max(0) as usize;
    format!("{:.*}", width, round_to(value, digits))
}

/// kW 용량 표시. 0.5 단위이므로 소수 첫째 자리까지만 쓴다.
pub fn kilowatts(kw: f64) -> String {
    format!("{kw:.1}")
}

/// 발전량처럼 정수부만 보여주는 값.
pub fn whole(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency("₹", 80_000.0), "₹80,000");
        assert_eq!(currency("₹", 1_234_567.4), "₹1,234,567");
        assert_eq!(currency("$", 999.0), "$999");
        assert_eq!(currency("₹", 0.0), "₹0");
    }

    #[test]
    fn currency_rounds_to_integer() {
        assert_eq!(currency("₹", 1919.6), "₹1,920");
        assert_eq!(currency("₹", -1500.2), "-₹1,500");
    }

    #[test]
    fn decimal_and_whole() {
        assert_eq!(decimal(250.04, 1), "250.0");
        assert_eq!(decimal(1.492, 2), "1.49");
        assert_eq!(whole(240.9), "240");
        assert_eq!(kilowatts(2.0), "2.0");
    }
}
