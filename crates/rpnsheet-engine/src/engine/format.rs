/// Format a value as fixed-point with `precision` digits after the decimal point.
///
/// Non-finite values print as `inf`, `-inf` and `nan`.
pub fn format_number(n: f64, precision: usize) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.*}", precision, n)
    }
}
