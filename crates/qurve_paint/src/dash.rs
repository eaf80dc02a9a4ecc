//! Dash pattern parsing

use smallvec::SmallVec;

/// Parse an SVG-style dash array (`"4 4"`, `"5,2,1"`) into segment lengths.
///
/// Follows canvas `setLineDash` rules: an odd number of segments is repeated to
/// make it even, and any negative or non-finite entry invalidates the whole
/// pattern (which then draws solid). Empty input is a solid line.
pub fn parse_dash_array(s: &str) -> SmallVec<[f32; 4]> {
    let mut out: SmallVec<[f32; 4]> = SmallVec::new();
    for part in s.split(|c: char| c == ',' || c.is_whitespace()) {
        if part.is_empty() {
            continue;
        }
        match part.parse::<f32>() {
            Ok(v) if v.is_finite() && v >= 0.0 => out.push(v),
            _ => {
                tracing::warn!("invalid dash pattern {:?}, drawing solid", s);
                return SmallVec::new();
            }
        }
    }
    if out.iter().all(|v| *v == 0.0) {
        return SmallVec::new();
    }
    if out.len() % 2 == 1 {
        let copy = out.clone();
        out.extend(copy);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_and_comma_separated() {
        assert_eq!(parse_dash_array("4 4").as_slice(), &[4.0, 4.0]);
        assert_eq!(parse_dash_array("3, 1").as_slice(), &[3.0, 1.0]);
    }

    #[test]
    fn odd_patterns_are_doubled() {
        assert_eq!(parse_dash_array("5").as_slice(), &[5.0, 5.0]);
        assert_eq!(
            parse_dash_array("1 2 3").as_slice(),
            &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn invalid_or_empty_is_solid() {
        assert!(parse_dash_array("").is_empty());
        assert!(parse_dash_array("4 x").is_empty());
        assert!(parse_dash_array("-1 2").is_empty());
        assert!(parse_dash_array("0 0").is_empty());
    }
}
