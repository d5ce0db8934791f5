use std::sync::LazyLock;

use regex::Regex;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})\s+al\s+(\d{1,2})\s+(?:de\s+)?(enero|febrero|marzo|abril|mayo|junio|julio|agosto|septiembre|setiembre|octubre|noviembre|diciembre)\b",
    )
    .expect("date range pattern")
});

/// Finds a "del 9 al 13 de febrero" style range in a page heading and returns
/// it as "9 al 13 de febrero".
pub fn extract_date_range(heading: &str) -> Option<String> {
    let caps = RANGE_RE.captures(heading)?;

    Some(format!(
        "{} al {} de {}",
        &caps[1],
        &caps[2],
        caps[3].to_lowercase()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_heading() {
        assert_eq!(
            extract_date_range("Menú semana del 9 al 13 de febrero").as_deref(),
            Some("9 al 13 de febrero")
        );
        assert_eq!(
            extract_date_range("Semana del 24 al 28 de Abril").as_deref(),
            Some("24 al 28 de abril")
        );
    }

    #[test]
    fn test_without_de_before_month() {
        assert_eq!(
            extract_date_range("2 al 6 febrero").as_deref(),
            Some("2 al 6 de febrero")
        );
    }

    #[test]
    fn test_trailing_year_is_ignored() {
        assert_eq!(
            extract_date_range("9 al 13 de febrero de 2026").as_deref(),
            Some("9 al 13 de febrero")
        );
    }

    #[test]
    fn test_no_range() {
        assert_eq!(extract_date_range("Bienvenidos al menú semanal"), None);
        assert_eq!(extract_date_range("del 9 al 13"), None);
    }
}
