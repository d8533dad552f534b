use crate::error::{AcoError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Reads a `name : length` table of known optimal tour lengths.
pub fn load_known_optima(file_path: impl AsRef<Path>) -> Result<HashMap<String, f64>> {
    let path = file_path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| AcoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_known_optima(&content)
}

/// Keys are lowercased instance names; anything after the first token on
/// either side of the colon is ignored, so `att48 : 10628 (optimal)` works.
pub fn parse_known_optima(content: &str) -> Result<HashMap<String, f64>> {
    let mut solutions = HashMap::new();

    for (line_idx, line) in content.lines().enumerate() {
        let Some((name_part, value_part)) = line.split_once(':') else {
            continue;
        };
        let Some(clean_name) = name_part.split_whitespace().next() else {
            continue;
        };
        let value_str = value_part.split_whitespace().next().unwrap_or_default();

        let value = value_str.parse::<f64>().map_err(|e| AcoError::Parse {
            line: line_idx + 1,
            message: format!("invalid optimum for {} ('{}'): {}", clean_name, value_str, e),
        })?;
        solutions.insert(clean_name.to_lowercase(), value);
    }
    Ok(solutions)
}

/// Known optimum for `problem_name` and the percentage by which
/// `found_length` exceeds it.
pub fn optimality_gap(
    problem_name: &str,
    found_length: f64,
    known_optima: &HashMap<String, f64>,
) -> Option<(f64, f64)> {
    let optimal_length = *known_optima.get(&problem_name.to_lowercase())?;
    let percentage_diff = if optimal_length == 0.0 {
        if found_length == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        ((found_length - optimal_length) / optimal_length) * 100.0
    };
    Some((optimal_length, percentage_diff))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_optima_table() {
        let table = "att48 : 10628\nBerlin52 : 7542 (opt)\n\nnot a row\n";
        let optima = parse_known_optima(table).unwrap();
        assert_eq!(optima.len(), 2);
        assert_eq!(optima["att48"], 10628.0);
        assert_eq!(optima["berlin52"], 7542.0);
    }

    #[test]
    fn rejects_non_numeric_optimum() {
        assert!(matches!(
            parse_known_optima("att48 : 10628\neil51 : ???\n"),
            Err(AcoError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn gap_against_known_optimum() {
        let optima = parse_known_optima("att48 : 10628").unwrap();
        let (opt, gap) = optimality_gap("ATT48", 10628.0 * 1.05, &optima).unwrap();
        assert_eq!(opt, 10628.0);
        assert!((gap - 5.0).abs() < 1e-9);
        assert!(optimality_gap("kroA100", 1.0, &optima).is_none());
    }

    #[test]
    fn loads_optima_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "att48 : 10628").unwrap();
        let optima = load_known_optima(file.path()).unwrap();
        assert_eq!(optima["att48"], 10628.0);
    }
}
