use crate::error::{AcoError, Result};
use crate::topology::{Location, Metric, Topology};
use std::fs;
use std::path::Path;

#[derive(PartialEq, Debug)]
enum ParsingSection {
    Header,
    NodeCoordSection,
}

/// Reads a symmetric TSPLIB instance with 2-D node coordinates.
pub fn parse_tsp_file(file_path: impl AsRef<Path>) -> Result<Topology> {
    let path = file_path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| AcoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tsp_str(&content)
}

pub fn parse_tsp_str(content: &str) -> Result<Topology> {
    let mut name = String::new();
    let mut tsp_type: Option<String> = None;
    let mut dimension = 0;
    let mut edge_weight_type_str = String::new();
    let mut locations: Vec<Location> = Vec::new();

    let mut current_section = ParsingSection::Header;

    for (line_idx, raw_line) in content.lines().enumerate() {
        let current_line_num = line_idx + 1;
        let line = raw_line.trim();

        if line == "EOF" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        if line == "NODE_COORD_SECTION" {
            current_section = ParsingSection::NodeCoordSection;
            continue;
        } else if line == "DISPLAY_DATA_SECTION" || line == "TOUR_SECTION" {
            if current_section == ParsingSection::NodeCoordSection && locations.len() != dimension {
                return Err(AcoError::Parse {
                    line: current_line_num,
                    message: format!(
                        "started '{}' before all node coordinates were read, expected {}, got {}",
                        line,
                        dimension,
                        locations.len()
                    ),
                });
            }
            current_section = ParsingSection::Header;
            continue;
        } else if line == "EDGE_WEIGHT_SECTION" {
            return Err(AcoError::UnsupportedInstance(
                "explicit edge weights are not supported".to_string(),
            ));
        }

        match current_section {
            ParsingSection::Header => {
                let Some((key, value)) = line.split_once(':') else {
                    continue;
                };
                let value = value.trim();
                match key.trim() {
                    "NAME" => name = value.to_string(),
                    "TYPE" => tsp_type = Some(value.to_string()),
                    "DIMENSION" => {
                        dimension = value.parse::<usize>().map_err(|e| AcoError::Parse {
                            line: current_line_num,
                            message: format!("invalid dimension '{}': {}", value, e),
                        })?;
                    }
                    "EDGE_WEIGHT_TYPE" => edge_weight_type_str = value.to_string(),
                    _ => {} // COMMENT, CAPACITY, ...
                }
            }
            ParsingSection::NodeCoordSection => {
                if locations.len() == dimension {
                    return Err(AcoError::Parse {
                        line: current_line_num,
                        message: format!(
                            "unexpected data after all {} node coordinates were read: '{}'",
                            dimension, line
                        ),
                    });
                }
                locations.push(parse_location(line, current_line_num)?);
            }
        }
    }

    if dimension == 0 {
        return Err(AcoError::Parse {
            line: 0,
            message: "DIMENSION not found or is zero".to_string(),
        });
    }

    if let Some(t) = tsp_type.as_deref() {
        if !t.eq_ignore_ascii_case("TSP") {
            return Err(AcoError::UnsupportedInstance(format!(
                "only symmetric TSP instances are supported, got TYPE {}",
                t
            )));
        }
    }

    let metric = match edge_weight_type_str.to_uppercase().as_str() {
        "ATT" => Metric::Att,
        "EUC_2D" => Metric::Euc2D,
        "CEIL_2D" => Metric::Ceil2D,
        "" => {
            return Err(AcoError::Parse {
                line: 0,
                message: "EDGE_WEIGHT_TYPE not found".to_string(),
            });
        }
        s => {
            return Err(AcoError::UnsupportedInstance(format!(
                "edge weight type {} is not supported",
                s
            )));
        }
    };

    if locations.len() != dimension {
        return Err(AcoError::Parse {
            line: 0,
            message: format!(
                "DIMENSION is {} but {} node coordinates were found",
                dimension,
                locations.len()
            ),
        });
    }

    Topology::new(name, metric, locations)
}

fn parse_location(line: &str, line_num: usize) -> Result<Location> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(AcoError::Parse {
            line: line_num,
            message: format!("malformed node coord line (expected id x y): '{}'", line),
        });
    }
    let invalid = |what: &str, token: &str| AcoError::Parse {
        line: line_num,
        message: format!("invalid {} '{}'", what, token),
    };
    let id = parts[0]
        .parse::<usize>()
        .map_err(|_| invalid("node id", parts[0]))?;
    let x = parts[1]
        .parse::<f64>()
        .map_err(|_| invalid("x coord", parts[1]))?;
    let y = parts[2]
        .parse::<f64>()
        .map_err(|_| invalid("y coord", parts[2]))?;
    Ok(Location { id, x, y })
}
