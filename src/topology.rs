use crate::error::{AcoError, Result};

/// Pseudo-Euclidean distance used by the `att` instances of TSPLIB.
///
/// The rounded value is bumped by one whenever rounding went down, so the
/// result is never shorter than the scaled Euclidean distance.
fn calc_att_dist(n1: &Location, n2: &Location) -> f64 {
    let dx = n1.x - n2.x;
    let dy = n1.y - n2.y;
    let rij = ((dx * dx + dy * dy) / 10.0).sqrt();
    let tij = rij.round();
    if tij < rij { tij + 1.0 } else { tij }
}

fn calc_euc_2d_dist(n1: &Location, n2: &Location) -> f64 {
    let dx = n1.x - n2.x;
    let dy = n1.y - n2.y;
    (dx * dx + dy * dy).sqrt().round()
}

fn calc_ceil_2d_dist(n1: &Location, n2: &Location) -> f64 {
    let dx = n1.x - n2.x;
    let dy = n1.y - n2.y;
    (dx * dx + dy * dy).sqrt().ceil()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Att, // att48
    Euc2D,  // berlin52
    Ceil2D, // dsj1000
}

impl Metric {
    pub fn distance(self, n1: &Location, n2: &Location) -> f64 {
        match self {
            Metric::Att => calc_att_dist(n1, n2),
            Metric::Euc2D => calc_euc_2d_dist(n1, n2),
            Metric::Ceil2D => calc_ceil_2d_dist(n1, n2),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Att => "ATT",
            Metric::Euc2D => "EUC_2D",
            Metric::Ceil2D => "CEIL_2D",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

/// Immutable set of locations with a precomputed distance table.
///
/// Locations are addressed by position `id - 1`; the table is a flat row-major
/// `dimension * dimension` buffer.
#[derive(Debug, Clone)]
pub struct Topology {
    name: String,
    metric: Metric,
    locations: Vec<Location>,
    distances: Vec<f64>,
}

impl Topology {
    pub fn new(
        name: impl Into<String>,
        metric: Metric,
        mut locations: Vec<Location>,
    ) -> Result<Self> {
        let dimension = locations.len();
        if dimension < 2 {
            return Err(AcoError::InvalidTopology(format!(
                "at least 2 locations are required, got {}",
                dimension
            )));
        }

        locations.sort_by_key(|location| location.id);
        for (idx, location) in locations.iter().enumerate() {
            if location.id != idx + 1 {
                return Err(AcoError::InvalidTopology(format!(
                    "location ids must be exactly 1..={}, found id {} at position {}",
                    dimension,
                    location.id,
                    idx + 1
                )));
            }
            if !location.x.is_finite() || !location.y.is_finite() {
                return Err(AcoError::InvalidTopology(format!(
                    "location {} has a non-finite coordinate ({}, {})",
                    location.id, location.x, location.y
                )));
            }
        }

        let mut distances = vec![0.0; dimension * dimension];
        for i in 0..dimension {
            for j in (i + 1)..dimension {
                let d = metric.distance(&locations[i], &locations[j]);
                if d <= 0.0 {
                    return Err(AcoError::InvalidTopology(format!(
                        "locations {} and {} are {} apart under {}",
                        locations[i].id,
                        locations[j].id,
                        d,
                        metric.as_str()
                    )));
                }
                distances[i * dimension + j] = d;
                distances[j * dimension + i] = d;
            }
        }

        Ok(Topology {
            name: name.into(),
            metric,
            locations,
            distances,
        })
    }

    /// Builds a topology whose ids follow the order of `coords`, starting at 1.
    pub fn from_coords(
        name: impl Into<String>,
        metric: Metric,
        coords: &[(f64, f64)],
    ) -> Result<Self> {
        let locations = coords
            .iter()
            .enumerate()
            .map(|(idx, &(x, y))| Location { id: idx + 1, x, y })
            .collect();
        Topology::new(name, metric, locations)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn dimension(&self) -> usize {
        self.locations.len()
    }

    pub fn location(&self, idx: usize) -> &Location {
        &self.locations[idx]
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn distance(&self, from_idx: usize, to_idx: usize) -> f64 {
        self.distances[from_idx * self.locations.len() + to_idx]
    }

    /// Length of the closed tour through `path`, including the edge back home.
    pub fn tour_length(&self, path: &[usize]) -> f64 {
        if path.len() < 2 {
            return 0.0;
        }
        let closing = self.distance(path[path.len() - 1], path[0]);
        path.windows(2)
            .map(|edge| self.distance(edge[0], edge[1]))
            .sum::<f64>()
            + closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: usize, x: f64, y: f64) -> Location {
        Location { id, x, y }
    }

    #[test]
    fn att_rounds_up_when_nearest_integer_is_short() {
        // r = sqrt(10) ~ 3.162, nint gives 3 which is below r
        assert_eq!(Metric::Att.distance(&loc(1, 0.0, 0.0), &loc(2, 0.0, 10.0)), 4.0);
        // r = sqrt(20) ~ 4.472
        assert_eq!(Metric::Att.distance(&loc(1, 0.0, 0.0), &loc(2, 10.0, 10.0)), 5.0);
    }

    #[test]
    fn att_keeps_nearest_integer_when_not_short() {
        // r ~ 1494.70 rounds up to 1495
        let d = Metric::Att.distance(&loc(1, 6734.0, 1453.0), &loc(2, 2233.0, 10.0));
        assert_eq!(d, 1495.0);
        // r is exactly 10
        assert_eq!(Metric::Att.distance(&loc(1, 0.0, 0.0), &loc(2, 10.0, 30.0)), 10.0);
        // r ~ 0.949
        assert_eq!(Metric::Att.distance(&loc(1, 0.0, 0.0), &loc(2, 3.0, 0.0)), 1.0);
    }

    #[test]
    fn euclidean_metrics() {
        let a = loc(1, 0.0, 0.0);
        let b = loc(2, 3.0, 4.0);
        let c = loc(3, 1.0, 1.0);
        assert_eq!(Metric::Euc2D.distance(&a, &b), 5.0);
        assert_eq!(Metric::Euc2D.distance(&a, &c), 1.0);
        assert_eq!(Metric::Ceil2D.distance(&a, &c), 2.0);
    }

    #[test]
    fn distance_table_is_symmetric_with_zero_diagonal() {
        let topology = Topology::from_coords(
            "tri",
            Metric::Att,
            &[(0.0, 0.0), (30.0, 0.0), (30.0, 40.0)],
        )
        .unwrap();
        for i in 0..3 {
            assert_eq!(topology.distance(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(topology.distance(i, j), topology.distance(j, i));
            }
        }
    }

    #[test]
    fn locations_are_sorted_by_id() {
        let topology = Topology::new(
            "shuffled",
            Metric::Att,
            vec![loc(2, 10.0, 0.0), loc(1, 0.0, 0.0), loc(3, 0.0, 10.0)],
        )
        .unwrap();
        let ids: Vec<usize> = topology.locations().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(topology.location(1).x, 10.0);
        assert_eq!(topology.dimension(), 3);
    }

    #[test]
    fn tour_length_closes_the_loop() {
        let topology = Topology::from_coords(
            "square",
            Metric::Att,
            &[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)],
        )
        .unwrap();
        assert_eq!(topology.tour_length(&[0, 1, 2, 3]), 16.0);
        assert_eq!(topology.tour_length(&[0, 2, 1, 3]), 18.0);
    }

    #[test]
    fn rejects_degenerate_topologies() {
        assert!(matches!(
            Topology::from_coords("one", Metric::Att, &[(0.0, 0.0)]),
            Err(AcoError::InvalidTopology(_))
        ));
        assert!(matches!(
            Topology::from_coords("dup", Metric::Att, &[(1.0, 1.0), (1.0, 1.0)]),
            Err(AcoError::InvalidTopology(_))
        ));
        assert!(matches!(
            Topology::new("gap", Metric::Att, vec![loc(1, 0.0, 0.0), loc(3, 5.0, 5.0)]),
            Err(AcoError::InvalidTopology(_))
        ));
        assert!(matches!(
            Topology::from_coords("nan", Metric::Att, &[(0.0, 0.0), (f64::NAN, 1.0)]),
            Err(AcoError::InvalidTopology(_))
        ));
    }
}
