use std::collections::HashMap;

use crate::math::Point3;

/// Spatial hash-based point welder.
///
/// Groups points by grid cell and maps every point within `tolerance` of an
/// earlier one onto that earlier point's 0-based index.
pub(super) struct PointWelder {
    cell_size: f64,
    map: HashMap<(i64, i64, i64), Vec<usize>>,
    points: Vec<Point3>,
}

impl PointWelder {
    pub(super) fn new(tolerance: f64) -> Self {
        Self {
            cell_size: tolerance,
            map: HashMap::new(),
            points: Vec::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_key(&self, p: &Point3) -> (i64, i64, i64) {
        let inv = 1.0 / self.cell_size;
        (
            (p.x * inv).floor() as i64,
            (p.y * inv).floor() as i64,
            (p.z * inv).floor() as i64,
        )
    }

    pub(super) fn insert(&mut self, point: &Point3) -> usize {
        let key = self.cell_key(point);

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor = (
                        key.0.saturating_add(dx),
                        key.1.saturating_add(dy),
                        key.2.saturating_add(dz),
                    );
                    if let Some(entries) = self.map.get(&neighbor) {
                        for &index in entries {
                            if (point - &self.points[index]).norm() < self.cell_size {
                                return index;
                            }
                        }
                    }
                }
            }
        }

        let index = self.points.len();
        self.points.push(*point);
        self.map.entry(key).or_default().push(index);
        index
    }

    pub(super) fn into_points(self) -> Vec<Point3> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_share_index() {
        let mut welder = PointWelder::new(1e-9);
        let a = welder.insert(&Point3::new(1.0, 2.0, 3.0));
        let b = welder.insert(&Point3::new(4.0, 5.0, 6.0));
        let c = welder.insert(&Point3::new(1.0, 2.0, 3.0));

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(c, 0);
        assert_eq!(welder.into_points().len(), 2);
    }

    #[test]
    fn points_across_cell_border_merge() {
        let mut welder = PointWelder::new(0.1);
        let a = welder.insert(&Point3::new(0.099, 0.0, 0.0));
        let b = welder.insert(&Point3::new(0.101, 0.0, 0.0));
        assert_eq!(a, b);
    }
}
