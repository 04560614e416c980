use super::{Point3, Vector3, TOLERANCE};

/// Six times the signed volume of the tetrahedron `(a, b, c, d)`.
///
/// Positive when `d` lies behind triangle `(a, b, c)`, i.e. opposite the
/// direction of its counter-clockwise normal.
#[must_use]
pub fn orient_3d(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> f64 {
    let ad = a - d;
    let bd = b - d;
    let cd = c - d;
    ad.dot(&bd.cross(&cd))
}

/// Signed volume of the tetrahedron `(a, b, c, d)`.
#[must_use]
pub fn signed_volume(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> f64 {
    orient_3d(a, b, c, d) / 6.0
}

/// Circumradius of the tetrahedron `(a, b, c, d)`.
///
/// Returns `None` for (near) zero-volume tetrahedra.
#[must_use]
pub fn circumradius(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> Option<f64> {
    let u = b - a;
    let v = c - a;
    let w = d - a;

    let denom = 2.0 * u.dot(&v.cross(&w));
    if denom.abs() < TOLERANCE {
        return None;
    }

    let center: Vector3 = (v.cross(&w) * u.norm_squared()
        + w.cross(&u) * v.norm_squared()
        + u.cross(&v) * w.norm_squared())
        / denom;
    Some(center.norm())
}

/// Ratio of circumradius to shortest edge length.
///
/// This is the shape measure bounded by quality refinement; a regular
/// tetrahedron scores about 0.612.
#[must_use]
pub fn radius_edge_ratio(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> Option<f64> {
    let radius = circumradius(a, b, c, d)?;
    let shortest = [b - a, c - a, d - a, c - b, d - b, d - c]
        .iter()
        .map(Vector3::norm)
        .fold(f64::INFINITY, f64::min);

    if shortest < TOLERANCE {
        return None;
    }
    Some(radius / shortest)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn unit_corner_volume() {
        let v = signed_volume(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
            &p(0.0, 0.0, 1.0),
        );
        assert_relative_eq!(v.abs(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn orientation_flips_with_apex_side() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        let above = orient_3d(&a, &b, &c, &p(0.0, 0.0, 1.0));
        let below = orient_3d(&a, &b, &c, &p(0.0, 0.0, -1.0));
        assert!(above * below < 0.0);
    }

    #[test]
    fn regular_tetrahedron_ratio() {
        let a = p(1.0, 1.0, 1.0);
        let b = p(1.0, -1.0, -1.0);
        let c = p(-1.0, 1.0, -1.0);
        let d = p(-1.0, -1.0, 1.0);
        let ratio = radius_edge_ratio(&a, &b, &c, &d).unwrap();
        assert_relative_eq!(ratio, (6.0_f64).sqrt() / 4.0, epsilon = 1e-9);
    }

    #[test]
    fn flat_tetrahedron_has_no_circumradius() {
        let r = circumradius(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
            &p(1.0, 1.0, 0.0),
        );
        assert!(r.is_none());
    }
}
