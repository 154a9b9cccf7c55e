//! Geometry primitives and shape boundary intersections.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Hexagon outline centered on the origin, flat top and bottom, pointed left and right.
pub fn hexagon_points(width: f64, height: f64) -> [Point; 6] {
    let half_width = width / 2.0;
    let half_height = height / 2.0;
    let inset = half_width - half_height / 2.0;
    [
        point(-inset, -half_height),
        point(inset, -half_height),
        point(half_width, 0.0),
        point(inset, half_height),
        point(-inset, half_height),
        point(-half_width, 0.0),
    ]
}

/// Where the ray from `center` towards `toward` leaves an axis-aligned box.
pub fn intersect_rect(center: Point, width: f64, height: f64, toward: Point) -> Point {
    let d = toward - center;
    if d.x == 0.0 && d.y == 0.0 {
        return center;
    }
    let mut w = width / 2.0;
    let mut h = height / 2.0;
    let (sx, sy) = if d.y.abs() * w > d.x.abs() * h {
        if d.y < 0.0 {
            h = -h;
        }
        (h * d.x / d.y, h)
    } else {
        if d.x < 0.0 {
            w = -w;
        }
        (w, w * d.y / d.x)
    };
    center + vector(sx, sy)
}

pub fn intersect_circle(center: Point, radius: f64, toward: Point) -> Point {
    let d = toward - center;
    let len = d.length();
    if len == 0.0 {
        return center;
    }
    center + d * (radius / len)
}

/// Nearest crossing of the ray `center -> toward` with a closed polygon given relative to
/// `center`. Falls back to `center` when the ray misses (degenerate polygons).
pub fn intersect_polygon(center: Point, polygon: &[Point], toward: Point) -> Point {
    let d = toward - center;
    if (d.x == 0.0 && d.y == 0.0) || polygon.len() < 2 {
        return center;
    }

    let mut best: Option<f64> = None;
    for i in 0..polygon.len() {
        let a = polygon[i].to_vector();
        let b = polygon[(i + 1) % polygon.len()].to_vector();
        let e = b - a;
        let denom = d.cross(e);
        if denom.abs() < 1e-12 {
            continue;
        }
        // Solve t*d = a + s*e in polygon-local coordinates.
        let t = a.cross(e) / denom;
        let s = a.cross(d) / denom;
        if t > 0.0 && (0.0..=1.0).contains(&s) {
            best = Some(best.map_or(t, |cur| cur.min(t)));
        }
    }
    match best {
        Some(t) => center + d * t,
        None => center,
    }
}
