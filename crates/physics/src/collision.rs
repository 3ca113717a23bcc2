//! Sphere overlap tests, static and swept along one step of motion.

use engine_core::Vec3;

/// A fixed-radius bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl CollisionSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Strict overlap: centres closer than the sum of radii. Touching spheres don't count.
    pub fn intersects(&self, other: &CollisionSphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }
}

/// A sphere moved in a straight line from `start` to `end` over one step.
///
/// Fast movers test the whole segment, so a step longer than the target
/// can't carry them through it unseen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweptSphere {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl SweptSphere {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Point on the swept segment nearest to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let step = self.end - self.start;
        let len_sq = step.length_squared();
        if len_sq <= f32::EPSILON {
            return self.start;
        }
        let t = ((point - self.start).dot(step) / len_sq).clamp(0.0, 1.0);
        self.start + step * t
    }
}

/// Anything that can be tested against a [`CollisionSphere`].
pub trait Overlap {
    fn overlaps(&self, other: &CollisionSphere) -> bool;
}

impl Overlap for CollisionSphere {
    fn overlaps(&self, other: &CollisionSphere) -> bool {
        self.intersects(other)
    }
}

impl Overlap for SweptSphere {
    /// Strict, like the static test: grazing the sum of radii doesn't count.
    fn overlaps(&self, other: &CollisionSphere) -> bool {
        let reach = self.radius + other.radius;
        self.closest_point(other.center).distance_squared(other.center) < reach * reach
    }
}

/// Index of the first candidate overlapping `probe`, scanning in order.
///
/// Candidates yielding `None` (destroyed, hidden, ...) are skipped but still
/// consume an index, so the result indexes the caller's original collection.
pub fn first_overlap<P, I>(probe: &P, candidates: I) -> Option<usize>
where
    P: Overlap,
    I: IntoIterator<Item = Option<CollisionSphere>>,
{
    candidates
        .into_iter()
        .enumerate()
        .find_map(|(i, c)| c.filter(|s| probe.overlaps(s)).map(|_| i))
}
