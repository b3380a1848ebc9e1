use crate::body::{Body, BodyHandle};

/// Unordered pair of overlapping bodies, only valid for the substep that produced it.
#[derive(Copy, Clone, Debug)]
pub struct CollisionPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

impl PartialEq for CollisionPair {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for CollisionPair {}

// touching exactly is not overlapping
pub fn circles_overlap(body_a: &Body, body_b: &Body) -> bool {
    let radius_sum = body_a.radius() + body_b.radius();
    body_a.position.distance_squared(body_b.position) < radius_sum * radius_sum
}

/// Tests every pair `(i, j)` with `i < j`, ordered by `i` then `j`.
pub fn broadphase(bodies: &[Body]) -> Vec<CollisionPair> {
    let mut collision_pairs = Vec::new();

    for (i, body_a) in bodies.iter().enumerate() {
        for (j, body_b) in bodies.iter().enumerate().skip(i + 1) {
            if circles_overlap(body_a, body_b) {
                collision_pairs.push(CollisionPair {
                    a: BodyHandle(i as u32),
                    b: BodyHandle(j as u32),
                });
            }
        }
    }

    collision_pairs
}
