use crate::{
    body::{BodyArena, BodyHandle},
    broadphase::CollisionPair,
};
use glam::Vec2;

#[derive(Copy, Clone, Debug)]
pub struct Contact {
    pub point_a: Vec2,
    pub point_b: Vec2,
    // from a to b
    pub normal: Vec2,
    pub depth: f32,

    pub handle_a: BodyHandle,
    pub handle_b: BodyHandle,
}

#[derive(Debug, Default)]
pub struct ContactArena {
    contacts: Vec<Contact>,
}

impl ContactArena {
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn push(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    pub fn iter(&self) -> core::slice::Iter<Contact> {
        self.contacts.iter()
    }
}

/// Pushes each body out by half the overlap, then applies an elastic impulse along the normal.
/// `fallback_normal` must return a unit vector and is only called for coincident centres.
pub fn resolve_contact<F>(
    bodies: &mut BodyArena,
    pair: &CollisionPair,
    fallback_normal: F,
) -> Contact
where
    F: FnOnce() -> Vec2,
{
    let (body_a, body_b) = bodies.get_body_pair_mut(pair.a, pair.b);

    let ab = body_b.position - body_a.position;
    let distance = ab.length();
    let (normal, distance) = if distance > f32::EPSILON {
        (ab / distance, distance)
    } else {
        tracing::warn!(
            a = pair.a.0,
            b = pair.b.0,
            pos = %body_a.position,
            "coincident bodies, separating along a random axis"
        );
        (fallback_normal(), 0.0)
    };

    let depth = 0.5 * (body_a.radius() + body_b.radius() - distance);
    body_a.position -= normal * depth;
    body_b.position += normal * depth;

    let m_a = body_a.mass();
    let m_b = body_b.mass();
    let p = 2.0 * normal.dot(body_a.velocity - body_b.velocity) / (m_a + m_b);
    body_a.velocity -= p * m_b * normal;
    body_b.velocity += p * m_a * normal;

    Contact {
        point_a: body_a.position,
        point_b: body_b.position,
        normal,
        depth,
        handle_a: pair.a,
        handle_b: pair.b,
    }
}
