use crate::{bounds::Bounds, shapes::Shape};
use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

impl Default for BodyHandle {
    // default to invalid value
    fn default() -> Self {
        Self(u32::MAX)
    }
}

// handles are indices, valid until the next clear
#[derive(Debug, Default)]
pub struct BodyArena {
    bodies: Vec<Body>,
}

impl BodyArena {
    pub fn add(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(body);
        handle
    }

    pub fn iter(&self) -> core::slice::Iter<Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<Body> {
        self.bodies.iter_mut()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn get_body_pair_mut_from_indices(
        &mut self,
        index_a: usize,
        index_b: usize,
    ) -> (&mut Body, &mut Body) {
        match index_a.cmp(&index_b) {
            std::cmp::Ordering::Less => {
                let (head, tail) = self.bodies.split_at_mut(index_b);
                (&mut head[index_a], &mut tail[0])
            }
            std::cmp::Ordering::Greater => {
                let (head, tail) = self.bodies.split_at_mut(index_a);
                (&mut tail[0], &mut head[index_b])
            }
            std::cmp::Ordering::Equal => {
                panic!("get_body_pair_mut called with the same index {}", index_a)
            }
        }
    }

    pub fn get_body_pair_mut(
        &mut self,
        handle_a: BodyHandle,
        handle_b: BodyHandle,
    ) -> (&mut Body, &mut Body) {
        self.get_body_pair_mut_from_indices(handle_a.0 as usize, handle_b.0 as usize)
    }

    pub fn get_body(&self, handle: BodyHandle) -> &Body {
        &self.bodies[handle.0 as usize]
    }

    pub fn trace_bodies(&self, step_num: u64) {
        for (index, body) in self.bodies.iter().enumerate() {
            tracing::trace!(
                step = step_num,
                index,
                pos = %body.position,
                vel = %body.velocity,
                acc = %body.acceleration,
                held = body.held,
                "body"
            );
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub prior_velocity: Vec2,
    pub acceleration: Vec2,
    pub held: bool,
    pub time_remaining: f32,
    pub shape: Shape,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            prior_velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            held: false,
            time_remaining: 0.0,
            shape: Shape::default(),
        }
    }
}

impl Body {
    pub fn radius(&self) -> f32 {
        self.shape.radius()
    }

    pub fn mass(&self) -> f32 {
        self.shape.mass()
    }

    pub fn integrate(&mut self, delta_seconds: f32) {
        self.velocity += self.acceleration * delta_seconds;
        self.position += self.velocity * delta_seconds;
    }

    pub fn clamp_speed(&mut self, rest_speed_sq: f32) {
        if self.velocity.length_squared() < rest_speed_sq {
            self.velocity = Vec2::ZERO;
        }
    }

    pub fn apply_drag(&mut self, gravity: f32) {
        self.acceleration = self.shape.drag_acceleration(self.velocity, gravity);
    }

    pub fn apply_boundary(&mut self, area: &Bounds, restitution: f32) -> bool {
        self.shape
            .constrain(&mut self.position, &mut self.velocity, area, restitution)
    }

    pub fn follow_pointer(&mut self, pointer: Vec2, gain: f32) {
        self.velocity = gain * (pointer - self.position);
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape.contains_point(self.position, point)
    }

    // a hit stops the body and holds it, a miss releases it
    pub fn grab(&mut self, point: Vec2) -> bool {
        self.held = self.contains_point(point);
        if self.held {
            self.velocity = Vec2::ZERO;
        }
        self.held
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()
    }

    // brings a body that blew up back to rest inside the area
    pub fn reset_within(&mut self, area: &Bounds) {
        let centre = (area.mins + area.maxs) * 0.5;
        if !self.position.x.is_finite() {
            self.position.x = centre.x;
        }
        if !self.position.y.is_finite() {
            self.position.y = centre.y;
        }
        let r = Vec2::splat(self.radius());
        self.position = self.position.max(area.mins + r).min(area.maxs - r);
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }
}
