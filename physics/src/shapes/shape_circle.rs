use super::ShapeTrait;
use crate::bounds::Bounds;
use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeCircle {
    pub radius: f32,
}

impl ShapeCircle {
    pub const DRAG_COEFFICIENT: f32 = 0.00008;
}

impl ShapeTrait for ShapeCircle {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn mass(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    fn drag_acceleration(&self, velocity: Vec2, gravity: f32) -> Vec2 {
        // quadratic drag, scaled by the square root of the radius and opposing the motion
        let k = Self::DRAG_COEFFICIENT * self.radius.sqrt();
        let drag = k * velocity * velocity;
        Vec2::new(
            if velocity.x > 0.0 { -drag.x } else { drag.x },
            if velocity.y > 0.0 {
                gravity - drag.y
            } else {
                gravity + drag.y
            },
        )
    }

    fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        position.distance_squared(point) < self.radius * self.radius
    }

    fn constrain(
        &self,
        position: &mut Vec2,
        velocity: &mut Vec2,
        area: &Bounds,
        restitution: f32,
    ) -> bool {
        let r = self.radius;
        if position.x - r < area.mins.x {
            position.x = area.mins.x + r;
            velocity.x *= -restitution;
        } else if position.x + r > area.maxs.x {
            position.x = area.maxs.x - r;
            velocity.x *= -restitution;
        } else if position.y - r < area.mins.y {
            position.y = area.mins.y + r;
            velocity.y *= -restitution;
        } else if position.y + r > area.maxs.y {
            position.y = area.maxs.y - r;
            velocity.y *= -restitution;
        } else {
            return false;
        }
        true
    }
}
