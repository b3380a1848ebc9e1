mod shape_circle;

use crate::bounds::Bounds;
use glam::Vec2;

pub use shape_circle::ShapeCircle;

// smallest radius a circle is built with, keeps the mass strictly positive
pub const MIN_RADIUS: f32 = 0.5;

pub trait ShapeTrait {
    fn radius(&self) -> f32;
    fn mass(&self) -> f32;
    fn drag_acceleration(&self, velocity: Vec2, gravity: f32) -> Vec2;
    fn contains_point(&self, position: Vec2, point: Vec2) -> bool;
    // corrects at most one edge per call, left, right, top then bottom
    fn constrain(
        &self,
        position: &mut Vec2,
        velocity: &mut Vec2,
        area: &Bounds,
        restitution: f32,
    ) -> bool;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle(ShapeCircle),
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::Circle(ShapeCircle { radius: 1.0 })
    }
}

impl Shape {
    pub fn make_circle(radius: f32) -> Self {
        let radius = if radius.is_finite() && radius >= MIN_RADIUS {
            radius
        } else {
            MIN_RADIUS
        };
        Shape::Circle(ShapeCircle { radius })
    }

    fn shape_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Circle(data) => data,
        }
    }

    pub fn radius(&self) -> f32 {
        self.shape_trait().radius()
    }

    pub fn mass(&self) -> f32 {
        self.shape_trait().mass()
    }

    pub fn drag_acceleration(&self, velocity: Vec2, gravity: f32) -> Vec2 {
        self.shape_trait().drag_acceleration(velocity, gravity)
    }

    pub fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        self.shape_trait().contains_point(position, point)
    }

    pub fn constrain(
        &self,
        position: &mut Vec2,
        velocity: &mut Vec2,
        area: &Bounds,
        restitution: f32,
    ) -> bool {
        self.shape_trait()
            .constrain(position, velocity, area, restitution)
    }
}
