use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub mins: Vec2,
    pub maxs: Vec2,
}

impl Bounds {
    pub fn from_size(size: Vec2) -> Bounds {
        Bounds {
            mins: Vec2::ZERO,
            maxs: size,
        }
    }
}
