use crate::{
    body::{Body, BodyArena, BodyHandle},
    bounds::Bounds,
    broadphase::broadphase,
    config::{ConfigError, SimulationConfig},
    contact::{resolve_contact, ContactArena},
    shapes::{Shape, MIN_RADIUS},
};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub struct PhysicsScene {
    bodies: BodyArena,
    contacts: ContactArena,
    config: SimulationConfig,
    world_bounds: Bounds,
    rng: Pcg32,
    pointer: Vec2,
    step_num: u64,
}

impl PhysicsScene {
    pub fn new(config: SimulationConfig) -> Self {
        debug_assert!(config.validate().is_ok());
        PhysicsScene {
            bodies: BodyArena::default(),
            contacts: ContactArena::default(),
            world_bounds: config.world_bounds(),
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            pointer: Vec2::ZERO,
            step_num: 0,
        }
    }

    pub fn try_new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn spawn(&mut self, position: Vec2, velocity: Vec2, radius: f32) -> BodyHandle {
        let radius = if radius.is_finite() && radius >= MIN_RADIUS {
            radius
        } else {
            tracing::warn!(radius, "spawn radius out of range, using {}", MIN_RADIUS);
            MIN_RADIUS
        };
        let handle = self.bodies.add(Body {
            position,
            velocity,
            acceleration: Vec2::new(0.0, self.config.gravity),
            shape: Shape::make_circle(radius),
            ..Body::default()
        });
        tracing::debug!(handle = handle.0, pos = %position, radius, "spawned body");
        handle
    }

    // handles handed out before are invalid afterwards
    pub fn clear(&mut self) {
        tracing::debug!(count = self.bodies.len(), "clearing bodies");
        self.bodies.clear();
        self.contacts.clear();
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    // only bodies that aren't already held are hit tested
    pub fn press_pointer(&mut self, pointer: Vec2) -> usize {
        self.pointer = pointer;
        for body in self.bodies.iter_mut().filter(|body| !body.held) {
            body.grab(pointer);
        }
        self.bodies.iter().filter(|body| body.held).count()
    }

    pub fn release_pointer(&mut self) {
        for body in self.bodies.iter_mut() {
            body.release();
        }
    }

    pub fn update(&mut self, frame_seconds: f32) {
        self.contacts.clear();

        if !(frame_seconds.is_finite() && frame_seconds >= 0.0) {
            tracing::warn!(frame_seconds, "ignoring invalid frame time");
            return;
        }

        let substeps = self.config.substeps.max(1);
        let delta_seconds = frame_seconds / substeps as f32;
        for _ in 0..substeps {
            self.substep(delta_seconds);
        }

        if tracing::enabled!(tracing::Level::TRACE) {
            self.bodies.trace_bodies(self.step_num);
        }
    }

    pub fn substep(&mut self, delta_seconds: f32) {
        self.step_num += 1;

        let collision_pairs = broadphase(self.bodies.as_slice());
        for pair in &collision_pairs {
            let rng = &mut self.rng;
            let contact = resolve_contact(&mut self.bodies, pair, || {
                Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU))
            });
            self.contacts.push(contact);
        }

        let gravity = self.config.gravity;
        let restitution = self.config.restitution;
        let rest_speed_sq = self.config.rest_speed_sq;
        let follow_gain = self.config.follow_gain;
        for body in self.bodies.iter_mut() {
            body.apply_drag(gravity);
            body.apply_boundary(&self.world_bounds, restitution);
            body.integrate(delta_seconds);
            body.clamp_speed(rest_speed_sq);

            if body.held {
                body.follow_pointer(self.pointer, follow_gain);
            }

            if !body.is_finite() {
                tracing::warn!(
                    pos = %body.position,
                    vel = %body.velocity,
                    "body state diverged, resetting to rest"
                );
                body.reset_within(&self.world_bounds);
            }
        }

        tracing::trace!(
            step = self.step_num,
            bodies = self.bodies.len(),
            contacts = collision_pairs.len(),
            "substep"
        );
    }

    pub fn get_body(&self, handle: BodyHandle) -> &Body {
        self.bodies.get_body(handle)
    }

    pub fn bodies(&self) -> core::slice::Iter<Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn contacts(&self) -> &ContactArena {
        &self.contacts
    }

    pub fn step_num(&self) -> u64 {
        self.step_num
    }
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
