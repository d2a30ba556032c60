use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use rand::Rng;

use crate::config::MetaballConfig;
use crate::util::clamp_or_center;

use super::pointer::PointerSample;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metaball {
    pub position: Vec2,
    pub radius: f32,
    /// Carried for the debug overlay; no force reads it.
    pub strength: f32,
    pub velocity: Vec2,
}

fn random_between(rng: &mut impl Rng, low: f32, high: f32) -> f32 {
    if low < high {
        rng.random_range(low..high)
    } else {
        (low + high) * 0.5
    }
}

impl Metaball {
    pub fn spawn(viewport: Vec2, config: &MetaballConfig, rng: &mut impl Rng) -> Self {
        let speed = random_between(rng, config.min_speed, config.max_speed);
        let angle = rng.random_range(0.0..TAU);
        let margin = config.max_radius;

        Self {
            position: vec2(
                random_between(rng, margin, viewport.x - margin),
                random_between(rng, margin, viewport.y - margin),
            ),
            radius: random_between(rng, config.min_radius, config.max_radius),
            strength: rng.random_range(0.1..1.0),
            velocity: vec2(angle.cos(), angle.sin()) * speed,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    fn integrate(&mut self) {
        self.position += self.velocity;
    }

    pub fn apply_attraction(&mut self, pointer: Vec2, taper: f32, config: &MetaballConfig) {
        if taper <= 0.0 {
            return;
        }

        let offset = pointer - self.position;
        let distance = offset.length();
        if distance < config.attraction_radius {
            let force = (1.0 - distance / config.attraction_radius)
                * config.attraction_strength
                * taper;
            self.velocity += offset * force;
        }
    }

    pub fn bounce_off_walls(&mut self, viewport: Vec2, config: &MetaballConfig) {
        if self.position.x - self.radius < 0.0 || self.position.x + self.radius > viewport.x {
            self.velocity.x *= -config.bounce_decay;
            self.position.x =
                clamp_or_center(self.position.x, self.radius, viewport.x - self.radius);
        }
        if self.position.y - self.radius < 0.0 || self.position.y + self.radius > viewport.y {
            self.velocity.y *= -config.bounce_decay;
            self.position.y =
                clamp_or_center(self.position.y, self.radius, viewport.y - self.radius);
        }
    }

    pub fn ensure_speed(&mut self, config: &MetaballConfig) {
        let speed = self.speed();
        if speed <= f32::EPSILON {
            self.velocity = vec2(config.min_speed, 0.0);
            return;
        }

        if speed < config.min_speed {
            self.velocity *= config.min_speed / speed;
        }

        let ceiling = config.speed_ceiling();
        if speed > ceiling {
            self.velocity *= ceiling / speed;
        }
    }
}

pub fn repel_pair(first: &mut Metaball, second: &mut Metaball, config: &MetaballConfig) {
    let offset = first.position - second.position;
    let distance = offset.length();
    if distance >= config.repulsion_radius {
        return;
    }

    let force = (1.0 - distance / config.repulsion_radius) * config.repulsion_strength;
    let direction = if distance > f32::EPSILON {
        offset / distance
    } else {
        vec2(1.0, 0.0)
    };

    first.velocity += direction * force;
    second.velocity -= direction * force;
}

#[derive(Debug, Default)]
pub struct MetaballSwarm {
    balls: Vec<Metaball>,
}

impl MetaballSwarm {
    pub fn spawn(viewport: Vec2, config: &MetaballConfig, rng: &mut impl Rng) -> Self {
        let balls = (0..config.count)
            .map(|_| Metaball::spawn(viewport, config, rng))
            .collect();
        Self { balls }
    }

    pub fn balls(&self) -> &[Metaball] {
        &self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn update(&mut self, pointer: &PointerSample, viewport: Vec2, config: &MetaballConfig) {
        let taper = pointer.attraction_taper(config.taper_duration_secs);

        for index in 0..self.balls.len() {
            let (head, tail) = self.balls.split_at_mut(index + 1);
            let ball = &mut head[index];

            ball.integrate();
            ball.apply_attraction(pointer.position, taper, config);
            for other in tail.iter_mut() {
                repel_pair(ball, other, config);
            }
            ball.bounce_off_walls(viewport, config);
            ball.ensure_speed(config);
        }
    }
}
