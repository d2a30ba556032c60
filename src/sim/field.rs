use eframe::egui::{Vec2, vec2};

use crate::config::GridConfig;
use crate::util::sigmoid;

use super::pointer::PointerSample;
use super::sectors::{SectorBounds, SectorGrid};

/// Stable handle into the dot arena. Handles are invalidated wholesale when the field is rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DotId(u32);

impl DotId {
    pub(super) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub position: Vec2,
    pub home: Vec2,
    pub velocity: Vec2,
}

impl Dot {
    fn at_rest(home: Vec2) -> Self {
        Self {
            position: home,
            home,
            velocity: Vec2::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct FieldForcing {
    pointer: Vec2,
    velocity: Vec2,
    normalized_speed: f32,
}

impl FieldForcing {
    fn from_pointer(pointer: &PointerSample, config: &GridConfig) -> Self {
        let speed = pointer.delta.length();
        let normalized_speed = sigmoid(speed / config.max_mouse_effect);
        Self {
            pointer: pointer.position,
            velocity: pointer.delta * normalized_speed,
            normalized_speed,
        }
    }

    fn is_active(&self) -> bool {
        self.velocity != Vec2::ZERO
    }
}

#[derive(Debug, Default)]
pub struct GridField {
    dots: Vec<Dot>,
    cols: usize,
    rows: usize,
}

impl GridField {
    pub fn create(width: f32, height: f32, config: &GridConfig) -> Self {
        let spacing = config.grid_size;
        let cols = (width.max(0.0) / spacing).ceil() as usize + 2;
        let rows = (height.max(0.0) / spacing).ceil() as usize + 2;

        let mut dots = Vec::with_capacity(cols * rows);
        for col in 0..cols {
            for row in 0..rows {
                let home = vec2(
                    -spacing + col as f32 * spacing,
                    -spacing + row as f32 * spacing,
                );
                dots.push(Dot::at_rest(home));
            }
        }

        Self { dots, cols, rows }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn dot(&self, id: DotId) -> Option<&Dot> {
        self.dots.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn nearest_dot(&self, point: Vec2) -> Option<DotId> {
        let mut nearest = None;
        let mut nearest_distance_sq = f32::INFINITY;
        for (index, dot) in self.dots.iter().enumerate() {
            let distance_sq = (dot.position - point).length_sq();
            if distance_sq < nearest_distance_sq {
                nearest_distance_sq = distance_sq;
                nearest = Some(DotId::from_index(index));
            }
        }
        nearest
    }

    pub fn update(&mut self, sectors: &mut SectorGrid, pointer: &PointerSample, config: &GridConfig) {
        let forcing = FieldForcing::from_pointer(pointer, config);
        let radius_sq = config.mouse_influence_radius * config.mouse_influence_radius;

        for sector in sectors.sectors_mut() {
            let in_reach =
                forcing.is_active() && sector.bounds.distance_sq_to(forcing.pointer) < radius_sq;

            let mut bounds = SectorBounds::EMPTY;
            for &id in &sector.dots {
                let Some(dot) = self.dots.get_mut(id.index()) else {
                    continue;
                };
                step_dot(dot, &forcing, in_reach, config);
                bounds.extend(dot.position);
            }
            sector.bounds = bounds;
        }
    }

    #[cfg(test)]
    fn update_exhaustive(&mut self, pointer: &PointerSample, config: &GridConfig) {
        let forcing = FieldForcing::from_pointer(pointer, config);
        for dot in &mut self.dots {
            step_dot(dot, &forcing, true, config);
        }
    }

    #[cfg(test)]
    pub(super) fn dot_mut(&mut self, id: DotId) -> Option<&mut Dot> {
        self.dots.get_mut(id.index())
    }
}

fn step_dot(dot: &mut Dot, forcing: &FieldForcing, in_reach: bool, config: &GridConfig) {
    let mut field_force = Vec2::ZERO;

    if in_reach {
        let distance = (dot.position - forcing.pointer).length();
        if distance < config.mouse_influence_radius {
            let effect = (1.0 - distance / config.mouse_influence_radius)
                * forcing.normalized_speed
                * config.max_mouse_effect;
            field_force += forcing.velocity * effect;
        }
    }

    dot.velocity += field_force + (dot.home - dot.position) * config.easing;

    // Cubic response: large displacements move fast, small jitter barely registers.
    let step = dot.velocity * config.easing;
    dot.position += vec2(step.x.powi(3), step.y.powi(3));

    dot.velocity *= config.velocity_damping;
}
