use eframe::egui::{Vec2, vec2};

use super::field::{Dot, DotId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl SectorBounds {
    pub const EMPTY: Self = Self {
        min: vec2(f32::INFINITY, f32::INFINITY),
        max: vec2(f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    pub fn is_empty(self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn extend(&mut self, point: Vec2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn distance_sq_to(self, point: Vec2) -> f32 {
        if self.is_empty() {
            return f32::INFINITY;
        }

        let dx = (self.min.x - point.x).max(point.x - self.max.x).max(0.0);
        let dy = (self.min.y - point.y).max(point.y - self.max.y).max(0.0);
        (dx * dx) + (dy * dy)
    }
}

#[derive(Debug)]
pub struct Sector {
    pub dots: Vec<DotId>,
    pub bounds: SectorBounds,
}

#[derive(Debug, Default)]
pub struct SectorGrid {
    sector_size: f32,
    origin: Vec2,
    rows: usize,
    cols: usize,
    sectors: Vec<Sector>,
}

impl SectorGrid {
    pub fn rebuild(&mut self, width: f32, height: f32, dots: &[Dot], sector_size: f32) {
        self.sectors.clear();
        self.sector_size = sector_size.max(1.0);

        let mut extent = SectorBounds::EMPTY;
        extent.extend(Vec2::ZERO);
        extent.extend(vec2(width.max(0.0), height.max(0.0)));
        for dot in dots {
            if dot.position.x.is_finite() && dot.position.y.is_finite() {
                extent.extend(dot.position);
            }
        }

        self.origin = extent.min;
        let span = extent.max - extent.min;
        self.cols = (span.x / self.sector_size).floor() as usize + 1;
        self.rows = (span.y / self.sector_size).floor() as usize + 1;
        self.sectors = (0..self.rows * self.cols)
            .map(|_| Sector {
                dots: Vec::new(),
                bounds: SectorBounds::EMPTY,
            })
            .collect();

        for (index, dot) in dots.iter().enumerate() {
            let Some((row, col)) = self.sector_of(dot.position) else {
                log::trace!("dot {index} at {:?} is outside the sector grid", dot.position);
                continue;
            };
            let sector = &mut self.sectors[row * self.cols + col];
            sector.dots.push(DotId::from_index(index));
            sector.bounds.extend(dot.position);
        }
    }

    pub fn sector_of(&self, point: Vec2) -> Option<(usize, usize)> {
        if !point.x.is_finite() || !point.y.is_finite() || self.sectors.is_empty() {
            return None;
        }

        let local = (point - self.origin) / self.sector_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }

        let col = local.x.floor() as usize;
        let row = local.y.floor() as usize;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    #[cfg(test)]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub(super) fn sectors_mut(&mut self) -> &mut [Sector] {
        &mut self.sectors
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn indexed_dot_count(&self) -> usize {
        self.sectors.iter().map(|sector| sector.dots.len()).sum()
    }
}
