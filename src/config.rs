use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    pub grid: GridConfig,
    pub metaballs: MetaballConfig,
    pub constellation: ConstellationConfig,
    pub palette: Palette,
    pub debug: bool,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub grid_size: f32,
    pub dot_size: f32,
    pub mouse_influence_radius: f32,
    pub easing: f32,
    pub velocity_damping: f32,
    pub max_mouse_effect: f32,
    pub visible_height_percentage: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 25.0,
            dot_size: 2.0,
            mouse_influence_radius: 300.0,
            easing: 0.1,
            velocity_damping: 0.95,
            max_mouse_effect: 0.15,
            visible_height_percentage: 80.0,
        }
    }
}

impl GridConfig {
    pub fn sector_size(&self) -> f32 {
        self.mouse_influence_radius * 2.0
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaballConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub overspeed_factor: f32,
    pub bounce_decay: f32,
    pub attraction_radius: f32,
    pub attraction_strength: f32,
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    pub taper_duration_secs: f64,
}

impl Default for MetaballConfig {
    fn default() -> Self {
        Self {
            count: 3,
            min_radius: 50.0,
            max_radius: 200.0,
            min_speed: 2.0,
            max_speed: 4.0,
            overspeed_factor: 1.5,
            bounce_decay: 0.9,
            attraction_radius: 1000.0,
            attraction_strength: 0.03,
            repulsion_radius: 200.0,
            repulsion_strength: 0.02,
            taper_duration_secs: 10.0,
        }
    }
}

impl MetaballConfig {
    pub fn speed_ceiling(&self) -> f32 {
        self.max_speed * self.overspeed_factor
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstellationConfig {
    pub max_nodes: usize,
    pub node_add_chance: f64,
    pub max_highlight_radius: f32,
    pub max_opacity: f32,
    pub influence_radius: f32,
    pub prune_margin: f32,
    pub ease_factor: f32,
    pub max_line_width: f32,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            max_nodes: 60,
            node_add_chance: 0.1,
            max_highlight_radius: 6.0,
            max_opacity: 40.0,
            influence_radius: 300.0,
            prune_margin: 1.2,
            ease_factor: 0.1,
            max_line_width: 2.0,
        }
    }
}

impl ConstellationConfig {
    pub fn prune_radius(&self) -> f32 {
        self.influence_radius * self.prune_margin
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub background: [u8; 3],
    pub dot: [u8; 4],
    pub highlight: [u8; 3],
    pub debug: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [22, 23, 40],
            dot: [56, 60, 70, 255],
            highlight: [255, 255, 255],
            debug: [255, 0, 0],
        }
    }
}

impl BackdropConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if !(grid.grid_size > 0.0) {
            bail!("grid.grid_size must be positive, got {}", grid.grid_size);
        }
        if !(grid.mouse_influence_radius > 0.0) {
            bail!(
                "grid.mouse_influence_radius must be positive, got {}",
                grid.mouse_influence_radius
            );
        }
        if !(grid.velocity_damping > 0.0 && grid.velocity_damping <= 1.0) {
            bail!(
                "grid.velocity_damping must be in (0, 1], got {}",
                grid.velocity_damping
            );
        }
        if !(grid.max_mouse_effect > 0.0) {
            bail!("grid.max_mouse_effect must be positive");
        }
        if !(grid.visible_height_percentage > 0.0 && grid.visible_height_percentage <= 100.0) {
            bail!(
                "grid.visible_height_percentage must be in (0, 100], got {}",
                grid.visible_height_percentage
            );
        }

        let balls = &self.metaballs;
        if balls.min_radius > balls.max_radius {
            bail!(
                "metaballs.min_radius ({}) exceeds max_radius ({})",
                balls.min_radius,
                balls.max_radius
            );
        }
        if !(balls.min_speed > 0.0) || balls.min_speed > balls.max_speed {
            bail!(
                "metaballs speed bounds must satisfy 0 < min_speed <= max_speed, got {}..{}",
                balls.min_speed,
                balls.max_speed
            );
        }
        if balls.overspeed_factor < 1.0 {
            bail!("metaballs.overspeed_factor must be at least 1");
        }
        if !(balls.attraction_radius > 0.0 && balls.repulsion_radius > 0.0) {
            bail!("metaballs attraction and repulsion radii must be positive");
        }
        if !(balls.taper_duration_secs > 0.0) {
            bail!("metaballs.taper_duration_secs must be positive");
        }

        let constellation = &self.constellation;
        if !(0.0..=1.0).contains(&constellation.node_add_chance) {
            bail!(
                "constellation.node_add_chance must be in [0, 1], got {}",
                constellation.node_add_chance
            );
        }
        if !(constellation.influence_radius > 0.0) {
            bail!("constellation.influence_radius must be positive");
        }
        if constellation.prune_margin < 1.0 {
            bail!("constellation.prune_margin must be at least 1");
        }
        if !(constellation.ease_factor > 0.0 && constellation.ease_factor <= 1.0) {
            bail!("constellation.ease_factor must be in (0, 1]");
        }

        Ok(())
    }
}
