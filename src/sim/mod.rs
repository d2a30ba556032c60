mod constellation;
mod field;
mod metaballs;
mod pointer;
mod sectors;

use eframe::egui::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::BackdropConfig;

pub use constellation::{HighlightLine, HighlightNode};
pub use pointer::PointerSample;

use constellation::Constellation;
use field::GridField;
use metaballs::{Metaball, MetaballSwarm};
use pointer::PointerTracker;
use sectors::SectorGrid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub dots: usize,
    pub metaballs: usize,
    pub nodes: usize,
    pub lines: usize,
}

pub struct Simulation {
    config: BackdropConfig,
    viewport: Vec2,
    field: GridField,
    sectors: SectorGrid,
    swarm: MetaballSwarm,
    constellations: Vec<Constellation>,
    pointer: PointerTracker,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: BackdropConfig, viewport: Vec2) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(config, viewport, rng)
    }

    pub fn with_rng(config: BackdropConfig, viewport: Vec2, mut rng: StdRng) -> Self {
        let field = GridField::create(viewport.x, viewport.y, &config.grid);
        let mut sectors = SectorGrid::default();
        sectors.rebuild(viewport.x, viewport.y, field.dots(), config.grid.sector_size());
        let swarm = MetaballSwarm::spawn(viewport, &config.metaballs, &mut rng);
        let constellations = (0..swarm.len()).map(Constellation::new).collect();

        log::info!(
            "backdrop set up at {}x{}: {} dots in {}x{} sectors, {} metaballs",
            viewport.x,
            viewport.y,
            sectors.indexed_dot_count(),
            sectors.cols(),
            sectors.rows(),
            swarm.len()
        );

        Self {
            config,
            viewport,
            field,
            sectors,
            swarm,
            constellations,
            pointer: PointerTracker::default(),
            rng,
        }
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.field = GridField::create(viewport.x, viewport.y, &self.config.grid);
        self.sectors.rebuild(
            viewport.x,
            viewport.y,
            self.field.dots(),
            self.config.grid.sector_size(),
        );

        for constellation in &mut self.constellations {
            constellation.clear();
        }

        log::info!(
            "backdrop resized to {}x{}: {} dots in {}x{} sectors",
            viewport.x,
            viewport.y,
            self.sectors.indexed_dot_count(),
            self.sectors.cols(),
            self.sectors.rows()
        );
        log::debug!("cleared {} constellations", self.constellations.len());
    }

    pub fn step(&mut self, pointer: Option<Vec2>, now_secs: f64) -> PointerSample {
        let sample = self.pointer.sample(pointer, now_secs);

        self.field
            .update(&mut self.sectors, &sample, &self.config.grid);
        self.swarm
            .update(&sample, self.viewport, &self.config.metaballs);

        for constellation in &mut self.constellations {
            let Some(metaball) = self.swarm.balls().get(constellation.metaball_index()) else {
                continue;
            };
            constellation.update(
                metaball,
                &self.field,
                &self.config.constellation,
                &mut self.rng,
            );
        }

        sample
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn field(&self) -> &GridField {
        &self.field
    }

    pub fn sectors(&self) -> &SectorGrid {
        &self.sectors
    }

    pub fn metaballs(&self) -> &[Metaball] {
        self.swarm.balls()
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            dots: self.field.len(),
            metaballs: self.swarm.len(),
            nodes: self
                .constellations
                .iter()
                .map(|constellation| constellation.nodes().len())
                .sum(),
            lines: self
                .constellations
                .iter()
                .map(|constellation| constellation.lines().len())
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn seeded(seed: u64, viewport: Vec2) -> Simulation {
        let config = BackdropConfig {
            seed: Some(seed),
            ..BackdropConfig::default()
        };
        Simulation::new(config, viewport)
    }

    fn run(sim: &mut Simulation, frames: usize) {
        for frame in 0..frames {
            let t = frame as f32 / 60.0;
            let pointer = vec2(400.0 + (t * 2.0).cos() * 200.0, 300.0 + t.sin() * 150.0);
            sim.step(Some(pointer), f64::from(t));
        }
    }

    #[test]
    fn setup_builds_expected_lattice() {
        let sim = seeded(1, vec2(800.0, 600.0));
        let stats = sim.stats();

        assert_eq!(stats.dots, 34 * 26);
        assert_eq!(stats.metaballs, 3);
        assert_eq!(sim.constellations().len(), 3);
        assert_eq!(sim.sectors().indexed_dot_count(), stats.dots);
    }

    #[test]
    fn long_run_preserves_invariants() {
        let mut sim = seeded(17, vec2(1200.0, 800.0));
        let max_nodes = sim.config().constellation.max_nodes;

        for frame in 0..1200 {
            let t = frame as f32 / 60.0;
            let pointer = vec2(600.0 + (t * 0.7).cos() * 400.0, 400.0 + t.sin() * 300.0);
            sim.step(Some(pointer), f64::from(t));

            for constellation in sim.constellations() {
                assert!(constellation.nodes().len() <= max_nodes);
                if !constellation.nodes().is_empty() {
                    assert_eq!(constellation.connected_components().len(), 1);
                }
                for node in constellation.nodes() {
                    assert!(sim.field().dot(node.dot).is_some());
                }
            }

            let ceiling = sim.config().metaballs.speed_ceiling();
            for ball in sim.metaballs() {
                assert!(ball.speed() <= ceiling + 1e-3);
                assert!(ball.position.x.is_finite() && ball.position.y.is_finite());
            }
        }

        assert!(sim.stats().nodes > 0);
    }

    #[test]
    fn resize_rebuilds_lattice_and_clears_constellations() {
        let mut sim = seeded(5, vec2(800.0, 600.0));
        run(&mut sim, 300);
        assert!(sim.stats().nodes > 0);
        let balls_before = sim.metaballs().to_vec();

        sim.resize(vec2(1024.0, 768.0));

        let stats = sim.stats();
        assert_eq!(stats.dots, (1024 / 25 + 1 + 2) * (768 / 25 + 1 + 2));
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.lines, 0);
        assert_eq!(sim.metaballs(), balls_before.as_slice());
        assert_eq!(sim.sectors().indexed_dot_count(), stats.dots);
    }

    #[test]
    fn pointer_reentry_far_away_leaves_dots_at_rest() {
        let mut sim = seeded(3, vec2(1440.0, 920.0));
        let frame = 1.0 / 60.0;

        sim.step(Some(vec2(20.0, 400.0)), 0.0);
        sim.step(None, frame);
        sim.step(Some(vec2(1420.0, 400.0)), 2.0 * frame);
        for index in 3..603 {
            sim.step(Some(vec2(1420.0, 400.0)), f64::from(index) * frame);
        }

        for dot in sim.field().dots() {
            assert!(dot.position.x.is_finite() && dot.position.y.is_finite());
            assert!((dot.position - dot.home).length() < 1.0);
        }
    }

    #[test]
    fn same_seed_and_input_replay_identically() {
        let mut first = seeded(99, vec2(900.0, 700.0));
        let mut second = seeded(99, vec2(900.0, 700.0));
        run(&mut first, 240);
        run(&mut second, 240);

        assert_eq!(first.metaballs(), second.metaballs());
        assert_eq!(first.stats(), second.stats());
        for (a, b) in first.constellations().iter().zip(second.constellations()) {
            assert_eq!(a.nodes(), b.nodes());
            assert_eq!(a.lines(), b.lines());
        }
    }
}
