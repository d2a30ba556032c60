use eframe::egui::{self, Context, Sense, Ui, Vec2};

use crate::config::BackdropConfig;
use crate::sim::Simulation;

mod render_utils;
mod ui;
mod view;

use ui::{FpsCounter, paint_debug_overlay};

/// Sub-pixel jitter in the reported surface size is not a resize.
const RESIZE_TOLERANCE: f32 = 0.5;

pub struct BackdropApp {
    config: BackdropConfig,
    state: AppState,
    fps: FpsCounter,
}

enum AppState {
    Pending,
    Running(Box<Simulation>),
}

enum Lifecycle {
    Setup,
    Resize,
    Steady,
}

fn surface_changed(current: Vec2, next: Vec2) -> bool {
    (current.x - next.x).abs() > RESIZE_TOLERANCE || (current.y - next.y).abs() > RESIZE_TOLERANCE
}

impl BackdropApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: BackdropConfig) -> Self {
        Self {
            config,
            state: AppState::Pending,
            fps: FpsCounter::default(),
        }
    }

    fn on_setup(&mut self, size: Vec2) {
        self.state = AppState::Running(Box::new(Simulation::new(self.config.clone(), size)));
    }

    fn on_resize(&mut self, size: Vec2) {
        if let AppState::Running(sim) = &mut self.state {
            sim.resize(size);
        }
    }

    fn on_frame(&mut self, ui: &mut Ui) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let size = rect.size();
        if size.x < 1.0 || size.y < 1.0 {
            return;
        }

        let lifecycle = match &self.state {
            AppState::Pending => Lifecycle::Setup,
            AppState::Running(sim) if surface_changed(sim.viewport(), size) => Lifecycle::Resize,
            AppState::Running(_) => Lifecycle::Steady,
        };
        match lifecycle {
            Lifecycle::Setup => self.on_setup(size),
            Lifecycle::Resize => self.on_resize(size),
            Lifecycle::Steady => {}
        }

        let AppState::Running(sim) = &mut self.state else {
            return;
        };

        let (pointer, now_secs) = ui.input(|input| {
            (
                input.pointer.hover_pos().map(|position| position - rect.min),
                input.time,
            )
        });
        let sample = sim.step(pointer, now_secs);

        let painter = ui.painter_at(rect);
        view::paint_frame(&painter, rect, sim);
        if self.config.debug {
            paint_debug_overlay(&painter, rect, sim, &sample, self.fps.display_text());
        }
    }
}

impl eframe::App for BackdropApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.fps.update(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.on_frame(ui));

        ctx.request_repaint();
    }
}
