mod fps;
mod overlay;

pub(super) use fps::FpsCounter;
pub(super) use overlay::paint_debug_overlay;
