use egui::Ui;
use wavescape_scene::ChaosParams;
use wavescape_water::{Tunable, WaterParams};

/// One slider per tunable. Returns true if any value changed this frame.
pub fn tunable_sliders<'a>(
    ui: &mut Ui,
    tunables: impl IntoIterator<Item = (Tunable, &'a mut f32)>,
) -> bool {
    let mut changed = false;
    for (tunable, value) in tunables {
        let response = ui.add(egui::Slider::new(value, tunable.range).text(tunable.label));
        if response.changed() {
            tracing::debug!(key = tunable.key, value = *value, "tunable changed");
            changed = true;
        }
    }
    changed
}

/// Water parameter panel.
///
/// A min/max perturbation pair that crosses while dragging is left as is;
/// the simulator swaps the bounds when it draws.
pub fn water_panel(ui: &mut Ui, params: &mut WaterParams) -> bool {
    ui.heading("Water");
    ui.separator();
    tunable_sliders(ui, params.tunables_mut())
}

pub fn chaos_panel(ui: &mut Ui, params: &mut ChaosParams) -> bool {
    ui.heading("Chaos scene");
    ui.separator();
    let mut changed = tunable_sliders(ui, params.tunables_mut());
    changed |= ui.checkbox(&mut params.free_camera, "free camera").changed();
    changed |= ui
        .checkbox(&mut params.invert_culling, "show culled only")
        .changed();
    changed
}
