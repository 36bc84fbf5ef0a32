use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::slot_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Mutation load plot (central panel)
// ---------------------------------------------------------------------------

/// Render one line per loaded file over the plotted region.
pub fn mutation_load_plot(ui: &mut Ui, state: &AppState) {
    if state.files.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Add a variant file to plot mutation load  (File → Add variant files…)");
        });
        return;
    }

    let Some(query) = &state.plotted_query else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Set a region and press Plot");
        });
        return;
    };

    ui.heading(format!("Mutation load {}", query.label()));

    Plot::new("mutation_load_plot")
        .legend(Legend::default())
        .x_axis_label("Genomic position")
        .y_axis_label("Weighted score")
        .include_x(query.start as f64)
        .include_x(query.end as f64)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for file in &state.files {
                if file.series.is_empty() {
                    continue;
                }
                let points = PlotPoints::from(file.series.points());
                let line = Line::new(points)
                    .name(&file.name)
                    .color(slot_color(file.slot))
                    .width(2.0);

                plot_ui.line(line);
            }
        });
}
