use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::slot_color;
use crate::config::MAX_FILES;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – files and region
// ---------------------------------------------------------------------------

/// Render the left panel: loaded files, their summary, and the region form.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            file_list(ui, state);
            ui.separator();
            region_form(ui, state);
        });
}

fn file_list(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!("Files  ({}/{MAX_FILES})", state.files.len()));

    if state.files.is_empty() {
        ui.label("No variant file loaded.");
        if ui.button("Add variant files…").clicked() {
            open_files_dialog(state);
        }
        return;
    }

    let mut remove = None;
    for (i, file) in state.files.iter().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            if ui.small_button("✕").on_hover_text("Remove").clicked() {
                remove = Some(i);
            }
            ui.label(RichText::new("■").color(slot_color(file.slot)));
            ui.label(file.name.as_str());
        });
    }
    if let Some(i) = remove {
        state.remove_file(i);
    }

    ui.add_space(4.0);
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(18.0, |mut header| {
            for title in ["File", "Kept", "Dropped", "Chromosomes"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for file in &state.files {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(file.name.as_str()).on_hover_text(format!(
                            "columns: {}",
                            file.table.column_names().join(", ")
                        ));
                    });
                    row.col(|ui| {
                        ui.label(file.table.len().to_string());
                    });
                    row.col(|ui| {
                        ui.label(file.table.dropped_rows().to_string());
                    });
                    row.col(|ui| {
                        ui.label(file.table.chromosomes().join(", "));
                    });
                });
            }
        });
}

fn region_form(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Region");

    let mut known: Vec<String> = state
        .files
        .iter()
        .flat_map(|f| f.table.chromosomes())
        .collect();
    known.sort();
    known.dedup();

    egui::Grid::new("region_form")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Chromosome");
            ui.horizontal(|ui: &mut Ui| {
                ui.add(egui::TextEdit::singleline(&mut state.query.chrom).desired_width(80.0));
                if !known.is_empty() {
                    egui::ComboBox::from_id_salt("chrom_pick")
                        .selected_text("…")
                        .show_ui(ui, |ui: &mut Ui| {
                            for chrom in &known {
                                ui.selectable_value(
                                    &mut state.query.chrom,
                                    chrom.clone(),
                                    chrom.as_str(),
                                );
                            }
                        });
                }
            });
            ui.end_row();

            ui.label("Start");
            ui.add(DragValue::new(&mut state.query.start).speed(10.0));
            ui.end_row();

            ui.label("End");
            ui.add(DragValue::new(&mut state.query.end).speed(10.0));
            ui.end_row();

            ui.label("Bin size");
            ui.add(DragValue::new(&mut state.query.bin_size).range(1..=100_000));
            ui.end_row();
        });

    ui.add_space(4.0);
    let can_plot = !state.files.is_empty();
    if ui.add_enabled(can_plot, egui::Button::new("Plot")).clicked() {
        state.recompute();
        log::info!(
            "Scored {} windows over {}",
            state.total_windows(),
            state.query.label()
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.is_full(), egui::Button::new("Add variant files…"))
                .clicked()
            {
                open_files_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.total_windows() > 0, egui::Button::new("Export scores…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Clear").clicked() {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(q) = &state.plotted_query {
            ui.label(format!(
                "{} file(s), {} scored windows on {}",
                state.files.len(),
                state.total_windows(),
                q.label()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Add variant files")
        .add_filter("Variant tables", &["tsv", "csv", "txt", "tab"])
        .add_filter("All files", &["*"])
        .pick_files();

    let Some(paths) = files else {
        return;
    };

    state.add_files(&paths);
}

pub fn export_dialog(state: &mut AppState) {
    let target = rfd::FileDialog::new()
        .set_title("Export mutation load")
        .set_file_name("mutation_load.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = target {
        if let Err(e) = crate::data::export::export_path(&path, &state.labelled_series()) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
