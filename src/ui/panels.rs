use eframe::egui::{self, Color32, RichText, Ui};
use radchar_viewer::data::model::format_shape;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – container summary
// ---------------------------------------------------------------------------

/// Render the container summary panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Container");
    ui.separator();

    let dataset = &state.dataset;

    ui.label(RichText::new(state.config.path.display().to_string()).monospace());
    ui.add_space(4.0);

    egui::Grid::new("container_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Arrays");
            ui.label(dataset.names.join(", "));
            ui.end_row();

            ui.strong("iq");
            ui.label(format!(
                "{} {}",
                format_shape(&dataset.iq.shape()),
                dataset.iq.precision()
            ));
            ui.end_row();

            ui.strong("labels");
            ui.label(format_shape(dataset.labels.shape()));
            ui.end_row();

            ui.strong("Sample rate");
            ui.label(format!("{:.3e} S/s", state.config.sample_rate));
            ui.end_row();
        });

    ui.separator();
    ui.strong("Label element");
    ui.label(RichText::new(dataset.labels.element_type()).monospace().small());

    if let Some(trace) = &state.trace {
        ui.separator();
        ui.strong(format!("Waveform {}", trace.index));
        ui.label(format!(
            "{} samples over {:.3e} s",
            trace.len(),
            trace.duration()
        ));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let rows = state.rows();
        if rows > 0 {
            ui.label("Waveform");
            let response = ui.add(
                egui::DragValue::new(&mut state.pending_index).range(0..=rows - 1),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Show").clicked() || submitted {
                state.select(state.pending_index);
            }
            ui.label(format!("of {rows}"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open RadChar container")
        .add_filter("HDF5", &["h5", "hdf5"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
