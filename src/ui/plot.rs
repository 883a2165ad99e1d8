use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

/// matplotlib `tab:blue`.
pub const IN_PHASE_COLOR: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
/// matplotlib `tab:orange`.
pub const QUADRATURE_COLOR: Color32 = Color32::from_rgb(0xff, 0x7f, 0x0e);
const QUADRATURE_OPACITY: f32 = 0.75;
const LINE_WIDTH: f32 = 1.5;
const MARKER_RADIUS: f32 = 2.0;

// ---------------------------------------------------------------------------
// Scientific-notation axis
// ---------------------------------------------------------------------------

/// One power of ten shared by every tick on an axis, matplotlib
/// `scilimits=(0, 0)` style: ticks show the mantissa and the label carries
/// the exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SciScale {
    pub exponent: i32,
}

impl SciScale {
    /// Pick the exponent of the largest magnitude on the axis.
    pub fn for_extent(max_abs: f64) -> Self {
        let exponent = if max_abs.is_finite() && max_abs > 0.0 {
            max_abs.log10().floor() as i32
        } else {
            0
        };
        SciScale { exponent }
    }

    pub fn tick_label(self, value: f64) -> String {
        let mantissa = value / 10f64.powi(self.exponent);
        // Keep "-0.00" off the axis.
        let mantissa = if mantissa.abs() < 5e-3 { 0.0 } else { mantissa };
        format!("{mantissa:.2}")
    }

    pub fn axis_label(self, base: &str) -> String {
        if self.exponent == 0 {
            base.to_string()
        } else {
            format!("{base}  ×1e{}", self.exponent)
        }
    }
}

// ---------------------------------------------------------------------------
// Waveform plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected waveform's I and Q components against time.
pub fn waveform_plot(ui: &mut Ui, state: &AppState) {
    let trace = match &state.trace {
        Some(t) => t,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a RadChar container to view a waveform  (File → Open…)");
            });
            return;
        }
    };

    let scale = SciScale::for_extent(trace.duration());

    let in_phase: PlotPoints = trace
        .time
        .iter()
        .zip(trace.in_phase.iter())
        .map(|(&t, &i)| [t, i])
        .collect();
    let in_phase_markers: PlotPoints = trace
        .time
        .iter()
        .zip(trace.in_phase.iter())
        .map(|(&t, &i)| [t, i])
        .collect();
    let quadrature: PlotPoints = trace
        .time
        .iter()
        .zip(trace.quadrature.iter())
        .map(|(&t, &q)| [t, q])
        .collect();

    Plot::new("waveform_plot")
        .legend(Legend::default())
        .x_axis_label(scale.axis_label("Time (s)"))
        .y_axis_label("Amplitude")
        .x_axis_formatter(move |mark, _range| scale.tick_label(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Same name as the line so the legend shows a single entry.
            plot_ui.line(
                Line::new(in_phase)
                    .name("In-phase")
                    .color(IN_PHASE_COLOR)
                    .width(LINE_WIDTH),
            );
            plot_ui.points(
                Points::new(in_phase_markers)
                    .name("In-phase")
                    .color(IN_PHASE_COLOR)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(MARKER_RADIUS),
            );
            plot_ui.line(
                Line::new(quadrature)
                    .name("Quadrature")
                    .color(QUADRATURE_COLOR.gamma_multiply(QUADRATURE_OPACITY))
                    .width(LINE_WIDTH),
            );
        });
}
