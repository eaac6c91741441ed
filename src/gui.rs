// src/gui.rs
use eframe::egui;
use egui::{Color32, Pos2, RichText, Rounding, Sense, Stroke, Vec2};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use crate::engine;
use crate::export::{render_lead_png, SnapshotStyle};
use crate::source::{RecordPage, RecordSource, Recording};
use crate::types::{EngineCommand, EngineEvent};
use crate::viewer::{LeadInput, LeadViewer, TrackGeometry};

const PAGE_LIMITS: [usize; 3] = [10, 25, 50];
const TRACK_HEIGHT: f32 = 56.0;
const DETAIL_HEIGHT: f32 = 180.0;
// The telemetry devices report raw ADC counts around a 1500 baseline.
const ECG_Y_MIN: f64 = 1400.0;
const ECG_Y_MAX: f64 = 1600.0;

const TRACE_COLOR: Color32 = Color32::from_rgb(26, 26, 26);
const TRACK_BG: Color32 = Color32::from_rgb(24, 24, 28);
const TRACK_LINE: Color32 = Color32::from_rgb(200, 200, 200);
const THUMB_COLOR: Color32 = Color32::from_rgb(120, 180, 255);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Dashboard,
    Detail,
}

struct PatientDetail {
    patient_name: String,
    leads: Vec<LeadViewer>,
}

pub struct CardioscopeApp {
    screen: Screen,

    // Dashboard state
    limit: usize,
    page: usize,
    page_data: Option<RecordPage>,

    // Detail state
    selected_patient: Option<String>,
    detail: Option<PatientDetail>,

    // Shared chrome
    loading: bool,
    error: Option<String>,
    status: Option<String>,

    rx: Receiver<EngineEvent>,
    tx_cmd: Sender<EngineCommand>,
}

impl CardioscopeApp {
    pub fn new(source: Box<dyn RecordSource>) -> Self {
        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();
        engine::spawn_thread(source, tx, rx_cmd);

        let app = Self {
            screen: Screen::Dashboard,
            limit: PAGE_LIMITS[0],
            page: 1,
            page_data: None,
            selected_patient: None,
            detail: None,
            loading: false,
            error: None,
            status: None,
            rx,
            tx_cmd,
        };
        app.request_page();
        app
    }

    fn request_page(&self) {
        self.tx_cmd
            .send(EngineCommand::LoadPage {
                limit: self.limit,
                page: self.page,
            })
            .ok();
    }

    fn request_recording(&self, patient_name: &str) {
        self.tx_cmd
            .send(EngineCommand::LoadRecording(patient_name.to_owned()))
            .ok();
    }

    fn open_patient(&mut self, patient_name: String) {
        self.screen = Screen::Detail;
        self.detail = None;
        self.error = None;
        self.status = None;
        self.loading = true;
        self.request_recording(&patient_name);
        self.selected_patient = Some(patient_name);
    }

    fn apply_recording(&mut self, patient_name: String, recording: Recording) {
        if self.selected_patient.as_deref() != Some(patient_name.as_str()) {
            // A stale fetch finished after the user navigated elsewhere.
            return;
        }
        log::info!(
            "recording for '{patient_name}': {} samples per lead",
            recording.len()
        );
        let (lead_i, lead_ii) = recording.leads();
        match LeadViewer::paired(
            LeadInput::new(lead_i, "Lead I"),
            LeadInput::new(lead_ii, "Lead II"),
        ) {
            Ok((lead_i, lead_ii)) => {
                self.detail = Some(PatientDetail {
                    patient_name,
                    leads: vec![lead_i, lead_ii],
                });
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    fn poll_engine(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                EngineEvent::Page(page) => {
                    self.page = page.page;
                    self.page_data = Some(page);
                    self.loading = false;
                }
                EngineEvent::Recording {
                    patient_name,
                    recording,
                } => self.apply_recording(patient_name, recording),
                EngineEvent::Error(message) => {
                    self.error = Some(message);
                    self.loading = false;
                }
            }
        }
    }

    fn draw_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Rows per page:");
            let mut changed = false;
            for limit in PAGE_LIMITS {
                if ui
                    .selectable_value(&mut self.limit, limit, limit.to_string())
                    .changed()
                {
                    changed = true;
                }
            }
            if changed {
                self.page = 1;
                self.loading = true;
                self.error = None;
                self.request_page();
            }
        });
        ui.separator();

        if self.loading && self.page_data.is_none() {
            ui.label("Loading records...");
            return;
        }

        let mut clicked_patient = None;
        let (mut go_prev, mut go_next) = (false, false);
        if let Some(page) = &self.page_data {
            egui::Grid::new("record-table")
                .striped(true)
                .min_col_width(90.0)
                .show(ui, |ui| {
                    for header in [
                        "Patient Name",
                        "Device",
                        "Event",
                        "Event Time",
                        "Time in Queue",
                        "Technician",
                    ] {
                        ui.label(RichText::new(header).strong());
                    }
                    ui.end_row();
                    for record in &page.records {
                        if ui.link(&record.patient_name).clicked() {
                            clicked_patient = Some(record.patient_name.clone());
                        }
                        ui.label(&record.device);
                        let event_color = if record.rejected() {
                            Color32::from_rgb(200, 80, 80)
                        } else {
                            Color32::from_rgb(80, 170, 110)
                        };
                        ui.label(RichText::new(record.display_event()).color(event_color));
                        ui.label(&record.event_time);
                        ui.label(format!("{} days", record.time_in_queue));
                        ui.label(&record.technician);
                        ui.end_row();
                    }
                });
            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(page.page > 1, egui::Button::new("< Prev"))
                    .clicked()
                {
                    go_prev = true;
                }
                ui.label(format!(
                    "Page {} of {} ({} records)",
                    page.page, page.total_pages, page.total_count
                ));
                if ui
                    .add_enabled(page.page < page.total_pages, egui::Button::new("Next >"))
                    .clicked()
                {
                    go_next = true;
                }
            });
        }
        if go_prev {
            self.page -= 1;
            self.loading = true;
            self.request_page();
        }
        if go_next {
            self.page += 1;
            self.loading = true;
            self.request_page();
        }
        if let Some(patient_name) = clicked_patient {
            self.open_patient(patient_name);
        }
    }

    fn draw_detail(&mut self, ui: &mut egui::Ui) {
        if ui.button("< Back to Dashboard").clicked() {
            self.screen = Screen::Dashboard;
            self.selected_patient = None;
            self.detail = None;
            self.error = None;
            self.status = None;
            self.loading = false;
            return;
        }
        ui.separator();

        if self.loading {
            ui.label("Loading patient data...");
            return;
        }
        if self.error.is_some() {
            if ui.button("Retry").clicked() {
                if let Some(patient) = self.selected_patient.clone() {
                    self.open_patient(patient);
                }
            }
            return;
        }

        let mut export_feedback = None;
        if let Some(detail) = &mut self.detail {
            ui.heading(&detail.patient_name);
            if detail.leads.iter().all(|l| l.buffer().is_empty()) {
                ui.label("No waveform data available for this event.");
                return;
            }
            if let Some(first) = detail.leads.first() {
                ui.label(format!(
                    "{:.0} s recording at {:.0} Hz",
                    first.buffer().duration_seconds(),
                    first.buffer().sample_rate_hz()
                ));
            }
            for viewer in &mut detail.leads {
                ui.add_space(8.0);
                draw_lead(ui, viewer, &detail.patient_name, &mut export_feedback);
            }
        }
        if let Some(feedback) = export_feedback {
            self.status = Some(feedback);
        }
        if let Some(status) = &self.status {
            ui.add_space(4.0);
            ui.label(RichText::new(status).small());
        }
    }
}

impl eframe::App for CardioscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_engine();
        if self.loading {
            // Keep polling the engine while a fetch is in flight.
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Patient Data Dashboard");
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = self.error.clone() {
                ui.colored_label(Color32::from_rgb(200, 80, 80), format!("Error: {error}"));
            }
            match self.screen {
                Screen::Dashboard => self.draw_dashboard(ui),
                Screen::Detail => {
                    egui::ScrollArea::vertical().show(ui, |ui| self.draw_detail(ui));
                }
            }
        });
    }
}

/// One lead: the full-resolution window on top, the navigation track with
/// the decimated overview and the viewport thumb below it.
fn draw_lead(
    ui: &mut egui::Ui,
    viewer: &mut LeadViewer,
    patient_name: &str,
    export_feedback: &mut Option<String>,
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(viewer.label()).strong());
        if ui.small_button("Export PNG").clicked() {
            *export_feedback = Some(match export_window(viewer, patient_name) {
                Ok(path) => format!("Saved {path}"),
                Err(err) => format!("Export failed: {err:#}"),
            });
        }
    });

    draw_detail_plot(ui, viewer);
    draw_track(ui, viewer);
}

fn draw_detail_plot(ui: &mut egui::Ui, viewer: &LeadViewer) {
    let detail = viewer.detail();
    let viewport = *viewer.viewport();
    let rate = viewer.buffer().sample_rate_hz() as f64;
    let points =
        PlotPoints::from_iter(detail.iter().map(|p| [p.time as f64, p.value as f64]));
    Plot::new(format!("lead-plot-{}", viewer.label()))
        .height(DETAIL_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_axes([true, false])
        .show(ui, |plot_ui| {
            let t0 = viewport.start() as f64 / rate;
            let t1 = viewport.end() as f64 / rate;
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [t0, ECG_Y_MIN],
                [t1.max(t0 + f64::EPSILON), ECG_Y_MAX],
            ));
            plot_ui.line(Line::new(points).color(TRACE_COLOR).width(1.0));
        });
}

fn draw_track(ui: &mut egui::Ui, viewer: &mut LeadViewer) {
    let (response, painter) = ui.allocate_painter(
        Vec2::new(ui.available_width(), TRACK_HEIGHT),
        Sense::click_and_drag(),
    );
    let rect = response.rect;
    // The measured rect is the externally supplied geometry; the core
    // never reads the surface itself.
    let track = TrackGeometry::new(rect.left(), rect.width());

    let pointer_x = response
        .interact_pointer_pos()
        .or_else(|| ui.ctx().pointer_latest_pos())
        .map(|p| p.x);
    if response.is_pointer_button_down_on() && !viewer.is_dragging() {
        if let Some(x) = pointer_x {
            viewer.track_pressed(x, track);
        }
    } else if viewer.is_dragging() {
        if let Some(x) = pointer_x {
            viewer.pointer_moved(x, track);
        }
    }
    // Unconditional exit: a released or lost pointer always ends the drag,
    // even when the cursor is far outside the track.
    if viewer.is_dragging() && !ui.input(|i| i.pointer.any_down()) {
        viewer.pointer_released();
    }

    painter.rect_filled(rect, Rounding::same(4.0), TRACK_BG);

    let total = viewer.buffer().len();
    let overview = viewer.overview();
    if total > 0 && overview.len() >= 2 {
        let (mut lo, mut hi) = (f32::MAX, f32::MIN);
        for point in overview {
            lo = lo.min(point.value);
            hi = hi.max(point.value);
        }
        let span = (hi - lo).max(1.0);
        let line: Vec<Pos2> = overview
            .iter()
            .map(|point| {
                let x = rect.left() + point.source_index as f32 / total as f32 * rect.width();
                let y = rect.bottom() - 4.0 - (point.value - lo) / span * (rect.height() - 8.0);
                Pos2::new(x, y)
            })
            .collect();
        painter.add(egui::Shape::line(line, Stroke::new(1.0, TRACK_LINE)));
    }

    let thumb = viewer.thumb(track);
    if thumb.width_px > 0.0 {
        // The minimum-width floor can push the thumb past the right edge;
        // pin it inside the track.
        let width = thumb.width_px.min(rect.width());
        let offset = thumb.offset_px.min(rect.width() - width);
        let thumb_rect = egui::Rect::from_min_size(
            Pos2::new(rect.left() + offset, rect.top()),
            Vec2::new(width, rect.height()),
        );
        painter.rect_filled(
            thumb_rect,
            Rounding::same(4.0),
            Color32::from_rgba_unmultiplied(THUMB_COLOR.r(), THUMB_COLOR.g(), THUMB_COLOR.b(), 60),
        );
        painter.rect_stroke(thumb_rect, Rounding::same(4.0), Stroke::new(1.0, THUMB_COLOR));
    }

    if viewer.is_dragging() {
        ui.ctx()
            .output_mut(|o| o.cursor_icon = egui::CursorIcon::Grabbing);
    } else {
        response.on_hover_cursor(egui::CursorIcon::PointingHand);
    }
}

fn export_window(viewer: &LeadViewer, patient_name: &str) -> anyhow::Result<String> {
    let detail = viewer.detail();
    let png = render_lead_png(viewer.label(), &detail, &SnapshotStyle::default())?;
    let file_name = format!(
        "{}_{}.png",
        patient_name.replace(' ', "_"),
        viewer.label().replace(' ', "_")
    );
    std::fs::write(&file_name, png)?;
    Ok(file_name)
}
