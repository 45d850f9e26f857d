//! Clipline - timeline previewer
//!
//! Entry point and main application loop.

mod import;

use anyhow::Result;
use clipline_core::{format_time, MediaKind, PreviewConfig, SystemClock};
use clipline_media::{ClockEngine, FfprobeProbe, IngestReport, Ingestor};
use clipline_playback::PlaybackState;
use clipline_timeline::ClipId;
use clipline_ui::{to_color32, Session, TimelinePanel};
use eframe::egui;
use import::ImportQueue;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type PreviewSession = Session<ClockEngine<SystemClock>, SystemClock>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Clipline starting...");

    let config = PreviewConfig::load_or_default();
    let initial_files: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 640.0])
            .with_title("Clipline")
            .with_drag_and_drop(true),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Clipline",
        options,
        Box::new(move |cc| Ok(Box::new(CliplineApp::new(cc, config, initial_files)))),
    )?;

    Ok(())
}

/// Media bin row, copied out of the store so the session can be mutated
/// while the bin is drawn.
struct BinEntry {
    id: ClipId,
    name: String,
    kind: MediaKind,
    duration: f64,
    color: egui::Color32,
}

struct CliplineApp {
    session: PreviewSession,
    imports: ImportQueue,
    zoom: f32,
    readout: String,
}

impl CliplineApp {
    fn new(cc: &eframe::CreationContext<'_>, config: PreviewConfig, initial_files: Vec<PathBuf>) -> Self {
        let clock = SystemClock::new();
        let ingestor = Ingestor::new(Arc::new(FfprobeProbe::new()), &config);
        let zoom = config.default_zoom;
        let mut imports = ImportQueue::new(ingestor);
        imports.submit(initial_files, &cc.egui_ctx);

        Self {
            session: Session::new(ClockEngine::new(clock), clock, config),
            imports,
            zoom,
            readout: String::new(),
        }
    }

    fn absorb(&mut self, report: IngestReport) {
        // The virtual engine needs each video's length to know when it ends.
        for media in report.accepted.iter().filter(|m| m.kind == MediaKind::Video) {
            self.session
                .engine_mut()
                .register(media.source.clone(), media.duration);
        }
        let added = self.session.add_report(report);
        info!(clips = added.len(), "Media bin updated");
    }

    fn append(&mut self, id: ClipId) {
        if let Err(err) = self.session.append_to_timeline(id) {
            warn!(error = %err, "Could not append clip");
        }
    }

    fn import_dialog(&mut self, ctx: &egui::Context) {
        let paths = rfd::FileDialog::new()
            .add_filter("Video", MediaKind::Video.extensions())
            .add_filter("Image", MediaKind::Image.extensions())
            .pick_files()
            .unwrap_or_default();
        self.imports.submit(paths, ctx);
    }

    fn bin_entries(&self) -> Vec<BinEntry> {
        self.session
            .store()
            .iter()
            .map(|clip| BinEntry {
                id: clip.id,
                name: clip.name.clone(),
                kind: clip.kind,
                duration: clip.duration_secs(),
                color: to_color32(clip.color),
            })
            .collect()
    }

    fn show_transport(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            if ui.button("Import Media...").clicked() {
                self.import_dialog(ctx);
            }
            if self.imports.is_busy() {
                ui.spinner();
            }
            ui.separator();

            let label = if self.session.scheduler().is_playing() { "⏸" } else { "▶" };
            if ui.button(label).clicked() {
                self.session.toggle_playback();
            }
            ui.label(&self.readout);
            ui.separator();

            let config = self.session.config();
            let range = config.min_zoom..=config.max_zoom;
            let slider = egui::Slider::new(&mut self.zoom, range)
                .logarithmic(true)
                .suffix(" px/s")
                .text("Zoom");
            if ui.add(slider).changed() {
                self.session.set_zoom(self.zoom);
            }
        });
    }

    fn show_bin(&mut self, ui: &mut egui::Ui) {
        ui.heading("Media");
        ui.separator();
        let entries = self.bin_entries();
        if entries.is_empty() {
            ui.label("Drop files here or use Import Media...");
            return;
        }

        let mut to_append = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in &entries {
                ui.horizontal(|ui| {
                    if ui.small_button("+").on_hover_text("Add to timeline").clicked() {
                        to_append = Some(entry.id);
                    }
                    ui.dnd_drag_source(egui::Id::new(entry.id), entry.id, |ui| {
                        let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                        ui.painter().rect_filled(swatch, 2.0, entry.color);
                        ui.label(format!(
                            "{} ({}, {})",
                            entry.name,
                            entry.kind,
                            format_time(entry.duration)
                        ));
                    });
                });
            }
        });
        if let Some(id) = to_append {
            self.append(id);
        }
    }

    fn show_preview(&self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(20, 20, 20));

        let timeline = self.session.timeline();
        let live = self.session.state().index().and_then(|i| timeline.entry(i));
        let Some(clip) = live else {
            let message = match self.session.state() {
                PlaybackState::Ended => "End of timeline",
                _ if timeline.is_empty() => "Drag media onto the timeline to start",
                _ => "Press play",
            };
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                message,
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
            return;
        };

        let frame = egui::Rect::from_center_size(
            rect.center(),
            egui::vec2((rect.width() * 0.6).min(640.0), (rect.height() * 0.6).min(360.0)),
        );
        painter.rect_filled(frame, 4.0, to_color32(clip.color));
        painter.text(
            frame.center(),
            egui::Align2::CENTER_CENTER,
            format!("{} ({})", clip.name, clip.kind),
            egui::FontId::proportional(18.0),
            egui::Color32::WHITE,
        );
        painter.text(
            egui::pos2(rect.center().x, frame.bottom() + 20.0),
            egui::Align2::CENTER_TOP,
            format!("{:?}", self.session.state()),
            egui::FontId::proportional(13.0),
            egui::Color32::GRAY,
        );
    }
}

impl eframe::App for CliplineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for report in self.imports.drain() {
            self.absorb(report);
        }

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        self.imports.submit(dropped, ctx);

        self.session.tick();
        if self.session.scheduler().is_playing() {
            ctx.request_repaint_after(self.session.config().poll_interval());
        }

        egui::TopBottomPanel::top("transport").show(ctx, |ui| {
            self.show_transport(ui, ctx);
        });

        egui::TopBottomPanel::bottom("timeline_panel")
            .resizable(false)
            .show(ctx, |ui| {
                let summary = TimelinePanel::new(&mut self.session).show(ui);
                self.readout = summary.readout;
            });

        egui::SidePanel::left("media_bin")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| self.show_bin(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.show_preview(ui));
    }
}
