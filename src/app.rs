use std::collections::VecDeque;
use std::path::PathBuf;

use egui::{Color32, RichText, ScrollArea};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::config::SUPPORTED_EXTENSIONS;
use crate::engine::BatchJob;
use crate::error::BatchError;
use crate::selection::SelectionList;
use crate::types::{AddOutcome, ConversionSettings, LogEntry, Notice, NoticeLevel};

pub struct ImageConverterApp {
    settings: ConversionSettings,
    selection: SelectionList,

    // Conversion state
    batch: Option<BatchJob>,
    progress: u8,

    // UI state
    notices: VecDeque<Notice>,
    log_entries: Vec<LogEntry>,
    scroll_to_bottom: bool,
}

impl ImageConverterApp {
    pub fn new() -> Self {
        Self::with_settings(ConversionSettings::default())
    }

    pub fn with_settings(settings: ConversionSettings) -> Self {
        let mut app = Self {
            settings,
            selection: SelectionList::new(),
            batch: None,
            progress: 0,
            notices: VecDeque::new(),
            log_entries: Vec::new(),
            scroll_to_bottom: false,
        };

        app.add_log(LogEntry::Info(format!(
            "Converted images are saved to '{}'.",
            app.settings.output_dir.display()
        )));

        app
    }

    fn add_log(&mut self, entry: LogEntry) {
        self.log_entries.push(entry);
        self.scroll_to_bottom = true;
    }

    fn notify(&mut self, notice: Notice) {
        let text = format!("{}: {}", notice.title, notice.message);
        self.add_log(match notice.level {
            NoticeLevel::Info => LogEntry::Info(text),
            NoticeLevel::Warning => LogEntry::Warning(text),
            NoticeLevel::Error => LogEntry::Error(text),
        });
        self.notices.push_back(notice);
    }

    fn is_converting(&self) -> bool {
        self.batch.is_some()
    }

    pub fn add_path(&mut self, path: PathBuf) {
        match self.selection.add_path(path.clone()) {
            AddOutcome::Added => {
                let kind = if path.is_dir() { "folder" } else { "file" };
                self.add_log(LogEntry::Info(format!("Added {}: {}", kind, path.display())));
            }
            AddOutcome::AlreadyPresent => {}
            AddOutcome::Unsupported => {
                log::warn!("Rejected unsupported file {}", path.display());
                self.notify(Notice::warning(
                    "Unsupported file",
                    format!("{} is not a supported image format.", path.display()),
                ));
            }
        }
    }

    /// Paths dropped on the window, in drop order. Ignored while a batch runs.
    pub fn add_dropped(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        if self.is_converting() {
            self.add_log(LogEntry::Warning(format!(
                "Ignored {} dropped item(s): a conversion is running.",
                paths.len()
            )));
            return;
        }
        for path in paths {
            self.add_path(path);
        }
    }

    /// An empty selection still converts, so the user gets the empty-selection warning.
    fn can_convert(&self) -> bool {
        !self.is_converting()
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.progress = 0;
    }

    /// Starts a batch; files are then converted one per frame by [`Self::step_batch`].
    pub fn convert_all(&mut self) {
        if self.is_converting() {
            return;
        }

        match BatchJob::prepare(&self.selection, &self.settings) {
            Ok(batch) => {
                self.add_log(LogEntry::Info(format!(
                    "Converting {} image(s) to {}...",
                    batch.total(),
                    self.settings.output_extension
                )));
                self.progress = 0;
                self.batch = Some(batch);
            }
            Err(e @ BatchError::EmptySelection) => {
                self.notify(Notice::warning("Warning", e.to_string()));
            }
            Err(e @ BatchError::NoSupportedImages) => {
                self.notify(Notice::warning("Error", e.to_string()));
                self.clear();
            }
            Err(e @ BatchError::OutputDir { .. }) => {
                log::error!("{}", e);
                self.notify(Notice::error("Error", e.to_string()));
            }
        }
    }

    /// Converts the next file of the running batch. Returns `false` when no batch is running.
    pub fn step_batch(&mut self) -> bool {
        let Some(batch) = self.batch.as_mut() else {
            return false;
        };

        if let Some(outcome) = batch.step() {
            self.progress = batch.progress_percent();

            if outcome.overwrote {
                self.add_log(LogEntry::Warning(format!(
                    "⚠ {} overwrote an earlier output",
                    outcome.output.display()
                )));
            }
            match outcome.result {
                Ok(()) => self.add_log(LogEntry::Success(format!(
                    "✓ {} -> {}",
                    outcome.input.display(),
                    outcome.output.display()
                ))),
                Err(e) => self.add_log(LogEntry::Error(format!("✗ {}", e))),
            }
            return true;
        }

        let summary = batch.summary();
        self.batch = None;
        log::info!("Batch finished: {} succeeded", summary);
        self.notify(Notice::info(
            "Done",
            format!("Converted {} image(s) successfully.", summary),
        ));
        self.clear();
        true
    }

    fn show_pending_notices(&mut self) {
        while let Some(notice) = self.notices.pop_front() {
            let level = match notice.level {
                NoticeLevel::Info => MessageLevel::Info,
                NoticeLevel::Warning => MessageLevel::Warning,
                NoticeLevel::Error => MessageLevel::Error,
            };
            MessageDialog::new()
                .set_level(level)
                .set_title(&notice.title)
                .set_description(&notice.message)
                .set_buttons(MessageButtons::Ok)
                .show();
        }
    }

    fn render_input_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Input");
        ui.add_space(5.0);

        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

        // Drop area
        let drop_area = ui.allocate_response(
            egui::vec2(ui.available_width(), 80.0),
            egui::Sense::hover(),
        );

        ui.painter().rect_filled(
            drop_area.rect,
            4.0,
            if hovering {
                Color32::from_rgb(60, 60, 80)
            } else {
                Color32::from_rgb(40, 40, 60)
            },
        );

        ui.painter().rect_stroke(
            drop_area.rect,
            4.0,
            egui::Stroke::new(2.0, Color32::from_rgb(100, 100, 120)),
        );

        let text = if self.selection.is_empty() {
            "Drag & Drop a folder or images here\nor use the buttons below".to_string()
        } else {
            format!("{} item(s) selected", self.selection.len())
        };

        ui.put(
            drop_area.rect,
            egui::Label::new(RichText::new(text).size(14.0).color(Color32::LIGHT_GRAY)),
        );

        // Handle drag and drop
        let dropped: Vec<PathBuf> = ui
            .ctx()
            .input(|i| i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect());
        self.add_dropped(dropped);

        ui.add_space(10.0);

        ui.add_enabled_ui(!self.is_converting(), |ui| {
            ui.horizontal(|ui| {
                if ui.button("📁 Add Files").clicked() {
                    let extensions: Vec<&str> = SUPPORTED_EXTENSIONS
                        .iter()
                        .map(|ext| ext.trim_start_matches('.'))
                        .collect();
                    if let Some(files) = rfd::FileDialog::new()
                        .set_title("Select Images")
                        .add_filter("Images", &extensions)
                        .pick_files()
                    {
                        for file in files {
                            self.add_path(file);
                        }
                    }
                }

                if ui.button("📂 Add Folder").clicked() {
                    if let Some(folder) = rfd::FileDialog::new()
                        .set_title("Select Folder")
                        .pick_folder()
                    {
                        self.add_path(folder);
                    }
                }

                if ui.button("Clear").clicked() {
                    self.clear();
                }
            });
        });

        ui.add_space(5.0);

        ScrollArea::vertical()
            .id_salt("selection_list")
            .max_height(120.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for path in self.selection.paths() {
                    let icon = if path.is_dir() { "📂" } else { "🖼" };
                    ui.label(RichText::new(format!("{} {}", icon, path.display())).small());
                }
            });
    }

    fn render_controls_section(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Output format:");
            ui.add_enabled_ui(!self.is_converting(), |ui| {
                egui::ComboBox::from_id_salt("output_format")
                    .selected_text(self.settings.output_extension)
                    .show_ui(ui, |ui| {
                        for ext in SUPPORTED_EXTENSIONS {
                            ui.selectable_value(&mut self.settings.output_extension, ext, ext);
                        }
                    });
            });

            if ui.add_enabled(self.can_convert(), egui::Button::new("▶ Convert Images")).clicked() {
                self.convert_all();
            }
        });

        ui.add_space(10.0);

        ui.add(
            egui::ProgressBar::new(f32::from(self.progress) / 100.0)
                .text(format!("{}%", self.progress)),
        );

        if let Some(batch) = &self.batch {
            if let Some(file) = batch.current_file() {
                ui.label(
                    RichText::new(format!(
                        "{} / {}: {}",
                        batch.completed() + 1,
                        batch.total(),
                        file.display()
                    ))
                    .small()
                    .italics(),
                );
            }
        }
    }

    fn render_log_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Log");
        ui.add_space(5.0);

        let scroll_area = ScrollArea::vertical()
            .id_salt("log")
            .auto_shrink([false, false])
            .stick_to_bottom(true);

        scroll_area.show(ui, |ui| {
            for entry in &self.log_entries {
                let (color, text) = match entry {
                    LogEntry::Info(s) => (Color32::LIGHT_GRAY, s),
                    LogEntry::Success(s) => (Color32::from_rgb(100, 255, 100), s),
                    LogEntry::Error(s) => (Color32::from_rgb(255, 100, 100), s),
                    LogEntry::Warning(s) => (Color32::from_rgb(255, 200, 100), s),
                };

                ui.label(RichText::new(text).color(color).small());
            }

            if self.scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                self.scroll_to_bottom = false;
            }
        });
    }
}

impl eframe::App for ImageConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One file per frame, then hand control back to the event loop
        if self.step_batch() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(10.0);

            ui.group(|ui| {
                self.render_input_section(ui);
            });

            ui.add_space(10.0);

            ui.group(|ui| {
                self.render_controls_section(ui);
            });

            ui.add_space(10.0);

            ui.group(|ui| {
                self.render_log_section(ui);
            });
        });

        self.show_pending_notices();
    }
}
