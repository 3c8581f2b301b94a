use eframe::egui;
use egui::{Color32, CornerRadius, RichText, ScrollArea, Stroke, Ui, ViewportBuilder};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cache;
mod config;
mod controller;
mod error;
mod hn_client;
mod models;

use crate::config::Config;
use crate::controller::{SearchController, SearchState};
use crate::hn_client::HackerNewsClient;
use crate::models::HackerNewsItem;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::default();
    let client = HackerNewsClient::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([900.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("HN Search"),
        ..Default::default()
    };

    eframe::run_native(
        "HN Search",
        options,
        Box::new(move |cc| {
            let mut app = HnSearchApp::new(client, &config);

            if let Some(storage) = cc.storage {
                if let Some(theme_str) = storage.get_string("is_dark_mode") {
                    if let Ok(is_dark_mode) = theme_str.parse::<bool>() {
                        app.set_dark_mode(is_dark_mode);
                    }
                }
            }

            app.controller.start(&config.default_query);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))
}

struct AppTheme {
    background: Color32,
    card_background: Color32,
    text: Color32,
    secondary_text: Color32,
    highlight: Color32,
    error: Color32,
    separator: Color32,
    score_high: Color32,
    score_medium: Color32,
    score_low: Color32,
    button_background: Color32,
    button_foreground: Color32,
    button_hover_background: Color32,
}

impl AppTheme {
    fn dark() -> Self {
        Self {
            background: Color32::from_rgb(18, 18, 18),
            card_background: Color32::from_rgb(30, 30, 30),
            text: Color32::from_rgb(240, 240, 240),
            secondary_text: Color32::from_rgb(180, 180, 180),
            highlight: Color32::from_rgb(255, 102, 0), // HN orange
            error: Color32::from_rgb(239, 83, 80),
            separator: Color32::from_rgb(60, 60, 60),
            score_high: Color32::from_rgb(76, 175, 80),
            score_medium: Color32::from_rgb(255, 193, 7),
            score_low: Color32::from_rgb(158, 158, 158),
            button_background: Color32::from_rgb(66, 66, 66),
            button_foreground: Color32::from_rgb(240, 240, 240),
            button_hover_background: Color32::from_rgb(80, 80, 80),
        }
    }

    fn light() -> Self {
        Self {
            background: Color32::from_rgb(245, 245, 245),
            card_background: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(20, 20, 20),
            secondary_text: Color32::from_rgb(90, 90, 90),
            highlight: Color32::from_rgb(235, 92, 0),
            error: Color32::from_rgb(198, 40, 40),
            separator: Color32::from_rgb(200, 200, 200),
            score_high: Color32::from_rgb(30, 110, 40),
            score_medium: Color32::from_rgb(190, 130, 0),
            score_low: Color32::from_rgb(80, 80, 80),
            button_background: Color32::from_rgb(235, 235, 235),
            button_foreground: Color32::from_rgb(20, 20, 20),
            button_hover_background: Color32::from_rgb(210, 210, 210),
        }
    }

    fn apply_to_ctx(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        // Set base colors
        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.card_background;
        style.visuals.window_stroke = Stroke::new(1.0, self.separator);
        style.visuals.widgets.noninteractive.bg_fill = self.card_background;

        // Set text colors
        style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text);

        // Set button styles
        style.visuals.widgets.inactive.bg_fill = self.button_background;
        style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.button_foreground);
        style.visuals.widgets.active.bg_fill = self.highlight;
        style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.button_foreground);
        style.visuals.widgets.hovered.bg_fill = self.button_hover_background;
        style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.button_foreground);

        // Set selection color
        style.visuals.selection.bg_fill = self.highlight;
        style.visuals.selection.stroke = Stroke::new(1.0, self.highlight);

        // Set various rounding amounts
        style.visuals.window_corner_radius = CornerRadius::same(8);
        style.visuals.widgets.noninteractive.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.inactive.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.hovered.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.active.corner_radius = CornerRadius::same(4);

        // Apply the style
        ctx.set_style(style);
    }

    fn score_color(&self, points: i64) -> Color32 {
        if points >= 300 {
            self.score_high
        } else if points >= 100 {
            self.score_medium
        } else {
            self.score_low
        }
    }
}

/// User input collected while drawing a frame, applied once drawing is done.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UiAction {
    Submit,
    Dismiss(String),
    LoadMore,
    Retry,
    OpenLink(String),
    ToggleTheme,
}

struct HnSearchApp {
    controller: SearchController<HackerNewsClient>,
    // Text box contents, only committed on submit
    pending_term: String,
    theme: AppTheme,
    is_dark_mode: bool,
}

impl HnSearchApp {
    fn new(client: HackerNewsClient, config: &Config) -> Self {
        Self {
            controller: SearchController::new(client),
            pending_term: config.default_query.clone(),
            theme: AppTheme::dark(),
            is_dark_mode: true,
        }
    }

    fn set_dark_mode(&mut self, is_dark_mode: bool) {
        self.is_dark_mode = is_dark_mode;
        self.theme = if is_dark_mode {
            AppTheme::dark()
        } else {
            AppTheme::light()
        };
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Submit => {
                let term = self.pending_term.clone();
                self.controller.submit(&term);
            }
            UiAction::Dismiss(id) => self.controller.dismiss(&id),
            UiAction::LoadMore => self.controller.load_more(),
            UiAction::Retry => self.controller.retry(),
            UiAction::OpenLink(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(%url, error = %e, "failed to open link");
                }
            }
            UiAction::ToggleTheme => self.set_dark_mode(!self.is_dark_mode),
        }
    }

    fn render_header(&mut self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.heading(
                RichText::new("HN Search")
                    .color(self.theme.highlight)
                    .size(24.0),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme_icon = if self.is_dark_mode { "☀" } else { "🌙" };
                let theme_btn = ui.add(
                    egui::Button::new(
                        RichText::new(theme_icon)
                            .color(self.theme.button_foreground)
                            .size(18.0),
                    )
                    .min_size(egui::Vec2::new(32.0, 32.0))
                    .corner_radius(CornerRadius::same(16))
                    .fill(self.theme.button_background),
                );
                if theme_btn.clicked() {
                    actions.push(UiAction::ToggleTheme);
                }
            });
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.pending_term)
                    .hint_text("Search Hacker News...")
                    .desired_width(ui.available_width() - 90.0),
            );
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let search_btn = ui.add(
                egui::Button::new(RichText::new("Search").color(self.theme.button_foreground))
                    .corner_radius(CornerRadius::same(4))
                    .fill(self.theme.button_background),
            );

            if entered || search_btn.clicked() {
                actions.push(UiAction::Submit);
            }
        });
    }

    fn render_error(&self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        let Some(reason) = self.controller.last_error() else {
            return;
        };
        let term = self.controller.current_term();

        egui::Frame::new()
            .fill(self.theme.card_background)
            .corner_radius(CornerRadius::same(8))
            .stroke(Stroke::new(1.5, self.theme.error))
            .inner_margin(12.0)
            .outer_margin(egui::vec2(8.0, 6.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("Search for '{}' failed: {}", term, reason))
                            .color(self.theme.error),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Retry").clicked() {
                            actions.push(UiAction::Retry);
                        }
                    });
                });
            });
    }

    fn render_item(&self, ui: &mut Ui, rank: usize, item: &HackerNewsItem, actions: &mut Vec<UiAction>) {
        egui::Frame::new()
            .fill(self.theme.card_background)
            .corner_radius(CornerRadius::same(8))
            .stroke(Stroke::new(1.0, self.theme.separator))
            .inner_margin(12.0)
            .outer_margin(egui::vec2(8.0, 6.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{}", rank))
                            .color(self.theme.secondary_text)
                            .size(16.0),
                    );
                    ui.add_space(8.0);

                    let title_label = ui.add(
                        egui::Label::new(
                            RichText::new(&item.title)
                                .color(self.theme.text)
                                .size(16.0)
                                .strong(),
                        )
                        .sense(egui::Sense::click()),
                    );
                    if title_label.clicked() {
                        actions.push(UiAction::OpenLink(item.link()));
                    }
                    if title_label.hovered() {
                        ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let dismiss_btn = ui.add(
                            egui::Button::new(RichText::new("✖").color(self.theme.error))
                                .corner_radius(CornerRadius::same(4))
                                .fill(self.theme.button_background),
                        );
                        if dismiss_btn.clicked() {
                            actions.push(UiAction::Dismiss(item.id.clone()));
                        }
                    });
                });

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("by {}", item.author))
                            .color(self.theme.secondary_text)
                            .size(14.0),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(format!("{} comments", item.num_comments))
                            .color(self.theme.secondary_text)
                            .size(14.0),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(format!("{} pts", item.points))
                            .color(self.theme.score_color(item.points))
                            .strong(),
                    );
                });
            });
    }

    fn render_results(&self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        let hits = self.controller.hits();

        if hits.is_empty() && !self.controller.is_loading() {
            if let SearchState::Ready(term) = self.controller.state() {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.label(
                        RichText::new(format!("No results found for '{}'", term))
                            .color(self.theme.secondary_text)
                            .size(18.0)
                            .italics(),
                    );
                });
            }
        }

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for (i, item) in hits.iter().enumerate() {
                self.render_item(ui, i + 1, item, actions);
            }

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if self.controller.is_loading() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("Loading...").color(self.theme.secondary_text));
                    });
                } else if matches!(self.controller.state(), SearchState::Ready(_)) {
                    let more_btn = ui.add_enabled(
                        self.controller.has_more(),
                        egui::Button::new(RichText::new("More").color(self.theme.button_foreground))
                            .min_size(egui::Vec2::new(120.0, 32.0))
                            .corner_radius(CornerRadius::same(6))
                            .fill(self.theme.button_background),
                    );
                    if more_btn.clicked() {
                        actions.push(UiAction::LoadMore);
                    }
                }
            });
            ui.add_space(16.0);
        });
    }
}

impl eframe::App for HnSearchApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string("is_dark_mode", self.is_dark_mode.to_string());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.theme.apply_to_ctx(ctx);

        if self.controller.poll() {
            ctx.request_repaint();
        }
        // Keep polling while a fetch is outstanding
        if self.controller.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui, &mut actions);
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "{} results for '{}' (page {})",
                    self.controller.hits().len(),
                    self.controller.current_term(),
                    self.controller.page() + 1
                ))
                .color(self.theme.secondary_text)
                .size(13.0),
            );
            ui.separator();
            self.render_error(ui, &mut actions);
            self.render_results(ui, &mut actions);
        });

        if !actions.is_empty() {
            for action in actions {
                tracing::debug!(?action, "ui action");
                self.apply(action);
            }
            ctx.request_repaint();
        }
    }
}
