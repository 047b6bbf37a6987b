use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{event, window, Alignment, Color, Element, Event, Length, Subscription, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod ingest;
mod state;
mod ui;

use config::Settings;
use export::{ExportError, SystemClipboard};
use ingest::{policy, EncodeOutcome, Encoder, Generation, SourceFile};
use state::data::EntryId;
use state::drop_batch::DropBatch;
use state::gallery::Gallery;

/// Window drop events arrive one file at a time; wait this long for the
/// rest of the drop before submitting it as one batch.
const DROP_SETTLE: Duration = Duration::from_millis(75);

const CARD_SPACING: f32 = 16.0;

/// Main application state
struct Converter {
    /// Accepted entries and the visible error slot
    gallery: Gallery,
    /// Bounded background encoder shared by every submission
    encoder: Encoder,
    clipboard: SystemClipboard,
    settings: Settings,
    /// Files dropped on the window that have not been submitted yet
    dropped: DropBatch,
    /// Files are hovering over the window
    is_dragging: bool,
    /// Outcome of the last copy or download
    notice: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the drop zone
    PickFiles,
    FileHovered,
    HoverLeft,
    FileDropped(PathBuf),
    /// No more drop events for this drop
    DropSettled,
    /// Background encode finished
    EncodeComplete(EncodeOutcome),
    Copy(EntryId),
    Download(EntryId),
    DownloadComplete(Result<PathBuf, ExportError>),
    ClearAll,
}

impl Converter {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let generation = Generation::default();
        let encoder = Encoder::new(settings.encode_limit(), generation.clone());

        tracing::info!(
            "🖼️  Image to Base64 Converter v{} (up to {} concurrent encodes)",
            env!("CARGO_PKG_VERSION"),
            settings.encode_limit()
        );

        (
            Converter {
                gallery: Gallery::new(generation),
                encoder,
                clipboard: SystemClipboard::default(),
                settings,
                dropped: DropBatch::default(),
                is_dragging: false,
                notice: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFiles => {
                let files = FileDialog::new()
                    .set_title("Select images to convert")
                    .add_filter("Images", &policy::PICKER_EXTENSIONS)
                    .pick_files();

                match files {
                    Some(paths) => self.submit(paths),
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                self.is_dragging = true;
                Task::none()
            }
            Message::HoverLeft => {
                self.is_dragging = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.is_dragging = false;

                if self.dropped.push(path) {
                    Task::perform(tokio::time::sleep(DROP_SETTLE), |_| Message::DropSettled)
                } else {
                    Task::none()
                }
            }
            Message::DropSettled => {
                let paths = self.dropped.take();
                self.submit(paths)
            }
            Message::EncodeComplete(outcome) => {
                self.gallery.complete(outcome);
                Task::none()
            }
            Message::Copy(id) => {
                if let Some(payload) = self.gallery.get(id).and_then(|e| e.encoded_payload()) {
                    let notice = export::copy_payload(&mut self.clipboard, payload);
                    self.notice = Some(notice.to_string());
                }
                Task::none()
            }
            Message::Download(id) => {
                let Some(entry) = self.gallery.get(id) else {
                    return Task::none();
                };
                let Some(payload) = entry.encoded_payload() else {
                    return Task::none();
                };

                let mut dialog = FileDialog::new()
                    .set_title("Save Base64 string")
                    .set_file_name(export::download_file_name(&entry.name))
                    .add_filter("Text", &["txt"]);
                if let Some(dir) = self.settings.download_dir() {
                    dialog = dialog.set_directory(dir);
                }

                match dialog.save_file() {
                    Some(path) => Task::perform(
                        export::write_artifact(path, payload.to_owned()),
                        Message::DownloadComplete,
                    ),
                    None => Task::none(),
                }
            }
            Message::DownloadComplete(result) => {
                self.notice = Some(match result {
                    Ok(path) => format!("Saved {}", path.display()),
                    Err(e) => {
                        tracing::error!("{}", e);
                        e.to_string()
                    }
                });
                Task::none()
            }
            Message::ClearAll => {
                self.gallery.clear_all();
                self.notice = None;
                Task::none()
            }
        }
    }

    /// Run a batch of paths through the pipeline and start their encodes
    fn submit(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        if paths.is_empty() {
            return Task::none();
        }

        let jobs = self
            .gallery
            .submit(paths.into_iter().map(SourceFile::from_path));

        Task::batch(jobs.into_iter().map(|job| {
            Task::perform(self.encoder.clone().encode(job), Message::EncodeComplete)
        }))
    }

    /// Window events for drag-and-drop
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::HoverLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let prompt = if self.is_dragging {
            "Drop to convert"
        } else {
            "Drag 'n' drop images here, or click to select files"
        };

        let drop_zone = button(
            column![
                text(prompt).size(18),
                text("JPG, PNG, GIF, BMP, SVG (Max 5MB per file)").size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center),
        )
        .on_press(Message::PickFiles)
        .padding(30)
        .width(Length::Fill)
        .style(if self.is_dragging {
            button::primary
        } else {
            button::secondary
        });

        let mut content: Column<Message> = column![
            text("Image to Base64 Converter").size(36),
            drop_zone,
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        if let Some(error) = self.gallery.last_error() {
            content = content.push(
                container(
                    row![text("Error!").size(16), text(error.to_string()).size(14)]
                        .spacing(8)
                        .align_y(Alignment::Center),
                )
                .padding(12)
                .width(Length::Fill)
                .style(|theme: &Theme| container::Style {
                    text_color: Some(Color::from_rgb(0.95, 0.35, 0.35)),
                    ..container::rounded_box(theme)
                }),
            );
        }

        if let Some(notice) = &self.notice {
            content = content.push(text(notice).size(14));
        }

        if !self.gallery.is_empty() {
            content = content.push(
                row![button("Clear All")
                    .on_press(Message::ClearAll)
                    .style(button::danger)
                    .padding(10)]
                .width(Length::Fill),
            );

            let cards = self
                .gallery
                .entries()
                .iter()
                .map(ui::card::entry_card)
                .collect();
            content = content.push(
                Wrap::with_elements(cards)
                    .spacing(CARD_SPACING)
                    .line_spacing(CARD_SPACING),
            );
        }

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("image_to_base64=info")),
        )
        .init();

    iced::application(
        "Image to Base64 Converter",
        Converter::update,
        Converter::view,
    )
    .subscription(Converter::subscription)
    .theme(Converter::theme)
    .centered()
    .run_with(Converter::new)
}
