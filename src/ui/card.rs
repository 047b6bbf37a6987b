//! One card per entry: preview, metadata, data URI and actions

use iced::widget::{button, column, container, image, row, svg, text, text_input, Space};
use iced::{Alignment, Element, Length};

use crate::state::data::{PreviewHandle, Status, UploadedImage};
use crate::Message;

/// Square thumbnail edge in logical pixels
const THUMBNAIL_SIZE: f32 = 96.0;
const CARD_WIDTH: f32 = 440.0;

/// Build the card for a single entry
pub fn entry_card(entry: &UploadedImage) -> Element<'_, Message> {
    let thumbnail: Element<'_, Message> = match (entry.status(), &entry.preview) {
        // Empty slot until the file is converted; the info column says "Converting..."
        (Status::Pending, _) => Space::new(
            Length::Fixed(THUMBNAIL_SIZE),
            Length::Fixed(THUMBNAIL_SIZE),
        )
        .into(),
        (Status::Ready, PreviewHandle::Raster(handle)) => image(handle.clone())
            .width(Length::Fixed(THUMBNAIL_SIZE))
            .height(Length::Fixed(THUMBNAIL_SIZE))
            .into(),
        (Status::Ready, PreviewHandle::Vector(handle)) => svg(handle.clone())
            .width(Length::Fixed(THUMBNAIL_SIZE))
            .height(Length::Fixed(THUMBNAIL_SIZE))
            .into(),
    };

    let thumbnail = container(thumbnail)
        .center_x(Length::Fixed(THUMBNAIL_SIZE))
        .center_y(Length::Fixed(THUMBNAIL_SIZE));

    // Pending entries have no payload yet, so no actions either
    let output: Element<'_, Message> = match entry.encoded_payload() {
        None => text("Converting...").size(14).into(),
        Some(payload) => column![
            text_input("", payload).size(12),
            row![
                button("Copy").on_press(Message::Copy(entry.id)).padding(6),
                button("Download")
                    .on_press(Message::Download(entry.id))
                    .padding(6),
            ]
            .spacing(10),
        ]
        .spacing(8)
        .into(),
    };

    let info = column![
        text(&entry.name).size(16),
        text(entry.meta_label()).size(12),
        output,
    ]
    .spacing(6);

    container(row![thumbnail, info].spacing(12).align_y(Alignment::Center))
        .padding(12)
        .width(Length::Fixed(CARD_WIDTH))
        .style(container::rounded_box)
        .into()
}
