use super::messages::Message;
use super::state::{App, PAGE_SCROLL_ID};
use crate::config::ThemeMode;
use crate::content::PAGE_SECTIONS;
use crate::markers::MarkerSet;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Canvas};
use iced::widget::{Space, button, column, container, horizontal_space, row, scrollable, stack, text};
use iced::{Element, Length, Point, Rectangle, Renderer, Size, Theme, mouse};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let mut nav = row![].spacing(8).align_y(Vertical::Center);
        for (index, section) in PAGE_SECTIONS.iter().enumerate() {
            nav = nav.push(
                button(text(section.slug).size(14)).on_press(Message::JumpToSection(index)),
            );
        }

        let active = &PAGE_SECTIONS[self.scheduler.active()];
        let status = match self.scheduler.in_flight() {
            Some(step) => text(format!(
                "Viewing: {} \u{2192} {}",
                active.slug, PAGE_SECTIONS[step].slug
            ))
            .size(14),
            None => text(format!("Viewing: {}", active.slug)).size(14),
        };
        let theme_label = match self.config.theme {
            ThemeMode::Day => "Night Mode",
            ThemeMode::Night => "Day Mode",
        };
        let theme_toggle = button(text(theme_label).size(14)).on_press(Message::ToggleTheme);
        let reset = button(text("Reset markers").size(14)).on_press(Message::ResetMarkers);

        let header = container(
            row![nav, horizontal_space(), status, theme_toggle, reset]
                .spacing(12)
                .align_y(Vertical::Center),
        )
        .padding(if self.header_compact {
            [6.0, 16.0]
        } else {
            [14.0, 16.0]
        })
        .width(Length::Fill);

        let mut page = column![];
        for index in 0..PAGE_SECTIONS.len() {
            page = page.push(self.section_view(index));
        }

        let page_view = scrollable(page.width(Length::Fill))
            .on_scroll(|viewport| Message::Scrolled {
                offset_y: viewport.absolute_offset().y,
                viewport_width: viewport.bounds().width,
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .id(PAGE_SCROLL_ID.clone())
            .width(Length::Fill)
            .height(Length::Fill);

        let overlay = Canvas::new(MarkerOverlay {
            markers: &self.markers,
            scroll_y: self.scroll_y,
            size: self.layout.marker_size(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        let mut layers = stack![page_view, overlay]
            .width(Length::Fill)
            .height(Length::Fill);
        if self.show_scroll_top {
            layers = layers.push(
                container(button(text("Top").size(14)).on_press(Message::ScrollToTop))
                    .align_x(Horizontal::Right)
                    .align_y(Vertical::Bottom)
                    .padding(20.0)
                    .width(Length::Fill)
                    .height(Length::Fill),
            );
        }

        column![header, layers].into()
    }

    fn section_view(&self, index: usize) -> Element<'_, Message> {
        let section = &PAGE_SECTIONS[index];

        let mut body = column![].spacing(12);
        for paragraph in section.body {
            body = body.push(text(*paragraph).size(16));
        }

        container(column![
            container(
                column![
                    text(section.title).size(32),
                    text(section.tagline).size(16),
                ]
                .spacing(8),
            )
            .height(Length::Fixed(self.config.row_offset))
            .padding([12.0, 24.0]),
            // Room for the highlight row the markers park on; `row_offset`
            // in layout.rs points at its top edge.
            Space::with_height(Length::Fixed(self.config.marker_size + 12.0)),
            container(body).padding([12.0, 24.0]),
        ])
        .height(Length::Fixed(self.config.section_height))
        .width(Length::Fill)
        .clip(true)
        .into()
    }
}

/// Paints the marker trio over the scrollable page, translating content
/// coordinates by the current scroll offset.
struct MarkerOverlay<'a> {
    markers: &'a MarkerSet,
    scroll_y: f32,
    size: f32,
}

impl<Message> canvas::Program<Message> for MarkerOverlay<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let base = theme.palette().text;

        for marker in self.markers.markers() {
            if marker.opacity <= 0.0 {
                continue;
            }
            let top = marker.top - self.scroll_y;
            if top + self.size < 0.0 || top > bounds.height {
                continue;
            }
            let color = iced::Color {
                a: base.a * marker.opacity,
                ..base
            };
            frame.fill_rectangle(
                Point::new(marker.left, top),
                Size::new(self.size, self.size),
                color,
            );
        }

        vec![frame.into_geometry()]
    }
}
