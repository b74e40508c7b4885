use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Estimated header height, used to size the scrollable viewport before the
/// first scroll report delivers exact bounds.
pub(crate) const HEADER_HEIGHT_PX: f32 = 64.0;
/// Animation clock granularity while a transition or idle deadline is live.
pub(crate) const TICK_INTERVAL: Duration = Duration::from_millis(16);
/// Cadence of the sigint poll.
pub(crate) const SIGNAL_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub(crate) static PAGE_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("page-scroll"));
