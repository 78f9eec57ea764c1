//! Reusable UI components for the assistant overlay

mod control_bar;
mod hologram;
mod notice;
mod transcript_panel;
mod video_surface;

pub use control_bar::ControlBar;
pub use hologram::HologramFigure;
pub use notice::NoticeDialog;
pub use transcript_panel::TranscriptPanel;
pub use video_surface::VideoSurface;
