mod calendar_header;
mod calendar_view;
mod day_cell;
mod entry_chip;

pub use calendar_header::CalendarHeader;
pub use calendar_view::CalendarView;
pub use day_cell::DayCell;
pub use entry_chip::{
  MeetingChip,
  TaskChip
};
