mod control_box;

pub use control_box::ControlBox;
