mod cfg;
mod doctor;
mod edit;
mod play;

pub use cfg::handle_cfg_command;
pub use doctor::handle_doctor_command;
pub use edit::handle_edit_command;
pub use play::handle_play_command;
