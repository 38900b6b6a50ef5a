pub mod ipc;
pub mod wl_seat;
