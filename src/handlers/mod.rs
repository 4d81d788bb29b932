pub mod bar;
pub mod booking;
pub mod trivia;
