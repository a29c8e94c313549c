pub mod check_string;
pub mod login;
pub mod sign;
pub mod verify;
