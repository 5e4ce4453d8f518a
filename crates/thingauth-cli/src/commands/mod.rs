pub mod certificate;
pub mod object;
pub mod verify;
