pub mod audio;
pub mod dialogue;
