pub mod art;
pub mod history;
pub mod home;
pub mod literature;
pub mod music;
pub mod window;
