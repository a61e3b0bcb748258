pub mod headless;
pub mod presenter;

pub use headless::{SessionConfig, SessionDriver};
pub use presenter::{LogPresenter, Presenter};
