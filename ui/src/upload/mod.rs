mod view;
pub use view::UploadPanel;
