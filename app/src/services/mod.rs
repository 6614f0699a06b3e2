/// Business logic layer
///
/// Services validate input, orchestrate uploads and translate between the
/// screens and the repositories. They hold no interaction state; that
/// stays with the screens.
pub mod auth;
pub mod posts;
pub mod uploads;

pub use auth::{AuthProvider, AuthService};
pub use posts::PostService;
pub use uploads::{ImageAttachment, UploadedImage};
