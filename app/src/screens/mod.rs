/// Screen state machines
///
/// Each screen owns the interaction state a UI shell would render: form
/// fields, inline error strings, loading flags and locally cached results.
/// Screens call into the services and never touch the stores directly.
/// Inline error strings here are user-facing copy; failures that only
/// matter to operators go to the log instead.
pub mod auth;
pub mod composer;
pub mod feed;
pub mod profile;
pub mod scan;
pub mod search;

pub use auth::AuthScreen;
pub use composer::ComposerScreen;
pub use feed::{FeedScreen, PostCard};
pub use profile::ProfileScreen;
pub use scan::ScanScreen;
pub use search::{MaterialSearchScreen, TextSearchScreen};
