/// Application wiring
///
/// `Crafty` assembles the remote clients, the services and the screen
/// factories from one configuration. One HTTP client and one session
/// store are shared across all remote clients so a sign-in is visible to
/// the document and blob calls immediately.
use std::sync::Arc;

use firebase_client::{new_session_store, AuthClient, FirestoreClient, StorageClient};
use tracing::info;

use crate::config::Config;
use crate::detect::SsdDetector;
use crate::screens::{
    AuthScreen, ComposerScreen, FeedScreen, MaterialSearchScreen, ProfileScreen, ScanScreen,
    TextSearchScreen,
};
use crate::services::{AuthService, PostService};

pub struct Crafty {
    config: Config,
    auth: Arc<AuthService>,
    posts: Arc<PostService>,
    detector: Arc<SsdDetector>,
}

impl Crafty {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let session = new_session_store();

        let firestore = Arc::new(FirestoreClient::new(
            http.clone(),
            config.firebase.clone(),
            session.clone(),
        ));
        let storage = Arc::new(StorageClient::new(
            http.clone(),
            config.firebase.clone(),
            session.clone(),
        ));
        let auth_client = Arc::new(AuthClient::new(http, config.firebase.clone(), session));

        let auth = Arc::new(AuthService::new(
            auth_client,
            firestore.clone(),
            storage.clone(),
        ));
        let posts = Arc::new(PostService::new(firestore, storage));
        let detector = Arc::new(SsdDetector::new(&config.detection));

        info!(env = %config.env, "application assembled");
        Self {
            config,
            auth,
            posts,
            detector,
        }
    }

    pub fn auth_service(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    pub fn post_service(&self) -> Arc<PostService> {
        Arc::clone(&self.posts)
    }

    pub fn auth_screen(&self) -> AuthScreen {
        AuthScreen::new(Arc::clone(&self.auth))
    }

    pub fn feed_screen(&self) -> FeedScreen {
        FeedScreen::new(Arc::clone(&self.posts))
    }

    pub fn composer_screen(&self) -> ComposerScreen {
        ComposerScreen::new(Arc::clone(&self.posts))
    }

    pub fn material_search_screen(&self) -> MaterialSearchScreen {
        MaterialSearchScreen::new(Arc::clone(&self.posts))
    }

    pub fn text_search_screen(&self) -> TextSearchScreen {
        TextSearchScreen::new(Arc::clone(&self.posts))
    }

    pub fn scan_screen(&self) -> ScanScreen {
        ScanScreen::new(self.detector.clone(), &self.config.detection.model_path)
    }

    pub fn profile_screen(&self) -> ProfileScreen {
        ProfileScreen::new(Arc::clone(&self.auth))
    }
}
